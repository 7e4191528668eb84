//! Typed value codecs for regkit.
//!
//! The backing store only knows how to hold strings. Every typed view the
//! façade offers is derived from a string by one of the stateless codecs in
//! this crate:
//!
//! - [`base64`] -- lenient base64 with the standard alphabet and `=` padding
//! - [`numeric`] -- canonical decimal text for the closed set of [`Numeric`] types
//! - [`pointer`] -- `<hex-address>_<origin>` tokens scoped to an [`OriginToken`]
//! - [`object`] -- flat [`Record`] bytes carried as base64 text
//!
//! None of the codecs touch the store; they are pure functions and can be
//! tested without one.

pub mod base64;
pub mod error;
pub mod numeric;
pub mod object;
pub mod pointer;

pub use error::{PointerError, RecordError};
pub use numeric::{from_canonical, to_canonical, Numeric};
pub use object::{decode_record, encode_record, Record};
pub use pointer::OriginToken;
