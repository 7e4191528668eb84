//! Flat records carried as base64 text.
//!
//! A [`Record`] is written as its exact in-memory bytes, base64-encoded. On
//! read the text is decoded and the byte count must equal
//! `size_of::<T>()`; any other length is a [`RecordError::SizeMismatch`],
//! never a partially filled value.

use std::mem::size_of;

use crate::base64;
use crate::error::RecordError;

/// A fixed-layout value that can be stored as raw bytes.
///
/// # Safety
///
/// Implementors must guarantee that the type:
///
/// - has a stable layout (`#[repr(C)]` or `#[repr(transparent)]` for structs),
/// - contains no padding bytes,
/// - holds no pointers, references, or owned heap data,
/// - accepts every bit pattern of its size as a valid value.
///
/// The codec can only check the byte count; any other violation is
/// undefined behavior on read.
pub unsafe trait Record: Copy + 'static {}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $( unsafe impl Record for $ty {} )*
    };
}

impl_record!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

unsafe impl<T: Record, const N: usize> Record for [T; N] {}

/// View a record's bytes.
fn record_bytes<T: Record>(value: &T) -> &[u8] {
    // SAFETY: `Record` guarantees no padding, so all `size_of::<T>()` bytes
    // behind the reference are initialized.
    unsafe { std::slice::from_raw_parts((value as *const T).cast::<u8>(), size_of::<T>()) }
}

/// Encode a record as base64 text.
pub fn encode_record<T: Record>(value: &T) -> String {
    base64::encode(record_bytes(value))
}

/// Decode base64 text produced by [`encode_record`].
pub fn decode_record<T: Record>(encoded: &str) -> Result<T, RecordError> {
    if encoded.is_empty() {
        return Err(RecordError::Empty);
    }

    let bytes = base64::decode(encoded);
    let expected = size_of::<T>();
    if bytes.len() != expected {
        return Err(RecordError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    // SAFETY: the buffer holds exactly `size_of::<T>()` bytes and `Record`
    // guarantees every bit pattern is a valid `T`. The read is unaligned
    // because a `Vec<u8>` only promises byte alignment.
    Ok(unsafe { std::ptr::read_unaligned(bytes.as_ptr().cast::<T>()) })
}
