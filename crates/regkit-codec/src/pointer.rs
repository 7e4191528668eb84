//! Process-scoped pointer tokens.
//!
//! A token is `<lowercase-hex-address>_<decimal-origin>`. The origin is the
//! identity of the process that wrote it; decoding under any other origin is
//! refused, since an address means nothing outside the address space that
//! produced it.
//!
//! Nothing here checks the address itself. Tokens are only for handing a
//! live in-process object through the store; they do not survive a restart
//! (ASLR and relocation invalidate them even for the same binary).

use std::fmt;

use crate::error::PointerError;

/// Separator between the address and origin segments.
const SEPARATOR: char = '_';

/// Identity of the execution scope that created a pointer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OriginToken(u32);

impl OriginToken {
    /// Wrap a raw origin value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The origin of the running process.
    pub fn current() -> Self {
        Self(std::process::id())
    }

    /// The raw origin value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OriginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for OriginToken {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Encode `address` as a token owned by `origin`.
///
/// ```
/// use regkit_codec::pointer::{encode, OriginToken};
///
/// assert_eq!(encode(0x7ffd_1234, OriginToken::new(4242)), "7ffd1234_4242");
/// ```
pub fn encode(address: usize, origin: OriginToken) -> String {
    format!("{address:x}{SEPARATOR}{origin}")
}

/// Resolve a token back to its address, if `current` is the origin that
/// wrote it.
pub fn decode(token: &str, current: OriginToken) -> Result<usize, PointerError> {
    let malformed = |reason| PointerError::Malformed {
        token: token.to_string(),
        reason,
    };

    let (address, origin) = token
        .split_once(SEPARATOR)
        .ok_or_else(|| malformed("missing '_' separator"))?;

    let address =
        usize::from_str_radix(address, 16).map_err(|_| malformed("invalid hex address"))?;
    let stored: u32 = origin
        .parse()
        .map_err(|_| malformed("invalid decimal origin"))?;

    if stored != current.as_u32() {
        return Err(PointerError::CrossProcess {
            stored,
            current: current.as_u32(),
        });
    }
    Ok(address)
}
