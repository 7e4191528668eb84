//! Canonical decimal text for numbers.
//!
//! Floating-point values are written in fixed-point notation with
//! [`FRACTION_DIGITS`] digits after the point, then trailing zeros (and a
//! dangling point) are trimmed. Anything finer than that is lost on write.
//! Integers are written exactly.
//!
//! Parsing ignores surrounding whitespace and otherwise uses the type's
//! standard `FromStr` grammar. Malformed or out-of-range text never fails the
//! caller; it yields the supplied default instead.

use std::str::FromStr;

/// Number of fractional digits kept when writing floating-point values.
pub const FRACTION_DIGITS: usize = 5;

mod sealed {
    pub trait Sealed {}
}

/// A number with a canonical decimal text form.
///
/// Sealed: implemented for the primitive integer and floating-point types
/// only, each with its own formatting rule.
pub trait Numeric: Copy + FromStr + sealed::Sealed {
    /// Render the value in canonical form.
    fn to_canonical(self) -> String;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Numeric for $ty {
                fn to_canonical(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Numeric for $ty {
                fn to_canonical(self) -> String {
                    trim_fraction(format!("{:.*}", FRACTION_DIGITS, self))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/// Strip trailing zeros after the decimal point, then a trailing point.
fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

/// Render `value` in canonical form.
///
/// ```
/// use regkit_codec::to_canonical;
///
/// assert_eq!(to_canonical(123i32), "123");
/// assert_eq!(to_canonical(99.99f32), "99.99");
/// assert_eq!(to_canonical(3.14159f64), "3.14159");
/// ```
pub fn to_canonical<T: Numeric>(value: T) -> String {
    value.to_canonical()
}

/// Parse canonical text, returning `default` when `text` does not parse.
///
/// ```
/// use regkit_codec::from_canonical;
///
/// assert_eq!(from_canonical("42", 0i32), 42);
/// assert_eq!(from_canonical("forty-two", 7i32), 7);
/// ```
pub fn from_canonical<T: Numeric>(text: &str, default: T) -> T {
    text.trim().parse::<T>().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(to_canonical(123i32), "123");
        assert_eq!(to_canonical(-7i64), "-7");
        assert_eq!(to_canonical(0u8), "0");
        assert_eq!(to_canonical(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn floats_are_trimmed() {
        assert_eq!(to_canonical(99.99f32), "99.99");
        assert_eq!(to_canonical(3.14159f64), "3.14159");
        assert_eq!(to_canonical(2.5f64), "2.5");
        assert_eq!(to_canonical(10.0f64), "10");
        assert_eq!(to_canonical(100.0f32), "100");
        assert_eq!(to_canonical(0.0f64), "0");
    }

    #[test]
    fn floats_round_to_five_digits() {
        assert_eq!(to_canonical(1.234567f64), "1.23457");
        assert_eq!(to_canonical(0.000001f64), "0");
        assert_eq!(to_canonical(-0.5f64), "-0.5");
    }

    #[test]
    fn trimming_only_touches_the_fraction() {
        assert_eq!(trim_fraction("1000".to_string()), "1000");
        assert_eq!(trim_fraction("1000.00000".to_string()), "1000");
        assert_eq!(trim_fraction("10.50000".to_string()), "10.5");
    }

    #[test]
    fn parse_valid_text() {
        assert_eq!(from_canonical("123", 0i32), 123);
        assert_eq!(from_canonical(" 42 ", 0u16), 42);
        assert_eq!(from_canonical("3.14159", 0.0f64), 3.14159);
        assert_eq!(from_canonical("99.99", 0.0f32), 99.99f32);
        assert_eq!(from_canonical("-1", 0i8), -1);
    }

    #[test]
    fn parse_failures_fall_back() {
        assert_eq!(from_canonical("", 42i32), 42);
        assert_eq!(from_canonical("abc", 42i32), 42);
        assert_eq!(from_canonical("1.5", 42i32), 42);
        assert_eq!(from_canonical("300", 9u8), 9);
        assert_eq!(from_canonical("-1", 9u32), 9);
        assert_eq!(from_canonical("12abc", 1.0f64), 1.0);
    }

    proptest! {
        #[test]
        fn integer_roundtrip(v in any::<i64>()) {
            prop_assert_eq!(from_canonical(&to_canonical(v), 0i64), v);
        }

        #[test]
        fn unsigned_roundtrip(v in any::<u32>()) {
            prop_assert_eq!(from_canonical(&to_canonical(v), 0u32), v);
        }

        #[test]
        fn double_roundtrip_within_precision(v in -1.0e9f64..1.0e9f64) {
            let back = from_canonical(&to_canonical(v), f64::NAN);
            prop_assert!((back - v).abs() <= 0.5e-5 + v.abs() * f64::EPSILON * 4.0);
        }

        #[test]
        fn float_roundtrip_within_precision(v in -1.0e4f32..1.0e4f32) {
            let back = from_canonical(&to_canonical(v), f32::NAN);
            prop_assert!((back - v).abs() <= 0.5e-5 + v.abs() * f32::EPSILON * 4.0);
        }

        #[test]
        fn parse_never_panics(text in ".{0,32}") {
            let _ = from_canonical(&text, 0i32);
            let _ = from_canonical(&text, 0.0f64);
        }
    }
}
