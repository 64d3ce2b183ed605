//! Path-segment converters.
//!
//! A [`FromSegment`] implementation turns one literal path segment into a
//! typed value. The built-in set covers the primitive scalars, byte
//! buffers, and fixed-size byte arrays; user types implement the trait
//! directly to take over their own conversion.
//!
//! Converters are pure and stateless: one instance of the logic serves
//! every endpoint and every request.

use bytes::Bytes;

/// Failure to convert a path segment into its target type.
#[derive(Debug, thiserror::Error)]
#[error("cannot convert path segment '{segment}' into {target}: {reason}")]
pub struct SegmentError {
    segment: String,
    target: &'static str,
    reason: String,
}

impl SegmentError {
    /// Creates a conversion error for `segment` failing to become `target`.
    #[must_use]
    pub fn new(segment: &str, target: &'static str, reason: impl Into<String>) -> Self {
        Self {
            segment: segment.to_owned(),
            target,
            reason: reason.into(),
        }
    }

    /// The segment that failed to convert.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }
}

/// Conversion of one path segment into a typed value.
///
/// # Example
///
/// ```rust
/// use waypoint::{FromSegment, SegmentError};
///
/// struct AssortmentCode(String);
///
/// impl FromSegment for AssortmentCode {
///     fn from_segment(segment: &str) -> Result<Self, SegmentError> {
///         Ok(AssortmentCode(segment.to_uppercase()))
///     }
/// }
///
/// let code = AssortmentCode::from_segment("a1").unwrap();
/// assert_eq!(code.0, "A1");
/// ```
pub trait FromSegment: Sized {
    /// Converts the literal segment value.
    ///
    /// # Errors
    ///
    /// Returns a [`SegmentError`] when the segment does not parse.
    fn from_segment(segment: &str) -> Result<Self, SegmentError>;
}

impl FromSegment for String {
    fn from_segment(segment: &str) -> Result<Self, SegmentError> {
        Ok(segment.to_owned())
    }
}

impl FromSegment for bool {
    fn from_segment(segment: &str) -> Result<Self, SegmentError> {
        if segment == "1" || segment.eq_ignore_ascii_case("t") || segment.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if segment == "0"
            || segment.eq_ignore_ascii_case("f")
            || segment.eq_ignore_ascii_case("false")
        {
            Ok(false)
        } else {
            Err(SegmentError::new(
                segment,
                "bool",
                "expected one of 1/0/t/f/true/false",
            ))
        }
    }
}

macro_rules! impl_from_segment_for_int {
    ($($int:ty),+ $(,)?) => {
        $(
            impl FromSegment for $int {
                fn from_segment(segment: &str) -> Result<Self, SegmentError> {
                    segment.parse().map_err(|err: std::num::ParseIntError| {
                        SegmentError::new(segment, stringify!($int), err.to_string())
                    })
                }
            }
        )+
    };
}

impl_from_segment_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromSegment for Vec<u8> {
    fn from_segment(segment: &str) -> Result<Self, SegmentError> {
        Ok(segment.as_bytes().to_vec())
    }
}

impl FromSegment for Bytes {
    fn from_segment(segment: &str) -> Result<Self, SegmentError> {
        Ok(Bytes::copy_from_slice(segment.as_bytes()))
    }
}

impl<const N: usize> FromSegment for [u8; N] {
    fn from_segment(segment: &str) -> Result<Self, SegmentError> {
        let raw = segment.as_bytes();
        if raw.len() != N {
            return Err(SegmentError::new(
                segment,
                "byte array",
                format!("expected exactly {N} bytes, got {}", raw.len()),
            ));
        }
        let mut buffer = [0u8; N];
        buffer.copy_from_slice(raw);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_identity() {
        assert_eq!(String::from_segment("a1").unwrap(), "a1");
        assert_eq!(String::from_segment("").unwrap(), "");
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(i8::from_segment("-12").unwrap(), -12);
        assert_eq!(i16::from_segment("900").unwrap(), 900);
        assert_eq!(i64::from_segment("-9000000000").unwrap(), -9_000_000_000);
    }

    #[test]
    fn test_unsigned_integers() {
        assert_eq!(u16::from_segment("666").unwrap(), 666);
        assert_eq!(u64::from_segment("900").unwrap(), 900);
        assert!(u32::from_segment("-1").is_err());
    }

    #[test]
    fn test_integer_overflow_fails() {
        assert!(u8::from_segment("256").is_err());
        assert!(i8::from_segment("128").is_err());
    }

    #[test]
    fn test_integer_garbage_fails() {
        let err = u16::from_segment("abc").unwrap_err();
        assert_eq!(err.segment(), "abc");
        assert!(err.to_string().contains("u16"));
    }

    #[test]
    fn test_bool_accepted_forms() {
        for truthy in ["1", "t", "T", "true", "TRUE", "tRuE"] {
            assert!(bool::from_segment(truthy).unwrap(), "input: {truthy}");
        }
        for falsy in ["0", "f", "F", "false", "FALSE"] {
            assert!(!bool::from_segment(falsy).unwrap(), "input: {falsy}");
        }
        assert!(bool::from_segment("yes").is_err());
        assert!(bool::from_segment("10").is_err());
    }

    #[test]
    fn test_byte_buffers() {
        assert_eq!(Vec::<u8>::from_segment("a1").unwrap(), b"a1".to_vec());
        assert_eq!(Bytes::from_segment("a1").unwrap(), Bytes::from_static(b"a1"));
    }

    #[test]
    fn test_byte_array_exact_length() {
        let value: [u8; 2] = <[u8; 2]>::from_segment("a1").unwrap();
        assert_eq!(&value, b"a1");
    }

    #[test]
    fn test_byte_array_length_mismatch_fails() {
        let err = <[u8; 4]>::from_segment("a1").unwrap_err();
        assert!(err.to_string().contains("expected exactly 4 bytes"));
        assert!(<[u8; 1]>::from_segment("a1").is_err());
    }

    #[test]
    fn test_user_defined_conversion() {
        struct Upper(String);

        impl FromSegment for Upper {
            fn from_segment(segment: &str) -> Result<Self, SegmentError> {
                Ok(Upper(segment.to_uppercase()))
            }
        }

        assert_eq!(Upper::from_segment("poow").unwrap().0, "POOW");
    }
}
