// this_file: crates/core/src/reader/number.rs

//! Numeric primitive readers.
//!
//! Every reader requires the JSON number to fit the target type without
//! silent truncation: integer readers reject fractional parts, exponents and
//! out-of-range values; float readers reject values that overflow to
//! infinity. Integer-looking numbers are fine for the float readers.

use crate::reader::{ReadResult, Reader};

macro_rules! number_readers {
    ($($(#[$doc:meta])* $name:ident => $ty:ty, $getter:ident;)+) => {
        $(
            $(#[$doc])*
            pub fn $name() -> Reader<$ty> {
                Reader::from_fn(|cursor| match cursor.$getter() {
                    Ok(value) => ReadResult::Value(value),
                    Err(e) => ReadResult::Error(e),
                })
            }
        )+
    };
}

number_readers! {
    /// Reads a JSON number as an unsigned 8-bit integer.
    byte => u8, get_u8;
    /// Reads a JSON number as a signed 16-bit integer.
    int16 => i16, get_i16;
    /// Reads a JSON number as a signed 32-bit integer.
    int32 => i32, get_i32;
    /// Reads a JSON number as a signed 64-bit integer.
    int64 => i64, get_i64;
    /// Reads a JSON number as an unsigned 16-bit integer.
    uint16 => u16, get_u16;
    /// Reads a JSON number as an unsigned 32-bit integer.
    uint32 => u32, get_u32;
    /// Reads a JSON number as an unsigned 64-bit integer.
    uint64 => u64, get_u64;
    /// Reads a JSON number as a 32-bit float.
    single => f32, get_f32;
    /// Reads a JSON number as a 64-bit float.
    double => f64, get_f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int32_accepts_integers() {
        assert_eq!(int32().read(b"42").unwrap(), 42);
        assert_eq!(int32().read(b"-2147483648").unwrap(), i32::MIN);
        assert_eq!(int32().read(b"2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn test_int32_rejects_wrong_shapes() {
        let err = int32().read(br#""42""#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid JSON value; expecting a JSON number compatible with Int32. \
             See token \"String\" at offset 0."
        );
        assert!(int32().read(b"-4.2").is_err());
        assert!(int32().read(b"2147483648").is_err());
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert!(uint64().read(b"-1").is_err());
        assert_eq!(uint64().read(b"18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_floats_accept_integer_looking_numbers() {
        assert_eq!(double().read(b"42").unwrap(), 42.0);
        assert_eq!(single().read(b"2.5").unwrap(), 2.5);
        assert_eq!(double().read(b"1.25e2").unwrap(), 125.0);
    }

    #[test]
    fn test_floats_reject_overflow() {
        let err = double().read(b"1e309").unwrap_err();
        assert!(err
            .to_string()
            .contains("compatible with Double"));
        assert!(single().read(b"1e39").is_err());
    }

    #[test]
    fn test_byte_range() {
        assert_eq!(byte().read(b"255").unwrap(), 255);
        assert!(byte().read(b"256").is_err());
        let err = byte().read(b"256").unwrap_err();
        assert!(err.to_string().contains("compatible with Byte"));
    }
}
