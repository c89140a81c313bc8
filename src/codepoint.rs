//! Hexadecimal code point decoding and range expansion.
//!
//! Emoji data tables write code points as bare hex (`1F600`), sequences as
//! space separated tokens (`00A9 FE0F`) and runs of consecutive characters as
//! ranges (`231A..231B`). Sequences and ranges are decoded by different
//! functions so that a caller which only supports one shape rejects the other.

use crate::error::{Cause, Error, HexError, Result};

pub const RANGE_DELIMITER: &str = "..";

const MAX_CODE_POINT: u32 = i32::MAX as u32;

/// Decodes one hex token such as `1F600` (case-insensitive, no `0x` prefix).
pub fn decode_hex(token: &str) -> std::result::Result<u32, HexError> {
    if token.is_empty() {
        return Err(HexError::Empty);
    }
    if let Some(bad) = token.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(bad));
    }

    let value = u32::from_str_radix(token, 16).map_err(|_| HexError::Overflow)?;
    if value > MAX_CODE_POINT {
        return Err(HexError::Overflow);
    }
    Ok(value)
}

/// Decodes a space separated code point sequence, e.g. `00A9 FE0F`.
///
/// Ranges are rejected; use [`expand_range`] for those.
pub fn decode_code_points(code_points: &str) -> Result<Vec<u32>> {
    if code_points.contains(RANGE_DELIMITER) {
        return Err(Error::invalid(code_points, Cause::RangeNotSupported));
    }

    let mut decoded = Vec::new();
    for token in code_points.split_whitespace() {
        let value = decode_hex(token).map_err(|e| Error::invalid(token, e.into()))?;
        decoded.push(value);
    }

    if decoded.is_empty() {
        return Err(Error::invalid(code_points, Cause::NoCodePoints));
    }
    Ok(decoded)
}

/// Expands a range such as `1F380..1F393` into its individual code points.
///
/// Both endpoints are included, except that a range whose endpoints are equal
/// expands to nothing.
pub fn expand_range(range: &str) -> Result<Vec<u32>> {
    let parts: Vec<&str> = range.split(RANGE_DELIMITER).collect();
    let [start, end] = parts.as_slice() else {
        return Err(Error::invalid(range, Cause::NotARange));
    };

    let first = decode_hex(start).map_err(|e| Error::invalid(*start, e.into()))?;
    let last = decode_hex(end).map_err(|e| Error::invalid(*end, e.into()))?;

    if last < first {
        return Err(Error::invalid(
            range,
            Cause::ReversedRange {
                start: first,
                end: last,
            },
        ));
    }
    if first == last {
        return Ok(Vec::new());
    }

    Ok((first..=last).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_hex_round_trips_uppercase() {
        for token in ["23F0", "1F30F", "00A9", "FE0F", "E007F", "1FAC0"] {
            let value = decode_hex(token).unwrap();
            assert_eq!(format!("{value:0width$X}", width = token.len()), token);
        }
    }

    #[test]
    fn decode_hex_is_case_insensitive() {
        assert_eq!(decode_hex("23f0"), Ok(0x23F0));
        assert_eq!(decode_hex("1f30F"), Ok(0x1F30F));
    }

    #[test]
    fn decode_hex_rejects_bad_tokens() {
        assert_eq!(decode_hex(""), Err(HexError::Empty));
        assert_eq!(decode_hex("000G"), Err(HexError::InvalidDigit('G')));
        assert_eq!(decode_hex("0x1F"), Err(HexError::InvalidDigit('x')));
        assert_eq!(decode_hex("+1F"), Err(HexError::InvalidDigit('+')));
        assert_eq!(decode_hex("80000000"), Err(HexError::Overflow));
        assert_eq!(decode_hex("1000000000"), Err(HexError::Overflow));
        assert_eq!(decode_hex("7FFFFFFF"), Ok(0x7FFF_FFFF));
    }

    #[test]
    fn decode_code_points_keeps_order() {
        assert_eq!(decode_code_points("23f0").unwrap(), vec![0x23F0]);
        assert_eq!(decode_code_points("00A9 FE0F").unwrap(), vec![0x00A9, 0xFE0F]);
        assert_eq!(
            decode_code_points("002A FE0F 20E3").unwrap(),
            vec![0x2A, 0xFE0F, 0x20E3]
        );
        assert_eq!(
            decode_code_points("1F3F4 E0067 E0062 E0065 E006E E0067 E007F").unwrap(),
            vec![0x1F3F4, 0xE0067, 0xE0062, 0xE0065, 0xE006E, 0xE0067, 0xE007F]
        );
    }

    #[test]
    fn decode_code_points_rejects_ranges() {
        let err = decode_code_points("0000..0001").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCodePoint {
                cause: Cause::RangeNotSupported,
                ..
            }
        ));
    }

    #[test]
    fn decode_code_points_names_bad_token() {
        let err = decode_code_points("1F170 FE0G").unwrap_err();
        match err {
            Error::InvalidCodePoint { input, cause } => {
                assert_eq!(input, "FE0G");
                assert_eq!(cause, Cause::Hex(HexError::InvalidDigit('G')));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_code_points_rejects_blank_input() {
        assert!(decode_code_points("").is_err());
        assert!(decode_code_points("   ").is_err());
    }

    #[test]
    fn expand_range_includes_both_endpoints() {
        assert_eq!(expand_range("231A..231B").unwrap(), vec![0x231A, 0x231B]);
        assert_eq!(
            expand_range("23E9..23EC").unwrap(),
            vec![0x23E9, 0x23EA, 0x23EB, 0x23EC]
        );
        assert_eq!(
            expand_range("1FAC0..1FAC2").unwrap(),
            vec![0x1FAC0, 0x1FAC1, 0x1FAC2]
        );
    }

    #[test]
    fn expand_range_with_equal_endpoints_is_empty() {
        assert!(expand_range("23F0..23F0").unwrap().is_empty());
    }

    #[test]
    fn expand_range_validation() {
        let cases = [
            (
                "23F0",
                "invalid unicode code point: \"23F0\" because it does not look like a code point range",
            ),
            (
                "23G0..",
                "invalid unicode code point: \"23G0\" because invalid hex digit 'G'",
            ),
            (
                "23F0..23G0",
                "invalid unicode code point: \"23G0\" because invalid hex digit 'G'",
            ),
            (
                "1..2..3",
                "invalid unicode code point: \"1..2..3\" because it does not look like a code point range",
            ),
        ];

        for (range, message) in cases {
            let err = expand_range(range).unwrap_err();
            assert!(err.is_invalid_code_point(), "{range}: {err}");
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn expand_range_rejects_reversed_endpoints() {
        let err = expand_range("23EC..23E9").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCodePoint {
                cause: Cause::ReversedRange { .. },
                ..
            }
        ));
    }
}
