//! Packed integer decoding for AppData values
//!
//! Large numeric fields in the dump are compressed with a base-32 encoding
//! (alphabet `0-9a-v`). Values the addon emits uncompressed are plain decimal
//! digit strings and take a fast path.
//!
//! Format:
//! 1. All-decimal tokens are base-10 values
//! 2. Base-32 tokens of 6 digits or fewer encode the value directly
//! 3. Longer tokens are two limbs: the last 6 digits are the low limb,
//!    the rest the high limb, combined as `high * 2^30 + low`

/// Base-32 alphabet used by the AppData packing (uppercase accepted)
const BASE32_ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Digits held by the low limb of a two-limb token
const LOW_LIMB_DIGITS: usize = 6;

/// Multiplier applied to the high limb. Equal to 32^6, so a full low limb
/// can never reach it.
const HIGH_LIMB_MULTIPLIER: u64 = 1 << 30;

/// Errors that can occur while decoding a packed value
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("empty value token")]
    Empty,

    #[error("invalid base-32 digit {digit:?} in token {token:?}")]
    InvalidDigit { token: String, digit: char },

    #[error("value out of range in token {0:?}")]
    Overflow(String),
}

/// Decode a single scalar token into an integer.
///
/// All-decimal tokens are parsed as base 10; anything else must be a valid
/// base-32 token. Malformed tokens surface as an error, never as zero.
pub fn decode_value(token: &str) -> Result<u64, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return token
            .parse::<u64>()
            .map_err(|_| DecodeError::Overflow(token.to_string()));
    }

    if token.len() > LOW_LIMB_DIGITS {
        let (high, low) = token.split_at(token.len() - LOW_LIMB_DIGITS);
        let high = decode_base32(token, high)?;
        let low = decode_base32(token, low)?;
        high.checked_mul(HIGH_LIMB_MULTIPLIER)
            .and_then(|shifted| shifted.checked_add(low))
            .ok_or_else(|| DecodeError::Overflow(token.to_string()))
    } else {
        decode_base32(token, token)
    }
}

/// Split a raw row string on commas and decode each token.
///
/// Order is preserved; arity is the caller's concern. An empty row string
/// yields an empty vector.
pub fn unpack_row(row: &str) -> Result<Vec<u64>, DecodeError> {
    if row.is_empty() {
        return Ok(Vec::new());
    }
    row.split(',').map(decode_value).collect()
}

/// Decode one limb of `token` in base 32. `token` is only used for error
/// reporting so a bad digit names the full token it came from.
fn decode_base32(token: &str, digits: &str) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    for digit in digits.chars() {
        let digit_value = digit
            .is_ascii()
            .then(|| (digit as u8).to_ascii_lowercase())
            .and_then(|b| BASE32_ALPHABET.iter().position(|&a| a == b))
            .ok_or_else(|| DecodeError::InvalidDigit {
                token: token.to_string(),
                digit,
            })?;
        value = value
            .checked_mul(32)
            .and_then(|v| v.checked_add(digit_value as u64))
            .ok_or_else(|| DecodeError::Overflow(token.to_string()))?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of `decode_value`, test-only. Values whose packed rendering
    /// would be all decimal digits are emitted as plain decimal, since the
    /// decoder's decimal fast path would claim them anyway.
    fn encode_value(value: u64) -> String {
        let packed = if value < HIGH_LIMB_MULTIPLIER {
            to_base32(value)
        } else {
            let high = to_base32(value / HIGH_LIMB_MULTIPLIER);
            let low = to_base32(value % HIGH_LIMB_MULTIPLIER);
            format!("{high}{low:0>6}")
        };
        if packed.bytes().all(|b| b.is_ascii_digit()) {
            value.to_string()
        } else {
            packed
        }
    }

    fn to_base32(mut value: u64) -> String {
        if value == 0 {
            return "0".to_string();
        }
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(BASE32_ALPHABET[(value % 32) as usize]);
            value /= 32;
        }
        digits.reverse();
        String::from_utf8(digits).unwrap()
    }

    #[test]
    fn test_decimal_tokens_parse_as_base_10() {
        assert_eq!(decode_value("0").unwrap(), 0);
        assert_eq!(decode_value("42").unwrap(), 42);
        assert_eq!(decode_value("1000000").unwrap(), 1_000_000);
    }

    #[test]
    fn test_short_tokens_decode_as_base_32() {
        assert_eq!(decode_value("a").unwrap(), 10);
        assert_eq!(decode_value("v").unwrap(), 31);
        assert_eq!(decode_value("1a").unwrap(), 42);
        // 6 digits is still a single limb
        assert_eq!(decode_value("vvvvvv").unwrap(), (1 << 30) - 1);
    }

    #[test]
    fn test_long_tokens_split_into_two_limbs() {
        // "1a" high limb, "00000a" low limb
        assert_eq!(decode_value("1a00000a").unwrap(), 42 * (1 << 30) + 10);
    }

    #[test]
    fn test_limb_boundary() {
        // Smallest packed token past the boundary: high limb 1, low limb 10.
        // The split is algebraically identical to whole-token base-32 since
        // 32^6 == 2^30, and a full low limb can never reach the multiplier.
        assert_eq!(decode_value("100000a").unwrap(), (1 << 30) + 10);
    }

    #[test]
    fn test_uppercase_digits_accepted() {
        assert_eq!(decode_value("A").unwrap(), 10);
        assert_eq!(decode_value("1A00000A").unwrap(), decode_value("1a00000a").unwrap());
    }

    #[test]
    fn test_empty_token_is_an_error() {
        assert!(matches!(decode_value(""), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_invalid_digit_is_an_error() {
        // 'x' is past the 32-digit alphabet and scanned before the '!'
        let err = decode_value("12x!").unwrap_err();
        match err {
            DecodeError::InvalidDigit { token, digit } => {
                assert_eq!(token, "12x!");
                assert_eq!(digit, 'x');
            }
            other => panic!("unexpected error: {other}"),
        }
        let err = decode_value("12!").unwrap_err();
        match err {
            DecodeError::InvalidDigit { token, digit } => {
                assert_eq!(token, "12!");
                assert_eq!(digit, '!');
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            decode_value("w"),
            Err(DecodeError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn test_decimal_overflow_is_an_error() {
        assert!(matches!(
            decode_value("99999999999999999999999"),
            Err(DecodeError::Overflow(_))
        ));
    }

    #[test]
    fn test_base32_overflow_is_an_error() {
        // 14-digit high limb alone exceeds u64 once shifted by 30 bits
        assert!(matches!(
            decode_value("vvvvvvvvvvvvvvvvvvvv"),
            Err(DecodeError::Overflow(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        for value in [
            0,
            1,
            9,
            10,
            31,
            32,
            1_000_000,
            (1 << 30) - 1,
            1 << 30,
            (1 << 30) + 10,
            123_456_789_012_345,
            u64::MAX / 32,
        ] {
            let token = encode_value(value);
            assert_eq!(decode_value(&token).unwrap(), value, "token {token:?}");
        }
    }

    #[test]
    fn test_unpack_row_preserves_order() {
        assert_eq!(unpack_row("1,a,2,b").unwrap(), vec![1, 10, 2, 11]);
    }

    #[test]
    fn test_unpack_row_empty_input() {
        assert_eq!(unpack_row("").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_unpack_row_propagates_decode_errors() {
        assert!(unpack_row("1,!,2").is_err());
        // an empty token inside a row is still an error
        assert!(matches!(unpack_row("1,,2"), Err(DecodeError::Empty)));
    }
}
