use ethereum_types::H256;

use crate::error::EncodingError;

/// Converts a hex string to a 32 byte hash.
///
/// Accepts an optional `0x` prefix. The decoded value must be exactly
/// 32 bytes; shorter or longer input is rejected rather than padded.
///
/// # Arguments
///
/// * `value` - The hexadecimal string to convert.
pub fn parse_h256(value: &str) -> Result<H256, EncodingError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)?;
    if bytes.len() != 32 {
        return Err(EncodingError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    Ok(H256::from_slice(&bytes))
}

/// Parses a hex quantity (e.g. a block number or timestamp) into a `u64`.
///
/// # Arguments
///
/// * `value` - The hexadecimal string to parse, with or without `0x` prefix.
pub fn parse_hex_u64(value: &str) -> Result<u64, EncodingError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(stripped, 16)
        .map_err(|_| EncodingError::QuantityOutOfRange(value.to_string()))
}

/// Renders a 32 byte hash as a `0x`-prefixed lowercase hex string.
pub fn h256_to_hex(value: &H256) -> String {
    format!("0x{}", hex::encode(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_h256_with_prefix() {
        let parsed = parse_h256(
            "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
        )
        .unwrap();
        assert_eq!(parsed.as_bytes()[0], 0x88);
        assert_eq!(parsed.as_bytes()[31], 0xb6);
    }

    #[test]
    fn test_parse_h256_without_prefix() {
        let with_prefix = parse_h256(
            "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
        )
        .unwrap();
        let without_prefix = parse_h256(
            "88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
        )
        .unwrap();
        assert_eq!(with_prefix, without_prefix);
    }

    #[test]
    fn test_parse_h256_rejects_short_input() {
        let result = parse_h256("0x88e96d");
        assert!(matches!(
            result,
            Err(EncodingError::InvalidLength {
                expected: 32,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_parse_h256_rejects_long_input() {
        let result = parse_h256(
            "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6ff",
        );
        assert!(matches!(
            result,
            Err(EncodingError::InvalidLength {
                expected: 32,
                actual: 33
            })
        ));
    }

    #[test]
    fn test_parse_h256_rejects_non_hex() {
        let result = parse_h256(
            "0xzze96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
        );
        assert!(matches!(result, Err(EncodingError::InvalidHex(_))));
    }

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x112a880").unwrap(), 18_000_000);
        assert_eq!(parse_hex_u64("0x0").unwrap(), 0);
        assert_eq!(parse_hex_u64("0xffffffffffffffff").unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_hex_u64_rejects_overflow() {
        let result = parse_hex_u64("0x1ffffffffffffffff");
        assert!(matches!(result, Err(EncodingError::QuantityOutOfRange(_))));
    }

    #[test]
    fn test_parse_hex_u64_rejects_empty() {
        assert!(parse_hex_u64("0x").is_err());
    }

    #[test]
    fn test_h256_round_trip_is_lowercase_prefixed() {
        let hex_str = "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6";
        let parsed = parse_h256(&hex_str.to_uppercase().replace("0X", "0x")).unwrap();
        assert_eq!(h256_to_hex(&parsed), hex_str);
    }
}
