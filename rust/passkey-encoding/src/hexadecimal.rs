//! Hex helpers for identifiers that are stored or compared as text.

use crate::EncodingError;

/// Encode bytes as lowercase hex.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into bytes.
///
/// Either case is accepted, as is a leading `0x`.
///
/// # Errors
///
/// Returns [`EncodingError::InvalidHex`] for odd-length input or non-hex
/// characters.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, EncodingError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(digits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_lowercase() {
        assert_eq!(bytes_to_hex(&[0xab, 0x01]), "ab01");
    }

    #[test]
    fn decodes_mixed_case_and_prefix() {
        assert_eq!(hex_to_bytes("AB01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(hex_to_bytes("0xab01").unwrap(), vec![0xab, 0x01]);
    }

    #[test]
    fn rejects_odd_length() {
        assert!(matches!(
            hex_to_bytes("abc"),
            Err(EncodingError::InvalidHex(_))
        ));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(matches!(
            hex_to_bytes("zz"),
            Err(EncodingError::InvalidHex(_))
        ));
    }
}
