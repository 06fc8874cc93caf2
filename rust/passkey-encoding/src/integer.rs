//! Unsigned big-endian integers of arbitrary width.
//!
//! ASN.1 encodes integers in the minimum number of two's-complement bytes, so
//! a 256-bit value can arrive as anything from one to 33 bytes (the extra byte
//! being a `0x00` that keeps the sign bit clear). Consumers such as curve
//! arithmetic want the canonical fixed-width form instead.

use crate::EncodingError;

/// Strip leading zero bytes from a big-endian integer.
///
/// The result is empty when the value is zero.
#[must_use]
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Interpret `bytes` as an unsigned big-endian integer and return it in
/// fixed-width `N`-byte big-endian form.
///
/// Leading zero bytes are ignored and the value is left-padded with zeros.
/// An empty buffer is zero.
///
/// # Errors
///
/// Returns [`EncodingError::IntegerOverflow`] if the value needs more than
/// `N` bytes.
pub fn be_bytes_to_uint<const N: usize>(bytes: &[u8]) -> Result<[u8; N], EncodingError> {
    let significant = trim_leading_zeros(bytes);
    if significant.len() > N {
        return Err(EncodingError::IntegerOverflow {
            width: N,
            significant: significant.len(),
        });
    }

    let mut fixed = [0u8; N];
    fixed[N - significant.len()..].copy_from_slice(significant);
    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_zero() {
        assert_eq!(be_bytes_to_uint::<4>(&[]).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn left_pads_short_values() {
        assert_eq!(be_bytes_to_uint::<4>(&[0x12, 0x34]).unwrap(), [0, 0, 0x12, 0x34]);
    }

    #[test]
    fn absorbs_sign_padding() {
        let mut der_integer = vec![0x00];
        der_integer.extend_from_slice(&[0xff; 32]);
        assert_eq!(be_bytes_to_uint::<32>(&der_integer).unwrap(), [0xff; 32]);
    }

    #[test]
    fn rejects_values_wider_than_the_target() {
        let result = be_bytes_to_uint::<2>(&[0x01, 0x00, 0x00]);
        assert_eq!(
            result,
            Err(EncodingError::IntegerOverflow {
                width: 2,
                significant: 3
            })
        );
    }

    #[test]
    fn trims_only_leading_zeros() {
        assert_eq!(trim_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert!(trim_leading_zeros(&[0, 0]).is_empty());
    }
}
