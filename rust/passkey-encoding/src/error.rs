use thiserror::Error;

/// Errors that can occur while decoding transport encodings.
///
/// Every variant is a deterministic function of its input: retrying with the
/// same bytes will fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// The input is not valid base64 once the url-safe alphabet has been
    /// mapped onto the standard one.
    ///
    /// This covers characters outside the alphabet, impossible lengths
    /// (`len % 4 == 1`) and misplaced padding.
    #[error("Failed to decode base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The input is not an even-length string of hexadecimal digits.
    #[error("Failed to decode hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A big-endian integer does not fit into the requested width.
    ///
    /// `significant` is the number of bytes left once leading zero bytes have
    /// been stripped.
    #[error("Integer of {significant} significant bytes does not fit into {width} bytes")]
    IntegerOverflow {
        /// The requested output width in bytes.
        width: usize,
        /// The number of significant input bytes.
        significant: usize,
    },
}

// `hex::FromHexError` has no `Eq`, but every variant compares totally.
impl Eq for EncodingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_errors_compare_by_value() {
        let error = EncodingError::from(hex::FromHexError::OddLength);
        assert_eq!(error, error.clone());
        assert_ne!(error, EncodingError::from(hex::FromHexError::InvalidStringLength));
    }
}
