//! Base64url (RFC 4648 §5) conversion.
//!
//! Browsers serialize `PublicKeyCredential` fields with the url-safe alphabet
//! and no padding, but values that went through other tooling may carry
//! padding or even the standard alphabet. Decoding is therefore lenient about
//! both, while encoding always produces the canonical unpadded form.

use crate::EncodingError;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

/// Decode a base64url string into bytes.
///
/// The url-safe characters are mapped onto the standard alphabet (`-` to
/// `+`, `_` to `/`), the string is padded with `=` to a multiple of four
/// characters, and the result is decoded as standard base64. Already padded
/// input passes through unchanged.
///
/// # Errors
///
/// Returns [`EncodingError::InvalidBase64`] if the input contains characters
/// outside the alphabet or has an impossible length.
pub fn base64url_to_bytes(value: &str) -> Result<Vec<u8>, EncodingError> {
    let mut standard: String = value
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let remainder = standard.len() % 4;
    if remainder != 0 {
        standard.extend(std::iter::repeat_n('=', 4 - remainder));
    }

    Ok(STANDARD.decode(standard)?)
}

/// Encode bytes as unpadded base64url.
#[must_use]
pub fn bytes_to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
