//! Property tests for the transport encodings.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use passkey_encoding::{
    EncodingError, base64url_to_bytes, be_bytes_to_uint, bytes_to_base64url, bytes_to_hex,
    hex_to_bytes,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use testresult::TestResult;

proptest! {
    #[test]
    fn base64url_roundtrips_unpadded(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = bytes_to_base64url(&bytes);
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(base64url_to_bytes(&encoded).unwrap(), bytes);
    }

    #[test]
    fn base64url_roundtrips_padded(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let encoded = URL_SAFE.encode(&bytes);
        prop_assert_eq!(base64url_to_bytes(&encoded).unwrap(), bytes);
    }

    #[test]
    fn hex_roundtrips(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(hex_to_bytes(&bytes_to_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn leading_zeros_do_not_change_the_value(
        value in proptest::collection::vec(any::<u8>(), 0..=32),
        padding in 0usize..4,
    ) {
        let mut padded = vec![0u8; padding];
        padded.extend_from_slice(&value);
        prop_assert_eq!(
            be_bytes_to_uint::<32>(&padded).unwrap(),
            be_bytes_to_uint::<32>(&value).unwrap()
        );
    }
}

#[test]
fn credential_id_from_a_browser_decodes() -> TestResult {
    // 16 random bytes as Chrome reports them in `PublicKeyCredential.id`
    let id = "kZ3bJb0B-_hG7C1MNn0nGA";
    let bytes = base64url_to_bytes(id)?;
    assert_eq!(bytes.len(), 16);
    assert_eq!(bytes_to_base64url(&bytes), id);
    Ok(())
}

#[test]
fn malformed_base64_reports_the_decoding_error() {
    let error = base64url_to_bytes("not base64!").unwrap_err();
    assert!(matches!(error, EncodingError::InvalidBase64(_)));
    assert!(error.to_string().starts_with("Failed to decode base64"));
}
