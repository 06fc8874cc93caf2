//! Signing a transaction end to end with a software passkey.

mod common;

use common::*;
use p256::ecdsa::{Signature, SigningKey, signature::Signer};
use passkey_credentials::{
    AssertionResponse, AuthenticatorAssertion, CredentialError, DeviceId, DeviceIdSalt,
    PasskeyVerifier,
};
use passkey_encoding::bytes_to_base64url;
use passkey_soroban::xdr::ScVal;
use passkey_soroban::{
    BridgeSettings, Network, NotApplicableReason, PasskeyBridge, PreimageOutcome, SignOutcome,
    SorobanError, signature_argument_to_sc_val,
};
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};
use testresult::TestResult;

const CREDENTIAL_ID: &str = "kZ3bJb0B-_hG7C1MNn0nGA";
const SALT: &str = "passkey-kit";

fn bridge() -> PasskeyBridge {
    PasskeyBridge::new(BridgeSettings::new(SALT, Network::TESTNET))
}

fn passkey() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32].into()).unwrap()
}

/// What a browser returns from `navigator.credentials.get()` with
/// `challenge` on a device holding `key`.
fn assertion(key: &SigningKey, challenge: &[u8]) -> AssertionResponse {
    let mut authenticator_data = Sha256::digest(b"passkey.example").to_vec();
    authenticator_data.push(0x05);
    authenticator_data.extend_from_slice(&7u32.to_be_bytes());

    let client_data_json = format!(
        r#"{{"type":"webauthn.get","challenge":"{}","origin":"https://passkey.example"}}"#,
        bytes_to_base64url(challenge)
    );

    let mut message = authenticator_data.clone();
    message.extend_from_slice(&Sha256::digest(client_data_json.as_bytes()));
    let signature: Signature = key.sign(&message);

    AssertionResponse {
        id: CREDENTIAL_ID.into(),
        raw_id: Some(CREDENTIAL_ID.into()),
        credential_type: Some("public-key".into()),
        response: AuthenticatorAssertion {
            authenticator_data: bytes_to_base64url(&authenticator_data),
            client_data_json: bytes_to_base64url(client_data_json.as_bytes()),
            signature: bytes_to_base64url(signature.to_der().as_bytes()),
            user_handle: None,
        },
    }
}

#[test_log::test]
fn signs_a_transfer_authorization() -> TestResult {
    let bridge = bridge();
    let mut envelope = transfer_envelope();

    let PreimageOutcome::Ready(payload) = bridge.signature_payload(&envelope)? else {
        panic!("transfer needs a passkey signature");
    };
    let key = passkey();
    let assertion = assertion(&key, payload.hash());

    let SignOutcome::Signed(signed) = bridge.sign_envelope(&mut envelope, &assertion)? else {
        panic!("expected the envelope to be signed");
    };

    assert_eq!(signed.payload, payload);
    assert_eq!(
        signed.signature.argument.device_id,
        DeviceId::derive(CREDENTIAL_ID, &DeviceIdSalt::from(SALT))?
    );
    assert_eq!(
        attached_signature(&envelope),
        Some(signature_argument_to_sc_val(&signed.signature.argument)?)
    );

    // The credential signature is not part of the preimage.
    assert_eq!(bridge.signature_payload(&envelope)?, PreimageOutcome::Ready(payload));

    let verifier = PasskeyVerifier::from_sec1_bytes(key.verifying_key().to_encoded_point(false).as_bytes())?;
    verifier.verify(&signed.signature)?;
    Ok(())
}

#[test]
fn stale_assertion_is_rejected_before_attaching() -> TestResult {
    let bridge = bridge();
    let mut envelope = transfer_envelope();
    let assertion = assertion(&passkey(), &[0u8; 32]);

    let result = bridge.sign_envelope(&mut envelope, &assertion);
    assert!(matches!(
        result,
        Err(SorobanError::Credential(CredentialError::ChallengeMismatch))
    ));
    assert_eq!(attached_signature(&envelope), Some(ScVal::Void));
    Ok(())
}

#[test]
fn envelopes_without_address_credentials_are_left_alone() -> TestResult {
    let bridge = bridge();
    let mut envelope = envelope(vec![invoke(vec![source_account_entry()])]);
    let before = envelope.clone();

    let outcome = bridge.sign_envelope(&mut envelope, &assertion(&passkey(), &[0u8; 32]))?;
    assert_eq!(
        outcome,
        SignOutcome::NotApplicable(NotApplicableReason::SourceAccountCredentials)
    );
    assert_eq!(envelope, before);
    Ok(())
}

#[test]
fn attaching_without_an_address_entry_fails() {
    let mut envelope = envelope(vec![inflation()]);
    assert!(matches!(
        passkey_soroban::attach_signature(&mut envelope, ScVal::Void),
        Err(SorobanError::NoAddressAuthorization)
    ));
}

#[test]
fn settings_errors_surface_through_the_bridge() {
    let error = BridgeSettings::from_lookup(|_| None).map(PasskeyBridge::new);
    assert!(matches!(error, Err(passkey_soroban::SettingsError::Missing(_))));

    let error: SorobanError = passkey_soroban::SettingsError::Missing("PASSKEY_DEVICE_ID_SALT").into();
    assert_eq!(
        error.to_string(),
        "missing required setting PASSKEY_DEVICE_ID_SALT"
    );
}

#[test]
fn signature_argument_accepts_a_stored_hex_device_id() -> TestResult {
    let bridge = bridge();
    let device_id = bridge.device_id(CREDENTIAL_ID)?;
    let assertion = assertion(&passkey(), &[1u8; 32]);

    let (from_hex, value_from_hex) = bridge.signature_argument(&assertion, device_id.to_hex())?;
    let (from_id, value_from_id) = bridge.signature_argument(&assertion, device_id)?;

    assert_eq!(from_hex.argument, from_id.argument);
    assert_eq!(value_from_hex, value_from_id);
    Ok(())
}
