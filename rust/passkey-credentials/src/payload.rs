//! Assembly of the WebAuthn signature argument consumed by the on-chain
//! verifier.
//!
//! The verifier contract receives four byte fields and recomputes what the
//! authenticator signed:
//!
//! ```text
//! webauthn_payload = authenticator_data || SHA-256(client_data_json)
//! verify(public_key, SHA-256(webauthn_payload), signature)
//! ```
//!
//! [`assemble_signature`] decodes and normalizes the assertion into that
//! shape and keeps every intermediate value on the result, so callers can
//! log or compare them without recomputation.

use crate::{
    AssertionResponse, ClientData, CompactSignature, CredentialError, DeviceId,
    normalize_der_signature,
};
use sha2::{Digest, Sha256};

/// Names of the argument fields, in the order the contract expects them.
pub const SIGNATURE_ARGUMENT_FIELDS: [&str; 4] = [
    "authenticator_data",
    "client_data_json",
    "device_id",
    "signature",
];

/// A device identifier as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceIdInput {
    /// Raw bytes, validated to be 32 bytes long.
    Raw(Vec<u8>),
    /// A hex string, as stored by the persistence layer.
    Hex(String),
}

impl DeviceIdInput {
    /// Resolve into a [`DeviceId`].
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidDeviceId`] unless the input is
    /// exactly 32 bytes, or [`CredentialError::Decode`] for malformed hex.
    pub fn resolve(&self) -> Result<DeviceId, CredentialError> {
        match self {
            DeviceIdInput::Raw(bytes) => DeviceId::try_from(bytes.as_slice()),
            DeviceIdInput::Hex(hex) => DeviceId::from_hex(hex),
        }
    }
}

impl From<DeviceId> for DeviceIdInput {
    fn from(value: DeviceId) -> Self {
        DeviceIdInput::Raw(value.as_bytes().to_vec())
    }
}

impl From<&DeviceId> for DeviceIdInput {
    fn from(value: &DeviceId) -> Self {
        DeviceIdInput::Raw(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for DeviceIdInput {
    fn from(value: Vec<u8>) -> Self {
        DeviceIdInput::Raw(value)
    }
}

impl From<&[u8]> for DeviceIdInput {
    fn from(value: &[u8]) -> Self {
        DeviceIdInput::Raw(value.to_vec())
    }
}

impl From<&str> for DeviceIdInput {
    fn from(value: &str) -> Self {
        DeviceIdInput::Hex(value.to_owned())
    }
}

impl From<String> for DeviceIdInput {
    fn from(value: String) -> Self {
        DeviceIdInput::Hex(value)
    }
}

/// The four-field argument passed to the verifier contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAuthnSignatureArgument {
    /// Raw authenticator data.
    pub authenticator_data: Vec<u8>,
    /// Raw `clientDataJSON` bytes.
    pub client_data_json: Vec<u8>,
    /// The passkey's device identifier.
    pub device_id: DeviceId,
    /// The canonical compact signature.
    pub signature: CompactSignature,
}

impl WebAuthnSignatureArgument {
    /// The fields as `(name, bytes)` pairs, in [`SIGNATURE_ARGUMENT_FIELDS`]
    /// order.
    pub fn fields(&self) -> [(&'static str, &[u8]); 4] {
        [
            (SIGNATURE_ARGUMENT_FIELDS[0], self.authenticator_data.as_slice()),
            (SIGNATURE_ARGUMENT_FIELDS[1], self.client_data_json.as_slice()),
            (SIGNATURE_ARGUMENT_FIELDS[2], self.device_id.as_ref()),
            (SIGNATURE_ARGUMENT_FIELDS[3], self.signature.as_ref()),
        ]
    }
}

/// A [`WebAuthnSignatureArgument`] together with the values derived while
/// building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledSignature {
    /// The argument for the contract call.
    pub argument: WebAuthnSignatureArgument,
    /// The DER signature exactly as the authenticator returned it.
    pub raw_signature: Vec<u8>,
    /// Parsed `clientDataJSON`.
    pub client_data: ClientData,
    /// The decoded challenge, when `clientDataJSON` has one.
    pub challenge: Option<Vec<u8>>,
    /// `SHA-256(client_data_json)`.
    pub client_data_hash: [u8; 32],
    /// `authenticator_data || client_data_hash`, the message the
    /// authenticator signed.
    pub webauthn_payload: Vec<u8>,
    /// `SHA-256(webauthn_payload)`, the digest the ECDSA signature covers.
    pub webauthn_payload_hash: [u8; 32],
}

impl AssembledSignature {
    /// Check that the assertion's challenge is `expected`.
    ///
    /// For Soroban this is the authorization entry's signature payload; an
    /// assertion made for any other payload will be rejected on-chain.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MissingChallenge`] if `clientDataJSON` has
    /// no challenge and [`CredentialError::ChallengeMismatch`] if it differs.
    pub fn verify_challenge(&self, expected: &[u8]) -> Result<(), CredentialError> {
        match &self.challenge {
            None => Err(CredentialError::MissingChallenge),
            Some(challenge) if challenge.as_slice() == expected => Ok(()),
            Some(_) => Err(CredentialError::ChallengeMismatch),
        }
    }
}

/// Decode, normalize and package a WebAuthn assertion.
///
/// # Errors
///
/// - [`CredentialError::Decode`] naming the field that is not base64url
/// - [`CredentialError::MalformedSignature`] for an invalid DER signature
/// - [`CredentialError::InvalidDeviceId`] unless the device ID is 32 bytes
/// - [`CredentialError::InvalidClientData`] if `clientDataJSON` is not JSON
pub fn assemble_signature(
    assertion: &AssertionResponse,
    device_id: impl Into<DeviceIdInput>,
) -> Result<AssembledSignature, CredentialError> {
    let response = &assertion.response;
    let authenticator_data = response.authenticator_data()?;
    let client_data_json = response.client_data_json()?;
    let raw_signature = response.signature()?;

    let signature = normalize_der_signature(&raw_signature)?;
    let device_id = device_id.into().resolve()?;

    let client_data = ClientData::parse(&client_data_json)?;
    let challenge = client_data.decoded_challenge()?;

    let client_data_hash: [u8; 32] = Sha256::digest(&client_data_json).into();
    let mut webauthn_payload = Vec::with_capacity(authenticator_data.len() + client_data_hash.len());
    webauthn_payload.extend_from_slice(&authenticator_data);
    webauthn_payload.extend_from_slice(&client_data_hash);
    let webauthn_payload_hash: [u8; 32] = Sha256::digest(&webauthn_payload).into();

    tracing::debug!(
        credential_id = %assertion.id,
        device_id = %device_id,
        authenticator_data_len = authenticator_data.len(),
        client_data_json_len = client_data_json.len(),
        "assembled WebAuthn signature argument"
    );

    Ok(AssembledSignature {
        argument: WebAuthnSignatureArgument {
            authenticator_data,
            client_data_json,
            device_id,
            signature,
        },
        raw_signature,
        client_data,
        challenge,
        client_data_hash,
        webauthn_payload,
        webauthn_payload_hash,
    })
}
