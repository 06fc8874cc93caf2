//! Off-chain P-256 verification of assembled signatures.
//!
//! Mirrors the check the verifier contract performs, so a bridge can reject
//! a bad assertion before paying for a simulation:
//! 1. Compute `authenticatorData || SHA-256(clientDataJSON)` as the signed message
//! 2. Verify the compact low-S signature over that message

use crate::{AssembledSignature, CredentialError, WebAuthnSignatureArgument};
use p256::ecdsa::signature::Verifier as _;
use sha2::{Digest, Sha256};

/// A passkey's P-256 public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasskeyVerifier {
    key: p256::ecdsa::VerifyingKey,
}

impl PasskeyVerifier {
    /// Create a verifier from SEC1 bytes (33-byte compressed or 65-byte
    /// uncompressed point).
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidPublicKey`] if the bytes are not a
    /// point on P-256.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CredentialError> {
        let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|error| CredentialError::InvalidPublicKey(error.to_string()))?;
        Ok(Self { key })
    }

    /// Get the inner P-256 verifying key.
    #[must_use]
    pub const fn verifying_key(&self) -> &p256::ecdsa::VerifyingKey {
        &self.key
    }

    /// The uncompressed SEC1 public key (65 bytes), the form stored on-chain.
    #[must_use]
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.key.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Verify an assembled signature.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::VerificationFailed`] if the signature does
    /// not cover the WebAuthn payload under this key.
    pub fn verify(&self, assembled: &AssembledSignature) -> Result<(), CredentialError> {
        self.verify_message(&assembled.webauthn_payload, &assembled.argument)
    }

    /// Verify a bare contract argument, recomputing the WebAuthn payload.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::VerificationFailed`] if the signature does
    /// not verify.
    pub fn verify_argument(&self, argument: &WebAuthnSignatureArgument) -> Result<(), CredentialError> {
        let client_data_hash = Sha256::digest(&argument.client_data_json);
        let mut signed_data = Vec::with_capacity(argument.authenticator_data.len() + 32);
        signed_data.extend_from_slice(&argument.authenticator_data);
        signed_data.extend_from_slice(&client_data_hash);
        self.verify_message(&signed_data, argument)
    }

    fn verify_message(
        &self,
        message: &[u8],
        argument: &WebAuthnSignatureArgument,
    ) -> Result<(), CredentialError> {
        let signature = argument.signature.to_ecdsa()?;
        self.key
            .verify(message, &signature)
            .map_err(|error| CredentialError::VerificationFailed(error.to_string()))?;
        tracing::trace!(device_id = %argument.device_id, "passkey signature verified");
        Ok(())
    }
}
