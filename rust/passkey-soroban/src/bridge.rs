//! The signing pipeline from WebAuthn assertion to authorized transaction.

use crate::{
    BridgeSettings, NotApplicableReason, PreimageOutcome, SignaturePayload, SorobanError,
    attach_signature, build_signature_payload, signature_argument_to_sc_val,
};
use passkey_credentials::{
    AssembledSignature, AssertionResponse, DeviceId, DeviceIdInput, assemble_signature,
};
use stellar_xdr::curr::{ScVal, TransactionEnvelope};

/// A passkey signature written into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAuthorization {
    /// The payload the passkey signed.
    pub payload: SignaturePayload,
    /// The assembled signature that was attached.
    pub signature: AssembledSignature,
}

/// Result of [`PasskeyBridge::sign_envelope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutcome {
    /// The transaction needs no passkey signature and was left untouched.
    NotApplicable(NotApplicableReason),
    /// The signature was attached.
    Signed(Box<SignedAuthorization>),
}

/// Turns WebAuthn assertions into Soroban authorization signatures for one
/// deployment.
#[derive(Debug, Clone)]
pub struct PasskeyBridge {
    settings: BridgeSettings,
}

impl PasskeyBridge {
    /// Create a bridge.
    #[must_use]
    pub fn new(settings: BridgeSettings) -> Self {
        Self { settings }
    }

    /// Create a bridge configured from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SorobanError::Settings`] if the device ID salt is not set.
    pub fn from_env() -> Result<Self, SorobanError> {
        Ok(Self::new(BridgeSettings::from_env()?))
    }

    /// The bridge's settings.
    #[must_use]
    pub const fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Derive the device ID of a base64url credential ID.
    ///
    /// # Errors
    ///
    /// Returns [`SorobanError::Credential`] if the credential ID is not
    /// base64url.
    pub fn device_id(&self, credential_id: &str) -> Result<DeviceId, SorobanError> {
        Ok(DeviceId::derive(credential_id, &self.settings.device_id_salt)?)
    }

    /// Compute the payload a passkey must sign for `envelope`.
    ///
    /// # Errors
    ///
    /// See [`build_signature_payload`].
    pub fn signature_payload(&self, envelope: &TransactionEnvelope) -> Result<PreimageOutcome, SorobanError> {
        build_signature_payload(envelope, &self.settings.network)
    }

    /// Assemble an assertion into a contract argument.
    ///
    /// # Errors
    ///
    /// Returns [`SorobanError::Credential`] if the assertion is malformed and
    /// [`SorobanError::Xdr`] if it cannot be encoded.
    pub fn signature_argument(
        &self,
        assertion: &AssertionResponse,
        device_id: impl Into<DeviceIdInput>,
    ) -> Result<(AssembledSignature, ScVal), SorobanError> {
        let assembled = assemble_signature(assertion, device_id)?;
        let value = signature_argument_to_sc_val(&assembled.argument)?;
        Ok((assembled, value))
    }

    /// Sign `envelope`'s address authorization with `assertion`.
    ///
    /// The assertion's challenge must be the transaction's signature
    /// payload; an assertion made for an earlier nonce or expiration is
    /// rejected here instead of on submission. The device ID is derived from
    /// the assertion's credential ID.
    ///
    /// # Errors
    ///
    /// Returns [`SorobanError::Credential`] with
    /// [`ChallengeMismatch`](passkey_credentials::CredentialError::ChallengeMismatch)
    /// or [`MissingChallenge`](passkey_credentials::CredentialError::MissingChallenge)
    /// for a stale assertion, and otherwise as the individual steps.
    pub fn sign_envelope(
        &self,
        envelope: &mut TransactionEnvelope,
        assertion: &AssertionResponse,
    ) -> Result<SignOutcome, SorobanError> {
        let payload = match self.signature_payload(envelope)? {
            PreimageOutcome::NotApplicable(reason) => return Ok(SignOutcome::NotApplicable(reason)),
            PreimageOutcome::Ready(payload) => payload,
        };

        let device_id = self.device_id(&assertion.id)?;
        let (signature, value) = self.signature_argument(assertion, device_id)?;
        signature.verify_challenge(payload.hash())?;
        attach_signature(envelope, value)?;

        tracing::debug!(
            payload = %payload.hash_hex(),
            device_id = %device_id,
            "attached passkey signature"
        );
        Ok(SignOutcome::Signed(Box::new(SignedAuthorization { payload, signature })))
    }
}
