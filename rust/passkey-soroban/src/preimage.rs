//! Soroban authorization preimages and the payloads passkeys sign.
//!
//! The host verifies an address credential by recomputing
//!
//! ```text
//! payload = SHA-256(XDR(HashIdPreimage::SorobanAuthorization {
//!     network_id: SHA-256(passphrase),
//!     nonce,
//!     signature_expiration_ledger,
//!     invocation: root_invocation,
//! }))
//! ```
//!
//! and handing `payload` to the account contract's `__check_auth`. The
//! passkey must sign exactly that value, so it becomes the WebAuthn
//! challenge.

use crate::{AddressAuthorization, AuthorizationLookup, Network, NotApplicableReason, SorobanError};
use passkey_encoding::bytes_to_hex;
use sha2::{Digest, Sha256};
use stellar_xdr::curr::{
    HashIdPreimage, HashIdPreimageSorobanAuthorization, Limits, ReadXdr, TransactionEnvelope,
    WriteXdr,
};

/// The value an authorization entry's signature must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignaturePayload {
    hash: [u8; 32],
    nonce: i64,
    signature_expiration_ledger: u32,
}

impl SignaturePayload {
    /// The 32-byte payload hash.
    #[must_use]
    pub const fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// The payload hash as lowercase hex.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        bytes_to_hex(&self.hash)
    }

    /// The entry's nonce.
    #[must_use]
    pub const fn nonce(&self) -> i64 {
        self.nonce
    }

    /// The entry's signature expiration ledger.
    #[must_use]
    pub const fn signature_expiration_ledger(&self) -> u32 {
        self.signature_expiration_ledger
    }

    /// The nonce in decimal, for audit records.
    #[must_use]
    pub fn nonce_decimal(&self) -> String {
        self.nonce.to_string()
    }

    /// The signature expiration ledger in decimal, for audit records.
    #[must_use]
    pub fn signature_expiration_ledger_decimal(&self) -> String {
        self.signature_expiration_ledger.to_string()
    }
}

impl AsRef<[u8]> for SignaturePayload {
    fn as_ref(&self) -> &[u8] {
        &self.hash
    }
}

/// Result of computing a signature payload for a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreimageOutcome {
    /// The transaction needs no passkey signature.
    NotApplicable(NotApplicableReason),
    /// The payload to sign.
    Ready(SignaturePayload),
}

impl PreimageOutcome {
    /// The payload, if there is one.
    #[must_use]
    pub fn ready(self) -> Option<SignaturePayload> {
        match self {
            Self::Ready(payload) => Some(payload),
            Self::NotApplicable(_) => None,
        }
    }
}

/// Build the `HashIdPreimage` for an authorization on `network`.
#[must_use]
pub fn authorization_preimage(authorization: &AddressAuthorization, network: &Network) -> HashIdPreimage {
    HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
        network_id: network.network_id_hash(),
        nonce: authorization.nonce,
        signature_expiration_ledger: authorization.signature_expiration_ledger,
        invocation: authorization.root_invocation.clone(),
    })
}

/// Hash the preimage of an authorization on `network`.
///
/// # Errors
///
/// Returns [`SorobanError::Xdr`] if the invocation tree cannot be encoded.
pub fn hash_authorization(
    authorization: &AddressAuthorization,
    network: &Network,
) -> Result<SignaturePayload, SorobanError> {
    let preimage = authorization_preimage(authorization, network).to_xdr(Limits::none())?;
    let hash: [u8; 32] = Sha256::digest(&preimage).into();
    tracing::trace!(preimage_len = preimage.len(), "encoded authorization preimage");

    Ok(SignaturePayload {
        hash,
        nonce: authorization.nonce,
        signature_expiration_ledger: authorization.signature_expiration_ledger,
    })
}

/// Compute the payload a passkey must sign for `envelope` on `network`.
///
/// # Errors
///
/// Returns [`SorobanError::MultipleInvocations`] for transactions with more
/// than one invoke operation and [`SorobanError::Xdr`] if encoding fails.
pub fn build_signature_payload(
    envelope: &TransactionEnvelope,
    network: &Network,
) -> Result<PreimageOutcome, SorobanError> {
    match AddressAuthorization::locate(envelope)? {
        AuthorizationLookup::NotApplicable(reason) => {
            tracing::debug!(%reason, "no passkey signature needed");
            Ok(PreimageOutcome::NotApplicable(reason))
        }
        AuthorizationLookup::Found(authorization) => {
            let payload = hash_authorization(&authorization, network)?;
            tracing::debug!(
                payload = %payload.hash_hex(),
                nonce = %payload.nonce_decimal(),
                signature_expiration_ledger = %payload.signature_expiration_ledger_decimal(),
                network = %network,
                "built signature payload"
            );
            Ok(PreimageOutcome::Ready(payload))
        }
    }
}

/// [`build_signature_payload`] for a base64 XDR transaction envelope.
///
/// # Errors
///
/// Returns [`SorobanError::Xdr`] if `envelope_xdr` is not a valid envelope,
/// otherwise as [`build_signature_payload`].
pub fn build_signature_payload_from_xdr(
    envelope_xdr: &str,
    network: &Network,
) -> Result<PreimageOutcome, SorobanError> {
    let envelope = TransactionEnvelope::from_xdr_base64(envelope_xdr, Limits::none())?;
    build_signature_payload(&envelope, network)
}
