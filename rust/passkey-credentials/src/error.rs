//! Error types for passkey credential operations.

use passkey_encoding::EncodingError;
use thiserror::Error;

/// Errors from decoding, normalizing and assembling WebAuthn assertions.
///
/// None of these are transient. A caller that receives one should treat the
/// assertion (or the configuration that produced it) as unusable rather than
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// A base64url or hex field of the assertion could not be decoded.
    #[error("failed to decode {field}: {source}")]
    Decode {
        /// Name of the offending field, e.g. `"authenticatorData"`.
        field: &'static str,
        /// The underlying decoding failure.
        source: EncodingError,
    },

    /// The DER signature violates the `SEQUENCE { INTEGER r, INTEGER s }`
    /// grammar, or carries scalars outside the curve order.
    ///
    /// This points at a corrupted assertion or a tampered payload; it is not
    /// worth retrying.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// A device identifier is not exactly 32 bytes.
    #[error("invalid device ID: expected 32 bytes, got {length}")]
    InvalidDeviceId {
        /// The length that was supplied.
        length: usize,
    },

    /// A compact signature is not exactly 64 bytes.
    #[error("invalid signature length: expected 64 bytes, got {length}")]
    InvalidSignatureLength {
        /// The length that was supplied.
        length: usize,
    },

    /// The `clientDataJSON` is not UTF-8 JSON of the expected shape.
    #[error("invalid clientDataJSON: {0}")]
    InvalidClientData(String),

    /// The `clientDataJSON` carries no challenge to compare against.
    #[error("clientDataJSON has no challenge")]
    MissingChallenge,

    /// The challenge in `clientDataJSON` differs from the expected payload.
    #[error("challenge mismatch")]
    ChallengeMismatch,

    /// The public key is not a valid SEC1-encoded P-256 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The compact signature does not verify against the WebAuthn payload.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),
}

impl CredentialError {
    pub(crate) fn decode(field: &'static str) -> impl FnOnce(EncodingError) -> Self {
        move |source| Self::Decode { field, source }
    }
}
