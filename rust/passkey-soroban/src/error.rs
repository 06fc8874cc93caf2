use crate::SettingsError;
use passkey_credentials::CredentialError;
use thiserror::Error;

/// Errors from building Soroban signature payloads and arguments.
///
/// A transaction that simply needs no passkey signature is not an error;
/// see [`PreimageOutcome::NotApplicable`](crate::PreimageOutcome::NotApplicable).
#[derive(Debug, Error)]
pub enum SorobanError {
    /// XDR encoding or decoding failed, or a value exceeded an XDR length
    /// limit.
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    /// The transaction carries more than one `InvokeHostFunction`
    /// operation, so there is no single authorization to sign.
    #[error("expected one InvokeHostFunction operation, found {count}")]
    MultipleInvocations {
        /// Number of invoke operations found.
        count: usize,
    },

    /// There is no address-credential authorization entry to attach a
    /// signature to.
    #[error("transaction has no address authorization entry")]
    NoAddressAuthorization,

    /// The WebAuthn assertion could not be turned into a signature.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Bridge settings are incomplete.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
