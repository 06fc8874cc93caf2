#![warn(missing_docs)]

//! WebAuthn P-256 assertion handling for passkey-controlled Soroban accounts.
//!
//! A passkey signs with ECDSA over P-256 and hands back an assertion:
//! authenticator data, `clientDataJSON` and a DER signature, all base64url
//! encoded. On-chain verifiers want something stricter: a fixed-size
//! compact signature with `s` in the lower half of the curve order, and a
//! stable identifier for the passkey that signed. This crate provides:
//!
//! - [`DeviceId`]: `SHA-256(salt || credential_id)`, derived with a
//!   [`DeviceIdSalt`]
//! - [`normalize_der_signature`]: DER to 64-byte low-S [`CompactSignature`]
//! - [`assemble_signature`]: the four-field [`WebAuthnSignatureArgument`]
//!   plus every intermediate value
//! - [`PasskeyVerifier`]: the same P-256 check the contract makes, off-chain

mod error;
pub use error::*;

mod device;
pub use device::*;

mod signature;
pub use signature::*;

mod assertion;
pub use assertion::*;

mod payload;
pub use payload::*;

mod verifier;
pub use verifier::*;
