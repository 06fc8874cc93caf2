#![warn(missing_docs)]

//! Passkey Soroban - signing Soroban authorization entries with WebAuthn
//! passkeys
//!
//! A smart-wallet contract whose signer is a passkey authorizes calls
//! through address credentials. For each such credential the bridge:
//!
//! 1. builds the authorization preimage and its SHA-256 signature payload
//!    ([`build_signature_payload`]), which the front end passes to
//!    `navigator.credentials.get()` as the challenge;
//! 2. turns the resulting assertion into the contract's signature argument,
//!    a `Map<Symbol, Bytes>` ([`signature_argument_to_sc_val`]);
//! 3. writes it into the entry's credentials ([`attach_signature`]).
//!
//! [`PasskeyBridge`] runs the three steps for a configured deployment.
//!
//! # Basic Usage
//!
//! ```rust
//! use passkey_soroban::{BridgeSettings, Network, PasskeyBridge};
//!
//! let bridge = PasskeyBridge::new(BridgeSettings::new("deployment salt", Network::TESTNET));
//! let device_id = bridge.device_id("kZ3bJb0B-_hG7C1MNn0nGA").unwrap();
//! assert_eq!(device_id.to_hex().len(), 64);
//! ```

mod error;
pub use error::*;

mod network;
pub use network::*;

mod settings;
pub use settings::*;

mod authorization;
pub use authorization::{AddressAuthorization, AuthorizationLookup, NotApplicableReason};

mod preimage;
pub use preimage::*;

mod argument;
pub use argument::*;

mod bridge;
pub use bridge::*;

pub use stellar_xdr::curr as xdr;
