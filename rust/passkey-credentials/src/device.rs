//! Device identifiers derived from WebAuthn credential IDs.
//!
//! A device ID binds a passkey to an on-chain account record:
//!
//! ```text
//! device_id = SHA-256(salt || credential_id_bytes)
//! ```
//!
//! The salt is application configuration. It is passed explicitly to every
//! derivation; changing it changes every identifier derived from it, so a
//! deployment must keep it stable for as long as its credentials live.

use crate::CredentialError;
use passkey_encoding::{base64url_to_bytes, bytes_to_hex, hex_to_bytes};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Size of a [`DeviceId`] in bytes.
pub const DEVICE_ID_SIZE: usize = 32;

/// The salt mixed into every device ID derivation.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub struct DeviceIdSalt(Vec<u8>);

impl DeviceIdSalt {
    /// Create a salt from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The salt bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for DeviceIdSalt {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for DeviceIdSalt {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for DeviceIdSalt {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for DeviceIdSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DeviceIdSalt({} bytes)", self.0.len())
    }
}

/// A 32-byte identifier for a passkey, derived from its credential ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId([u8; DEVICE_ID_SIZE]);

impl DeviceId {
    /// Derive the device ID for a base64url credential ID.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Decode`] if `credential_id` is not valid
    /// base64url.
    pub fn derive(credential_id: &str, salt: &DeviceIdSalt) -> Result<Self, CredentialError> {
        let credential = base64url_to_bytes(credential_id).map_err(CredentialError::decode("id"))?;
        let device_id = Self::from_credential_bytes(&credential, salt);
        tracing::debug!(device_id = %device_id, "derived device ID");
        Ok(device_id)
    }

    /// Derive the device ID for an already decoded credential ID.
    #[must_use]
    pub fn from_credential_bytes(credential: &[u8], salt: &DeviceIdSalt) -> Self {
        let digest = Sha256::new()
            .chain_update(salt.as_bytes())
            .chain_update(credential)
            .finalize();
        Self(digest.into())
    }

    /// Parse a hex-encoded device ID.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Decode`] for malformed hex and
    /// [`CredentialError::InvalidDeviceId`] if it does not decode to 32 bytes.
    pub fn from_hex(value: &str) -> Result<Self, CredentialError> {
        let bytes = hex_to_bytes(value).map_err(CredentialError::decode("device ID"))?;
        Self::try_from(bytes.as_slice())
    }

    /// The raw identifier bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DEVICE_ID_SIZE] {
        &self.0
    }

    /// Lowercase hex form, as stored by the persistence layer.
    #[must_use]
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl From<[u8; DEVICE_ID_SIZE]> for DeviceId {
    fn from(value: [u8; DEVICE_ID_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for DeviceId {
    type Error = CredentialError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; DEVICE_ID_SIZE] =
            value
                .try_into()
                .map_err(|_| CredentialError::InvalidDeviceId {
                    length: value.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for DeviceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for DeviceId {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DeviceId({})", self.to_hex())
    }
}

impl Serialize for DeviceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}
