//! Bridge configuration.

use crate::Network;
use passkey_credentials::DeviceIdSalt;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the device ID salt.
pub const DEVICE_ID_SALT_VAR: &str = "PASSKEY_DEVICE_ID_SALT";

/// Environment variable holding the network passphrase.
pub const NETWORK_PASSPHRASE_VAR: &str = "STELLAR_NETWORK_PASSPHRASE";

/// Errors from loading [`BridgeSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A required setting is absent or empty.
    #[error("missing required setting {0}")]
    Missing(&'static str),
}

/// Everything a [`PasskeyBridge`](crate::PasskeyBridge) needs to know about
/// its deployment.
///
/// Changing `device_id_salt` changes every device ID derived from it, which
/// orphans the on-chain records of existing passkeys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeSettings {
    /// Salt for [`DeviceId::derive`](passkey_credentials::DeviceId::derive).
    pub device_id_salt: DeviceIdSalt,
    /// The network transactions are signed for. Defaults to testnet.
    #[serde(default)]
    pub network: Network,
}

impl BridgeSettings {
    /// Create settings from explicit values.
    pub fn new(device_id_salt: impl Into<DeviceIdSalt>, network: Network) -> Self {
        Self {
            device_id_salt: device_id_salt.into(),
            network,
        }
    }

    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] if [`DEVICE_ID_SALT_VAR`] is unset
    /// or empty.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] if [`DEVICE_ID_SALT_VAR`] has no
    /// non-empty value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let salt = lookup(DEVICE_ID_SALT_VAR)
            .filter(|salt| !salt.is_empty())
            .ok_or(SettingsError::Missing(DEVICE_ID_SALT_VAR))?;
        let network = lookup(NETWORK_PASSPHRASE_VAR)
            .filter(|passphrase| !passphrase.is_empty())
            .map(Network::new)
            .unwrap_or_default();

        tracing::debug!(network = %network, "loaded bridge settings");
        Ok(Self::new(salt, network))
    }
}
