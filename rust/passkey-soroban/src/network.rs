//! Stellar networks, identified by passphrase.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Cow;

/// A Stellar network.
///
/// Everything signed for a network commits to `SHA-256(passphrase)`, so a
/// payload built for testnet never verifies on the public network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    passphrase: Cow<'static, str>,
}

impl Network {
    /// The public network.
    pub const PUBLIC: Network = Network::from_static("Public Global Stellar Network ; September 2015");

    /// The SDF test network.
    pub const TESTNET: Network = Network::from_static("Test SDF Network ; September 2015");

    /// The SDF future network.
    pub const FUTURENET: Network = Network::from_static("Test SDF Future Network ; October 2022");

    const fn from_static(passphrase: &'static str) -> Self {
        Self {
            passphrase: Cow::Borrowed(passphrase),
        }
    }

    /// A network with a custom passphrase, e.g. a standalone quickstart.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: Cow::Owned(passphrase.into()),
        }
    }

    /// The network passphrase.
    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// `SHA-256(passphrase)`.
    #[must_use]
    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }

    pub(crate) fn network_id_hash(&self) -> stellar_xdr::curr::Hash {
        stellar_xdr::curr::Hash(self.network_id())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::TESTNET
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.passphrase)
    }
}
