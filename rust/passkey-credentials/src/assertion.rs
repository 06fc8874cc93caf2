//! WebAuthn assertion responses as the browser serializes them.
//!
//! `navigator.credentials.get()` resolves to a `PublicKeyCredential` whose
//! binary fields are `ArrayBuffer`s. Front ends send it to the server through
//! `PublicKeyCredential.toJSON()` (or an equivalent helper), which base64url
//! encodes every buffer and keeps the WebAuthn member names:
//!
//! ```json
//! {
//!   "id": "kZ3bJb0B-_hG7C1MNn0nGA",
//!   "rawId": "kZ3bJb0B-_hG7C1MNn0nGA",
//!   "type": "public-key",
//!   "response": {
//!     "authenticatorData": "...",
//!     "clientDataJSON": "...",
//!     "signature": "...",
//!     "userHandle": "..."
//!   }
//! }
//! ```

use crate::CredentialError;
use passkey_encoding::base64url_to_bytes;
use serde::{Deserialize, Serialize};

/// A serialized `PublicKeyCredential` produced by an authentication
/// ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponse {
    /// The base64url credential ID.
    pub id: String,
    /// The same credential ID; some serializers omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
    /// The credential type, `"public-key"` for passkeys.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,
    /// The authenticator's response.
    pub response: AuthenticatorAssertion,
}

/// The `AuthenticatorAssertionResponse` member of an [`AssertionResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorAssertion {
    /// Base64url authenticator data.
    pub authenticator_data: String,
    /// Base64url `clientDataJSON`.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    /// Base64url DER-encoded ECDSA signature.
    pub signature: String,
    /// Base64url user handle, present for discoverable credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

impl AssertionResponse {
    /// Parse an assertion from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidClientData`] if the JSON does not
    /// have the shape of a serialized assertion.
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        serde_json::from_str(json)
            .map_err(|error| CredentialError::InvalidClientData(format!("assertion: {error}")))
    }
}

impl AuthenticatorAssertion {
    /// Decode `authenticatorData`.
    pub fn authenticator_data(&self) -> Result<Vec<u8>, CredentialError> {
        base64url_to_bytes(&self.authenticator_data)
            .map_err(CredentialError::decode("authenticatorData"))
    }

    /// Decode `clientDataJSON`.
    pub fn client_data_json(&self) -> Result<Vec<u8>, CredentialError> {
        base64url_to_bytes(&self.client_data_json).map_err(CredentialError::decode("clientDataJSON"))
    }

    /// Decode the DER signature.
    pub fn signature(&self) -> Result<Vec<u8>, CredentialError> {
        base64url_to_bytes(&self.signature).map_err(CredentialError::decode("signature"))
    }
}

/// The fields of `clientDataJSON` the bridge looks at.
///
/// Unknown members (`crossOrigin`, `topOrigin`, vendor extensions) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    /// `"webauthn.get"` for assertions.
    #[serde(rename = "type", default)]
    pub ceremony: Option<String>,
    /// The base64url challenge the authenticator signed over.
    #[serde(default)]
    pub challenge: Option<String>,
    /// The origin of the page that ran the ceremony.
    #[serde(default)]
    pub origin: Option<String>,
}

impl ClientData {
    /// Parse `clientDataJSON` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidClientData`] if the bytes are not a
    /// UTF-8 JSON object.
    pub fn parse(client_data_json: &[u8]) -> Result<Self, CredentialError> {
        let text = std::str::from_utf8(client_data_json)
            .map_err(|error| CredentialError::InvalidClientData(error.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|error| CredentialError::InvalidClientData(error.to_string()))?;
        if !value.is_object() {
            return Err(CredentialError::InvalidClientData("expected a JSON object".into()));
        }
        serde_json::from_value(value).map_err(|error| CredentialError::InvalidClientData(error.to_string()))
    }

    /// Decode the challenge, if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Decode`] if the challenge is not base64url.
    pub fn decoded_challenge(&self) -> Result<Option<Vec<u8>>, CredentialError> {
        self.challenge
            .as_deref()
            .map(|challenge| base64url_to_bytes(challenge).map_err(CredentialError::decode("challenge")))
            .transpose()
    }
}
