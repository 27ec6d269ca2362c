use serde::{Deserialize, Serialize};

use super::errors::SdkError;

/// Login status as reported by the SDK's status check.
///
/// Any status string other than `connected` or `not_authorized` is treated
/// as `Unknown`, which the gate dispatches as logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    /// Logged in to the provider and the app is authorized
    Connected,
    /// Logged in to the provider but the app has not been authorized
    NotAuthorized,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Auth payload handed back by the SDK on a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    /// Seconds until `access_token` expires
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_request: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// Result of a login status check
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatusResponse {
    #[serde(default)]
    pub status: LoginStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_response: Option<AuthResponse>,
}

impl LoginStatusResponse {
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of the login popup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub status: LoginStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_response: Option<AuthResponse>,
}

impl LoginResponse {
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The user accepted the popup. Only the presence of an auth payload counts.
    pub fn is_accepted(&self) -> bool {
        self.auth_response.is_some()
    }
}
