use async_trait::async_trait;

use super::config::SdkConfig;
use super::errors::SdkError;
use super::types::{LoginResponse, LoginStatusResponse};

/// The external authentication SDK, as seen by the gate.
///
/// Each call completes once. Failures inside the SDK (network errors, a
/// blocked popup) are reported through the response values themselves.
#[async_trait]
pub trait AuthSdk: Send + Sync + 'static {
    /// Load and initialize the SDK. A successful return is the ready signal.
    async fn init(&self, config: &SdkConfig) -> Result<(), SdkError>;

    /// Query the current login status, optionally bypassing the SDK's cache.
    async fn get_login_status(&self, force_server_check: bool) -> LoginStatusResponse;

    /// Show the login popup and wait for the user's answer.
    async fn login(&self) -> LoginResponse;
}
