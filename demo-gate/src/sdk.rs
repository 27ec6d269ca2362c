use async_trait::async_trait;
use auth_init_gate::{
    AuthResponse, AuthSdk, LoginResponse, LoginStatus, LoginStatusResponse, SdkConfig, SdkError,
};
use std::time::Duration;

/// Stand-in for a browser auth SDK: takes a moment to load, always reports a
/// logged-out user and accepts every login popup.
pub(crate) struct SimulatedSdk {
    pub(crate) load_delay: Duration,
}

#[async_trait]
impl AuthSdk for SimulatedSdk {
    async fn init(&self, config: &SdkConfig) -> Result<(), SdkError> {
        tracing::info!(
            "Loading simulated SDK {} for app {}",
            config.version,
            config.app_id
        );
        tokio::time::sleep(self.load_delay).await;
        Ok(())
    }

    async fn get_login_status(&self, force_server_check: bool) -> LoginStatusResponse {
        tracing::debug!("Checking login status (force_server_check={})", force_server_check);
        LoginStatusResponse {
            status: LoginStatus::Unknown,
            auth_response: None,
        }
    }

    async fn login(&self) -> LoginResponse {
        tracing::info!("Showing login popup");
        tokio::time::sleep(Duration::from_millis(50)).await;
        LoginResponse {
            status: LoginStatus::Connected,
            auth_response: Some(AuthResponse {
                access_token: "demo-access-token".to_string(),
                expires_in: 3600,
                signed_request: None,
                user_id: "demo-user".to_string(),
            }),
        }
    }
}
