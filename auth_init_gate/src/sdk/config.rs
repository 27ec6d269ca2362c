use std::env;

use super::errors::SdkError;

const DEFAULT_SDK_VERSION: &str = "v19.0";

/// Options passed to [`AuthSdk::init`](super::AuthSdk::init)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    pub app_id: String,
    pub version: String,
    /// Check login status while initializing
    pub status: bool,
    /// Let the SDK keep a session cookie
    pub cookie: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            version: DEFAULT_SDK_VERSION.to_string(),
            status: true,
            cookie: true,
        }
    }
}

impl SdkConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// Build a config from `AUTH_SDK_*` environment variables, falling back
    /// to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            app_id: env::var("AUTH_SDK_APP_ID").unwrap_or_default(),
            version: env::var("AUTH_SDK_VERSION")
                .unwrap_or_else(|_| DEFAULT_SDK_VERSION.to_string()),
            status: env::var("AUTH_SDK_STATUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            cookie: env::var("AUTH_SDK_COOKIE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.app_id.trim().is_empty() {
            return Err(SdkError::Config("app id must not be empty".to_string()));
        }
        Ok(())
    }
}
