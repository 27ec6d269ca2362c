use async_trait::async_trait;
use auth_init_gate::{
    AuthSdk, LoginResponse, LoginStatus, LoginStatusResponse, SdkConfig, SdkError,
};
use std::sync::Mutex;
use tokio::sync::Notify;

use super::fixtures::{Events, auth_payload};

/// SDK double that loads slowly: `init` blocks until `finish_loading` is called.
/// Status and popup answers come from JSON, as a browser bridge would deliver them.
pub struct ScriptedSdk {
    loaded: Notify,
    status_json: Mutex<String>,
    popup_accepts: Mutex<bool>,
    pub events: Events,
}

impl ScriptedSdk {
    pub fn new(events: Events) -> Self {
        Self {
            loaded: Notify::new(),
            status_json: Mutex::new(r#"{"status":"unknown"}"#.to_string()),
            popup_accepts: Mutex::new(true),
            events,
        }
    }

    pub fn finish_loading(&self) {
        self.loaded.notify_one();
    }

    pub fn set_status_json(&self, json: &str) {
        *self.status_json.lock().unwrap() = json.to_string();
    }

    pub fn set_popup_accepts(&self, accepts: bool) {
        *self.popup_accepts.lock().unwrap() = accepts;
    }
}

#[async_trait]
impl AuthSdk for ScriptedSdk {
    async fn init(&self, config: &SdkConfig) -> Result<(), SdkError> {
        self.events.push(format!("init:{}", config.app_id));
        self.loaded.notified().await;
        self.events.push("loaded");
        Ok(())
    }

    async fn get_login_status(&self, force_server_check: bool) -> LoginStatusResponse {
        self.events.push(format!("status_check:{force_server_check}"));
        let json = self.status_json.lock().unwrap().clone();
        LoginStatusResponse::from_json(&json).unwrap_or_default()
    }

    async fn login(&self) -> LoginResponse {
        self.events.push("popup");
        if *self.popup_accepts.lock().unwrap() {
            LoginResponse {
                status: LoginStatus::Connected,
                auth_response: Some(auth_payload("42")),
            }
        } else {
            LoginResponse::default()
        }
    }
}
