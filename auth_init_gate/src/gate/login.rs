use std::sync::{Arc, Mutex};

use super::core::{GateState, InitGate, lock_state};
use super::types::{LoginHandlers, LoginStatusHandlers};
use crate::sdk::AuthSdk;

/// Hands back the login claim if the loader panics before the login is queued
struct LoginClaim<'a> {
    state: &'a Mutex<GateState>,
    restore: bool,
}

impl Drop for LoginClaim<'_> {
    fn drop(&mut self) {
        lock_state(self.state).login_in_flight = self.restore;
    }
}

impl<S: AuthSdk> InitGate<S> {
    /// Once the SDK is ready, check the login status and run the matching handler.
    ///
    /// `force_server_check` asks the SDK to skip its cached status.
    pub fn dispatch_login_status(
        &self,
        handlers: LoginStatusHandlers,
        force_server_check: bool,
    ) -> &Self {
        let sdk = Arc::clone(&self.sdk);
        let runtime = self.runtime.clone();

        self.run_when_initialized(move || {
            runtime.spawn(async move {
                let response = sdk.get_login_status(force_server_check).await;
                tracing::debug!("Login status: {:?}", response.status);
                handlers.dispatch(response);
            });
        });

        self
    }

    /// Show the SDK login popup once the SDK is ready.
    ///
    /// While an earlier login is still waiting for initialization, further
    /// calls are ignored unless `force_into_queue` is set. `toggle_loader(true)`
    /// runs right away and `toggle_loader(false)` right before the popup.
    pub fn login(&self, handlers: LoginHandlers, force_into_queue: bool) -> &Self {
        let previously_in_flight = {
            let mut state = self.lock();
            if state.login_in_flight {
                if !force_into_queue {
                    tracing::debug!("Login already queued, ignoring request");
                    return self;
                }
                tracing::warn!("Login already queued, forcing another one into the queue");
            }
            // Claimed before the loader runs so a concurrent request sees it.
            std::mem::replace(&mut state.login_in_flight, true)
        };

        let claim = LoginClaim {
            state: &*self.state,
            restore: previously_in_flight,
        };
        handlers.toggle_loader(true);
        std::mem::forget(claim);

        let sdk = Arc::clone(&self.sdk);
        let runtime = self.runtime.clone();
        let state = Arc::downgrade(&self.state);

        let queued = !self.run_when_initialized(move || {
            handlers.toggle_loader(false);
            runtime.spawn(async move {
                let response = sdk.login().await;
                tracing::debug!("Login popup closed, accepted: {}", response.is_accepted());
                handlers.dispatch(response);
            });
            if let Some(state) = state.upgrade() {
                lock_state(&state).login_in_flight = false;
            }
        });

        if queued {
            tracing::debug!("Login deferred until the auth SDK is initialized");
        }

        self
    }
}
