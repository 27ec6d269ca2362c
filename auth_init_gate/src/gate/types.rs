use std::fmt;
use std::sync::Arc;

use crate::sdk::{LoginResponse, LoginStatus, LoginStatusResponse};

/// A queued continuation. Runs at most once.
pub(crate) type Callback = Box<dyn FnOnce() + Send + 'static>;

type StatusHandler = Box<dyn FnOnce(LoginStatusResponse) + Send + 'static>;
type LoginHandler = Box<dyn FnOnce(LoginResponse) + Send + 'static>;
type LoaderToggle = Arc<dyn Fn(bool) + Send + Sync + 'static>;

/// Handlers for [`InitGate::dispatch_login_status`](super::InitGate::dispatch_login_status).
///
/// Exactly one handler runs per dispatch. Missing handlers are no-ops, and a
/// missing `not_authorized` handler falls back to `logged_out`.
#[derive(Default)]
pub struct LoginStatusHandlers {
    logged_in: Option<StatusHandler>,
    logged_out: Option<StatusHandler>,
    not_authorized: Option<StatusHandler>,
}

impl LoginStatusHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs when the user is connected and has authorized the app
    pub fn with_logged_in<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoginStatusResponse) + Send + 'static,
    {
        self.logged_in = Some(Box::new(f));
        self
    }

    /// Runs for any status other than connected or not authorized
    pub fn with_logged_out<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoginStatusResponse) + Send + 'static,
    {
        self.logged_out = Some(Box::new(f));
        self
    }

    /// Runs when the user is logged in to the provider but has not
    /// authorized the app. Falls back to the logged-out handler when unset.
    pub fn with_not_authorized<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoginStatusResponse) + Send + 'static,
    {
        self.not_authorized = Some(Box::new(f));
        self
    }

    pub(super) fn dispatch(self, response: LoginStatusResponse) {
        let handler = match response.status {
            LoginStatus::Connected => self.logged_in,
            LoginStatus::NotAuthorized => self.not_authorized.or(self.logged_out),
            LoginStatus::Unknown => self.logged_out,
        };

        match handler {
            Some(handler) => handler(response),
            None => tracing::debug!("No handler for login status {:?}", response.status),
        }
    }
}

impl fmt::Debug for LoginStatusHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginStatusHandlers")
            .field("logged_in", &self.logged_in.is_some())
            .field("logged_out", &self.logged_out.is_some())
            .field("not_authorized", &self.not_authorized.is_some())
            .finish()
    }
}

/// Handlers for [`InitGate::login`](super::InitGate::login).
///
/// `toggle_loader(true)` runs when the login is requested and
/// `toggle_loader(false)` right before the popup is shown.
#[derive(Default)]
pub struct LoginHandlers {
    on_accept: Option<LoginHandler>,
    on_cancel: Option<LoginHandler>,
    toggle_loader: Option<LoaderToggle>,
}

impl LoginHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs when the popup returns an auth payload
    pub fn with_on_accept<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoginResponse) + Send + 'static,
    {
        self.on_accept = Some(Box::new(f));
        self
    }

    /// Runs when the popup closes without an auth payload
    pub fn with_on_cancel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LoginResponse) + Send + 'static,
    {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Switches a loading indicator; called with `true` when the login is
    /// requested and `false` right before the popup opens.
    pub fn with_toggle_loader<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.toggle_loader = Some(Arc::new(f));
        self
    }

    pub(super) fn toggle_loader(&self, loading: bool) {
        if let Some(toggle) = &self.toggle_loader {
            toggle(loading);
        }
    }

    pub(super) fn dispatch(self, response: LoginResponse) {
        let handler = if response.is_accepted() {
            self.on_accept
        } else {
            self.on_cancel
        };

        if let Some(handler) = handler {
            handler(response);
        }
    }
}

impl fmt::Debug for LoginHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginHandlers")
            .field("on_accept", &self.on_accept.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("toggle_loader", &self.toggle_loader.is_some())
            .finish()
    }
}
