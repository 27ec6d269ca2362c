//! auth-init-gate - Defer work until an authentication SDK is ready
//!
//! Third-party auth SDKs usually load and initialize asynchronously. This crate
//! provides [`InitGate`], which queues callbacks until the SDK signals that it
//! is ready, dispatches login status checks, and keeps the login popup from
//! being queued twice while the SDK is still loading.

mod gate;
mod sdk;


pub use gate::{GateError, InitGate, LoginHandlers, LoginStatusHandlers};

pub use sdk::{
    AuthResponse, AuthSdk, LoginResponse, LoginStatus, LoginStatusResponse, SdkConfig, SdkError,
};
