use thiserror::Error;

use crate::sdk::SdkError;

/// Errors from bringing the gate up through the SDK.
///
/// Queueing and dispatch never fail; only [`InitGate::bootstrap`](super::InitGate::bootstrap) returns this.
#[derive(Debug, Error)]
pub enum GateError {
    /// Error from the authentication SDK
    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),
}
