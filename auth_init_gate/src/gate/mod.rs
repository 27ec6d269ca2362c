mod core;
mod errors;
mod login;
mod types;

pub use self::core::InitGate;
pub use errors::GateError;
pub use types::{LoginHandlers, LoginStatusHandlers};
