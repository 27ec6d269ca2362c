mod config;
mod errors;
mod traits;
mod types;

pub use config::SdkConfig;
pub use errors::SdkError;
pub use traits::AuthSdk;
pub use types::{AuthResponse, LoginResponse, LoginStatus, LoginStatusResponse};
