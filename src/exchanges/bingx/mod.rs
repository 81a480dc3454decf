pub mod auth;
pub mod constants;
pub mod signer;

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use std::sync::Arc;

pub use auth::BingxAuth;
pub use constants::{API_KEY_HEADER, BROKER_ID, REFERRAL_HEADER, SOURCE_KEY, SOURCE_KEY_HEADER};

/// Environment variable prefix: `BINGX_API_KEY`, `BINGX_SECRET_KEY`.
pub const ENV_PREFIX: &str = "BINGX";

/// Create a shareable BingX authenticator from validated configuration
pub fn create_bingx_auth(config: &ExchangeConfig) -> Result<Arc<BingxAuth>, ExchangeError> {
    BingxAuth::from_config(config).map(Arc::new)
}

/// Create a BingX authenticator from `BINGX_*` environment variables
pub fn create_bingx_auth_from_env() -> Result<Arc<BingxAuth>, ExchangeError> {
    let config = ExchangeConfig::from_env(ENV_PREFIX)?;
    create_bingx_auth(&config)
}
