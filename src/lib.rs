pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig, errors::ExchangeError, traits::RequestAuthenticator, types::*,
};
pub use exchanges::bingx::BingxAuth;
