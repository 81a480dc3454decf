//! Venue-agnostic signing kernel
//!
//! The pieces every HMAC-authenticated venue needs, with no venue-specific
//! header names or payload layouts:
//!
//! - `canonical`: deterministic parameter ordering and query-string encoding
//! - `signer`: HMAC-SHA256 hex signing and the transport-facing `Signer` trait
//! - `clock`: the injectable `TimeProvider` used for timestamps and expiries
//!
//! # Example
//! ```rust
//! use bingx_auth::core::kernel::{canonical_query, keysort, HmacSigner};
//!
//! # fn example() -> Result<(), bingx_auth::ExchangeError> {
//! let params = keysort([("timestamp", "1700000000000"), ("symbol", "BTC-USDT")]);
//! let query = canonical_query(&params)?;
//! assert_eq!(query, "symbol=BTC-USDT&timestamp=1700000000000");
//!
//! let signature = HmacSigner::new("S".to_string()).sign(query.as_bytes());
//! assert_eq!(signature.len(), 64);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod canonical;
pub mod clock;
pub mod signer;

pub use canonical::{canonical_query, keysort, signed_query};
pub use clock::{FixedClock, SystemClock, TimeProvider};
pub use signer::{hmac_sha256_hex, HmacSigner, SignatureResult, Signer};
