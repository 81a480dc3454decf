/// Header carrying the raw API key on every private REST call.
pub const API_KEY_HEADER: &str = "X-BX-APIKEY";

/// Header identifying the integration to the venue.
pub const SOURCE_KEY_HEADER: &str = "X-SOURCE-KEY";

/// Fixed source identifier sent in [`SOURCE_KEY_HEADER`]. Not a secret.
pub const SOURCE_KEY: &str = "BINGX-AUTH-RS";

/// Header used for broker attribution.
pub const REFERRAL_HEADER: &str = "referer";

/// Broker/referral tag sent in [`REFERRAL_HEADER`].
pub const BROKER_ID: &str = "bingx-auth-rs";

pub const TIMESTAMP_PARAM: &str = "timestamp";
pub const SIGNATURE_PARAM: &str = "signature";

/// Prefix of the string signed for the streaming handshake; the expiry is
/// appended with no separator.
pub const WS_AUTH_PREFIX: &str = "GET/realtime";

/// How far in the future a streaming handshake expires.
pub const WS_AUTH_EXPIRY_MS: u64 = 10_000;
