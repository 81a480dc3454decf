//! Canonical form of a parameter set: the exact bytes a signature covers.
//!
//! The verifier on the venue side rebuilds the same string from the
//! parameters it receives, so ordering and escaping here must match its
//! `quote_plus` form encoding exactly. Any drift shows up as a signature
//! mismatch, never as a local error.

use crate::core::errors::ExchangeError;
use crate::core::types::ParamMap;

/// Order parameters by raw key bytes.
///
/// `ParamMap` is a `BTreeMap<String, _>`, whose ordering is `str`'s byte-wise
/// lexicographic `Ord`, so no locale or case folding can sneak in. Duplicate
/// keys in the input collapse to the last value seen.
pub fn keysort<I, K, V>(params: I) -> ParamMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Serialize parameters as `key=value` pairs joined by `&`, in key order.
///
/// Escaping follows form encoding with two adjustments so the output matches
/// the venue's `quote_plus`: `~` stays literal and `*` is escaped.
pub fn canonical_query(params: &ParamMap) -> Result<String, ExchangeError> {
    let encoded = serde_urlencoded::to_string(params)?;
    Ok(to_quote_plus(encoded))
}

/// Query string to put on the wire for signed parameters: the canonical
/// query of everything except the signature, with the signature appended
/// last.
pub fn signed_query(params: &ParamMap, signature_key: &str) -> Result<String, ExchangeError> {
    let mut unsigned = params.clone();
    let Some(signature) = unsigned.remove_entry(signature_key) else {
        return canonical_query(params);
    };

    let head = canonical_query(&unsigned)?;
    let tail = canonical_query(&ParamMap::from([signature]))?;
    if head.is_empty() {
        Ok(tail)
    } else {
        Ok(format!("{}&{}", head, tail))
    }
}

// `form_urlencoded` leaves `*` bare and escapes `~`; `quote_plus` does the
// opposite. A literal "%7E" can only come from `~` because input `%` is
// always escaped to "%25".
fn to_quote_plus(encoded: String) -> String {
    if !encoded.contains('*') && !encoded.contains("%7E") {
        return encoded;
    }
    encoded.replace("%7E", "~").replace('*', "%2A")
}
