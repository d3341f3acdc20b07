use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::SessionError;

/// Decode the `exp` claim of a JWT bearer token, for status display.
///
/// Does NOT verify the signature; the backend remains the only authority on
/// whether a token is accepted. Opaque (non-JWT) tokens are an error.
///
/// # Errors
///
/// Returns [`SessionError::InvalidToken`] if the token is not a three-part JWT
/// or the `exp` claim is missing or unparseable.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::InvalidToken("not a JWT".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| SessionError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| SessionError::InvalidToken(format!("JSON parse failed: {e}")))?;
    // Some issuers write NumericDate as a float, e.g. `1.7e9`.
    #[allow(clippy::cast_possible_truncation)]
    let exp = value["exp"]
        .as_i64()
        .or_else(|| value["exp"].as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        .ok_or_else(|| SessionError::InvalidToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| SessionError::InvalidToken("invalid exp timestamp".into()))
}
