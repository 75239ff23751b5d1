/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Non-verifying inspection of access tokens
//!
//! Access tokens are three dot-separated segments whose middle segment is
//! URL-safe base64 JSON. Nothing here checks a signature; the claims are read
//! only to answer "who is this" and "has it expired" on the client side.

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::Utc;
use serde_json::{Map, Value};

/// Claims carried in the middle segment of an access token
pub type TokenClaims = Map<String, Value>;

/// URL-safe engine that accepts the segment with or without `=` padding
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the claims segment of `token`
///
/// Returns `None` unless the token has exactly three segments and the middle one
/// is valid base64 holding a JSON object.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }
    let bytes = CLAIMS_ENGINE.decode(segments[1]).ok()?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// Reads the `exp` claim as epoch seconds
#[must_use]
pub fn expires_at(claims: &TokenClaims) -> Option<i64> {
    let exp = claims.get("exp")?;
    exp.as_i64().or_else(|| exp.as_f64().map(|f| f.floor() as i64))
}

/// True when the token cannot be read, has no `exp`, or `now >= exp`
#[must_use]
pub fn is_expired(token: Option<&str>) -> bool {
    let Some(exp) = token.and_then(decode_claims).as_ref().and_then(expires_at) else {
        return true;
    };
    Utc::now().timestamp() >= exp
}

/// Encodes `claims` into the claims segment format, without padding
///
/// Useful for building tokens in tests and fixtures.
#[must_use]
pub fn encode_claims(claims: &TokenClaims) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(Value::Object(claims.clone()).to_string())
}
