/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Identity record returned by the Auth Service
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Tenant the user belongs to
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Whether the account is enabled
    #[serde(default)]
    pub is_active: bool,
    /// Whether the email address has been verified
    #[serde(default)]
    pub email_verified: bool,
    /// Role name, e.g. `user` or `admin`
    #[serde(default)]
    pub role: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    /// The newly created user
    pub user: UserProfile,
}

/// Response of `POST /auth/login`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Access token, committed into the session
    pub access_token: String,
    /// Refresh token, committed into the session
    pub refresh_token: String,
    /// Authenticated user
    pub user: UserProfile,
    /// Access token lifetime in seconds, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_expires_in: Option<u64>,
    /// Refresh token lifetime in seconds, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
}

/// Response of `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshResponse {
    /// Replacement access token
    pub access_token: String,
    /// Replacement refresh token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub access_expires_in: Option<u64>,
    /// Refresh token lifetime in seconds
    #[serde(default)]
    pub refresh_expires_in: Option<u64>,
}

/// Generic acknowledgement returned by the password reset endpoints
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageResponse {
    /// Human readable outcome
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /auth/health`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HealthStatus {
    /// `ok` when the service is up
    pub status: String,
    /// Service name
    #[serde(default)]
    pub service: Option<String>,
    /// Service version
    #[serde(default)]
    pub version: Option<String>,
    /// Server time of the check
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Process uptime in seconds
    #[serde(default)]
    pub uptime: Option<f64>,
    /// Advertised feature names
    #[serde(default)]
    pub features: Vec<String>,
}

impl HealthStatus {
    /// True when the service reports `ok`
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Error body returned by the service on non-success responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Pulls a human readable message out of a raw error body
    ///
    /// NestJS validation errors carry `message` as an array of strings; those are
    /// joined with `; `.
    pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        match parsed.message? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}
