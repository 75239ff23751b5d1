/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    /// Email address of the new account
    pub email: &'a str,
    /// Initial password
    pub password: &'a str,
    /// Display name
    pub name: &'a str,
    /// Tenant the account belongs to
    pub tenant_id: &'a str,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    /// Account email
    pub email: &'a str,
    /// Account password
    pub password: &'a str,
    /// Tenant to log into
    pub tenant_id: &'a str,
}

/// Body of `POST /auth/refresh` and `POST /auth/logout`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    /// Refresh token currently held by the session
    pub refresh_token: &'a str,
}

/// Body of `PATCH /auth/change-password`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    /// Current password
    pub old_password: &'a str,
    /// Replacement password
    pub new_password: &'a str,
}

/// Body of `PATCH /auth/profile`
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, DisplaySimple, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Body of `POST /auth/request-password-reset`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest<'a> {
    /// Email of the account to reset
    pub email: &'a str,
    /// Tenant of the account; the service derives it from the API key when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<&'a str>,
}

/// Body of `POST /auth/reset-password`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    /// One-time reset token delivered by email
    pub token: &'a str,
    /// Replacement password
    pub new_password: &'a str,
}
