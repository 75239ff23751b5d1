/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Session client for the Auth Service
//!
//! This module provides the client that applications hold on to. It handles:
//! - Account operations (register, login, profile, password management)
//! - Keeping the access/refresh token pair in memory
//! - Transparent token refresh when an authenticated call gets a 401
//!
//! # Example
//! ```ignore
//! use auth_session_client::prelude::*;
//!
//! let config = Config::builder()
//!     .base_url("https://auth.example.com")
//!     .tenant_id("tenant-1")
//!     .build();
//! let client = Client::new(config)?;
//!
//! client.login("user@example.com", "secret", None).await?;
//! let profile = client.get_profile().await?;
//! ```

use crate::application::auth::{SessionPhase, SessionStore, TokenPair};
use crate::application::config::Config;
use crate::application::interfaces::account::AccountService;
use crate::constants::{
    CHANGE_PASSWORD_PATH, HEALTH_PATH, LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, REGISTER_PATH,
    REQUEST_PASSWORD_RESET_PATH, RESET_PASSWORD_PATH,
};
use crate::error::{AppError, AuthResult};
use crate::model::auth::{self as claims, TokenClaims};
use crate::model::http::{ApiRequest, HttpClient};
use crate::model::requests::{
    ChangePasswordRequest, LoginRequest, PasswordResetRequest, RefreshTokenRequest,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};
use crate::model::responses::{
    HealthStatus, LoginResult, MessageResponse, RegisterResponse, UserProfile,
};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use std::sync::Arc;
use tracing::{debug, info};

/// Session client for the Auth Service
///
/// Safe to share between tasks behind an `Arc`; concurrent calls that hit an
/// expired token share a single refresh.
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Creates a new, unauthenticated client
    ///
    /// # Arguments
    /// * `config` - Base URL, API key, default tenant and timeouts
    ///
    /// # Returns
    /// * `Ok(Client)` - Client ready to use
    /// * `Err(AppError)` - If the HTTP client cannot be built
    pub fn new(config: Config) -> AuthResult<Self> {
        let http_client = HttpClient::new(Arc::new(config), Arc::new(SessionStore::new()))?;
        Ok(Self { http_client })
    }

    /// Creates a client from `AUTH_*` environment variables
    pub fn from_env() -> AuthResult<Self> {
        Self::new(Config::from_env())
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &Config {
        self.http_client.config()
    }

    fn session(&self) -> &SessionStore {
        self.http_client.session()
    }

    fn require_tenant<'a>(&'a self, tenant_id: Option<&'a str>) -> AuthResult<&'a str> {
        self.config()
            .resolve_tenant(tenant_id)
            .ok_or_else(|| AppError::Configuration("tenantId is required".to_string()))
    }

    /// Stores a token pair, replacing whatever was held
    pub async fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) {
        self.session()
            .set(TokenPair::new(access_token, refresh_token))
            .await;
    }

    /// Drops both tokens without contacting the service
    pub async fn clear_tokens(&self) {
        self.session().clear().await;
    }

    /// Currently held token pair
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.session().tokens().await
    }

    /// True iff an access token is held; expiry is not checked
    pub async fn is_authenticated(&self) -> bool {
        self.session().is_authenticated().await
    }

    /// Observable phase of the session
    pub async fn session_phase(&self) -> SessionPhase {
        self.session().phase().await
    }

    /// Decodes the claims of the held access token without verifying it
    ///
    /// Returns `None` when no token is held or it is not a readable
    /// three-segment token.
    pub async fn token_info(&self) -> Option<TokenClaims> {
        self.session()
            .access_token()
            .await
            .as_deref()
            .and_then(claims::decode_claims)
    }

    /// True when no token is held, it cannot be decoded, it has no `exp`, or
    /// `exp` has been reached
    pub async fn is_token_expired(&self) -> bool {
        claims::is_expired(self.session().access_token().await.as_deref())
    }

    /// Exchanges the held refresh token for a new pair
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - The new pair, already stored
    /// * `Err(AppError::Authentication)` - If no refresh token is held
    /// * `Err(AppError)` - If the service rejects the refresh
    pub async fn refresh_tokens(&self) -> AuthResult<TokenPair> {
        self.http_client.refresh_session().await
    }
}

#[async_trait]
impl AccountService for Client {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<UserProfile> {
        let tenant_id = self.require_tenant(tenant_id)?;
        let body = RegisterRequest {
            email,
            password,
            name,
            tenant_id,
        };
        let request = ApiRequest::post(REGISTER_PATH, &body)
            .anonymous()
            .without_refresh();
        let response: RegisterResponse = self.http_client.execute(&request).await?;
        info!("Registered user {}", response.user.id);
        Ok(response.user)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<LoginResult> {
        let tenant_id = self.require_tenant(tenant_id)?;
        let body = LoginRequest {
            email,
            password,
            tenant_id,
        };
        let request = ApiRequest::post(LOGIN_PATH, &body)
            .anonymous()
            .without_refresh();
        let result: LoginResult = self.http_client.execute(&request).await?;
        self.session().set(TokenPair::from(&result)).await;
        info!("✓ Login successful, user: {}", result.user.id);
        Ok(result)
    }

    async fn logout(&self) {
        if let Some(refresh_token) = self.session().refresh_token().await {
            let body = RefreshTokenRequest {
                refresh_token: &refresh_token,
            };
            // Refreshing right before clearing would leave the rotated pair live
            let request = ApiRequest::post(LOGOUT_PATH, &body).without_refresh();
            self.http_client.notify(&request).await;
        } else {
            debug!("No refresh token held, skipping logout notification");
        }

        self.session().clear().await;
        info!("✓ Logged out");
    }

    async fn get_profile(&self) -> AuthResult<UserProfile> {
        self.http_client.execute(&ApiRequest::get(PROFILE_PATH)).await
    }

    async fn update_profile(&self, update: &UpdateProfileRequest) -> AuthResult<UserProfile> {
        self.http_client
            .execute(&ApiRequest::patch(PROFILE_PATH, update))
            .await
    }

    async fn change_password(&self, old_password: &str, new_password: &str) -> AuthResult<()> {
        let body = ChangePasswordRequest {
            old_password,
            new_password,
        };
        let _: IgnoredAny = self
            .http_client
            .execute(&ApiRequest::patch(CHANGE_PASSWORD_PATH, &body))
            .await?;
        info!("Password changed");
        Ok(())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<MessageResponse> {
        let body = PasswordResetRequest {
            email,
            tenant_id: self.config().resolve_tenant(tenant_id),
        };
        let request = ApiRequest::post(REQUEST_PASSWORD_RESET_PATH, &body)
            .anonymous()
            .without_refresh();
        let response: Option<MessageResponse> = self.http_client.execute(&request).await?;
        Ok(response.unwrap_or_default())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> AuthResult<MessageResponse> {
        let body = ResetPasswordRequest {
            token,
            new_password,
        };
        let request = ApiRequest::post(RESET_PASSWORD_PATH, &body)
            .anonymous()
            .without_refresh();
        let response: Option<MessageResponse> = self.http_client.execute(&request).await?;
        Ok(response.unwrap_or_default())
    }

    async fn health(&self) -> AuthResult<HealthStatus> {
        let request = ApiRequest::get(HEALTH_PATH).anonymous().without_refresh();
        self.http_client.execute(&request).await
    }
}
