use crate::error::AuthResult;
use crate::model::requests::UpdateProfileRequest;
use crate::model::responses::{HealthStatus, LoginResult, MessageResponse, UserProfile};
use async_trait::async_trait;

/// Interface for account operations against the Auth Service
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Creates an account; the tenant falls back to the configured default
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<UserProfile>;

    /// Logs in and keeps the returned token pair in the session
    async fn login(
        &self,
        email: &str,
        password: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<LoginResult>;

    /// Notifies the service when possible and always clears the session
    async fn logout(&self);

    /// Gets the profile of the logged in user
    async fn get_profile(&self) -> AuthResult<UserProfile>;

    /// Updates the profile of the logged in user
    async fn update_profile(&self, update: &UpdateProfileRequest) -> AuthResult<UserProfile>;

    /// Changes the password of the logged in user
    async fn change_password(&self, old_password: &str, new_password: &str) -> AuthResult<()>;

    /// Asks the service to email a password reset link
    async fn request_password_reset(
        &self,
        email: &str,
        tenant_id: Option<&str>,
    ) -> AuthResult<MessageResponse>;

    /// Sets a new password using a reset token
    async fn reset_password(&self, token: &str, new_password: &str)
    -> AuthResult<MessageResponse>;

    /// Gets the service health report
    async fn health(&self) -> AuthResult<HealthStatus>;
}
