/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Request dispatch with transparent session recovery
//!
//! Every account operation is described by an [`ApiRequest`] and sent through
//! [`HttpClient::execute`], which runs at most two attempts:
//!
//! 1. send the request with the current credentials
//! 2. only if that attempt was rejected with 401 and the request allows it,
//!    refresh the session once and send the request again
//!
//! The second attempt goes straight to classification, so a request is never
//! refreshed twice no matter what the service answers.

use crate::application::auth::{RefreshSlot, SessionStore, TokenPair};
use crate::application::config::Config;
use crate::constants::{API_KEY_HEADER, REFRESH_PATH, USER_AGENT};
use crate::error::{AppError, AuthResult};
use crate::model::requests::RefreshTokenRequest;
use crate::model::responses::{ErrorBody, TokenRefreshResponse};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Whether the bearer token is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach `Authorization: Bearer <access token>` when one is held
    Bearer,
    /// Never attach the access token
    Anonymous,
}

/// Whether a 401 may trigger the refresh-and-retry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Refresh once and resend when the first attempt gets a 401
    OnUnauthorized,
    /// Report a 401 as is
    Never,
}

/// Description of one call against the Auth Service
pub struct ApiRequest<'a, B: ?Sized = ()> {
    /// HTTP method
    pub method: Method,
    /// Endpoint path, joined onto the configured base URL
    pub path: &'a str,
    /// JSON body, sent for POST and PATCH
    pub body: Option<&'a B>,
    /// Bearer token policy
    pub auth: AuthMode,
    /// 401 recovery policy
    pub refresh: RefreshMode,
}

impl<'a> ApiRequest<'a, ()> {
    /// Authenticated GET without body
    pub fn get(path: &'a str) -> Self {
        Self::new(Method::GET, path, None)
    }
}

impl<'a, B: Serialize + ?Sized> ApiRequest<'a, B> {
    fn new(method: Method, path: &'a str, body: Option<&'a B>) -> Self {
        Self {
            method,
            path,
            body,
            auth: AuthMode::Bearer,
            refresh: RefreshMode::OnUnauthorized,
        }
    }

    /// Authenticated POST with a JSON body
    pub fn post(path: &'a str, body: &'a B) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    /// Authenticated PATCH with a JSON body
    pub fn patch(path: &'a str, body: &'a B) -> Self {
        Self::new(Method::PATCH, path, Some(body))
    }

    /// Do not attach the access token
    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    /// Report a 401 without trying to refresh the session
    pub fn without_refresh(mut self) -> Self {
        self.refresh = RefreshMode::Never;
        self
    }
}

/// Fully read response of one attempt
struct Reply {
    status: StatusCode,
    body: Vec<u8>,
    /// Generation of the session when the request was built
    generation: Option<u64>,
}

impl Reply {
    fn into_result<T: DeserializeOwned>(self) -> AuthResult<T> {
        if self.status.is_success() {
            return parse_body(&self.body);
        }
        Err(self.into_error())
    }

    fn into_error(self) -> AppError {
        let message = ErrorBody::extract_message(&self.body)
            .unwrap_or_else(|| format!("HTTP {}", self.status.as_u16()));
        error!("Request failed with status {}: {}", self.status, message);
        if self.status == StatusCode::UNAUTHORIZED {
            AppError::Authentication(message)
        } else {
            AppError::Service {
                status: self.status,
                message,
            }
        }
    }
}

/// Empty success bodies are read as JSON `null`
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> AuthResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PATCH
}

/// What happened when a rejected request asked for a refresh
enum Recovery {
    /// Fresh tokens are in place, the request may be resent
    Refreshed,
    /// There was nothing to refresh with
    Unavailable,
}

/// HTTP dispatcher shared by all account operations
pub struct HttpClient {
    config: Arc<Config>,
    http_client: Client,
    session: Arc<SessionStore>,
}

impl HttpClient {
    /// Creates a dispatcher for `config` operating on `session`
    ///
    /// # Returns
    /// * `Ok(HttpClient)` - Dispatcher ready to use
    /// * `Err(AppError)` - If the underlying HTTP client cannot be built
    pub fn new(config: Arc<Config>, session: Arc<SessionStore>) -> AuthResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            config,
            http_client,
            session,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session state shared with the owning client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sends `request` and decodes the JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - Deserialized response of the first successful attempt
    /// * `Err(AppError::Authentication)` - 401 that could not be recovered; if a
    ///   refresh was attempted the session has been cleared
    /// * `Err(AppError::Service)` - Any other non-success status
    /// * `Err(AppError::Transport)` - Connection or timeout failure
    pub async fn execute<B, T>(&self, request: &ApiRequest<'_, B>) -> AuthResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let first = self.attempt(request).await?;
        if first.status != StatusCode::UNAUTHORIZED || request.refresh == RefreshMode::Never {
            return first.into_result();
        }

        match self.recover(request, first.generation).await? {
            Recovery::Unavailable => first.into_result(),
            Recovery::Refreshed => {
                let retry = self.attempt(request).await?;
                let generation = retry.generation;
                match retry.into_result() {
                    Err(e) if e.is_authentication() => {
                        warn!("Request still unauthorized after refresh, clearing session");
                        self.session.clear_if_current(generation).await;
                        Err(e)
                    }
                    other => other,
                }
            }
        }
    }

    /// Sends `request` and discards whatever comes back
    ///
    /// For best-effort notifications whose outcome must not affect the caller.
    pub async fn notify<B>(&self, request: &ApiRequest<'_, B>)
    where
        B: Serialize + ?Sized + Sync,
    {
        if let Err(e) = self.execute::<B, IgnoredAny>(request).await {
            warn!("{} {} failed, ignoring: {}", request.method, request.path, e);
        }
    }

    /// Exchanges the held refresh token for a new pair
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - The pair now held by the session
    /// * `Err(AppError::Authentication)` - If no refresh token is held
    /// * `Err(AppError)` - If the refresh call fails; the session is left as is
    pub async fn refresh_session(&self) -> AuthResult<TokenPair> {
        let Some(ticket) = self.session.begin_refresh().await else {
            return Err(AppError::Authentication(
                "no refresh token available".to_string(),
            ));
        };

        let response = self.request_refresh(ticket.refresh_token()).await?;
        let tokens = TokenPair::from(&response);
        ticket.commit(tokens.clone()).await;
        info!("Session tokens refreshed");
        Ok(tokens)
    }

    async fn recover<B>(
        &self,
        request: &ApiRequest<'_, B>,
        seen: Option<u64>,
    ) -> AuthResult<Recovery>
    where
        B: ?Sized,
    {
        match self.session.begin_recovery(seen).await {
            RefreshSlot::Unavailable => Ok(Recovery::Unavailable),
            RefreshSlot::Superseded => {
                debug!(
                    "{} {}: session refreshed by a concurrent request, resending",
                    request.method, request.path
                );
                Ok(Recovery::Refreshed)
            }
            RefreshSlot::Owned(ticket) => {
                warn!(
                    "{} {} returned 401, refreshing session",
                    request.method, request.path
                );
                match self.request_refresh(ticket.refresh_token()).await {
                    Ok(response) => {
                        ticket.commit(TokenPair::from(&response)).await;
                        info!("Session tokens refreshed");
                        Ok(Recovery::Refreshed)
                    }
                    Err(e) => {
                        error!("Token refresh failed, clearing session: {}", e);
                        ticket.abandon().await;
                        Err(AppError::Authentication(
                            "authentication failed and token refresh failed".to_string(),
                        ))
                    }
                }
            }
        }
    }

    /// `POST /auth/refresh`: single attempt, no bearer, no recovery
    async fn request_refresh(&self, refresh_token: &str) -> AuthResult<TokenRefreshResponse> {
        let body = RefreshTokenRequest { refresh_token };
        let request = ApiRequest::post(REFRESH_PATH, &body)
            .anonymous()
            .without_refresh();
        self.attempt(&request).await?.into_result()
    }

    async fn attempt<B>(&self, request: &ApiRequest<'_, B>) -> AuthResult<Reply>
    where
        B: Serialize + ?Sized + Sync,
    {
        let credential = self.session.credential().await;
        let url = self.config.url_for(request.path);

        debug!("{} {}", request.method, url);

        let mut builder = self
            .http_client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");

        if let Some(api_key) = &self.config.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        if request.auth == AuthMode::Bearer {
            if let Some(credential) = &credential {
                builder = builder.bearer_auth(&credential.access_token);
            }
        }

        if let Some(body) = request.body.filter(|_| carries_body(&request.method)) {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);
        let body = response.bytes().await?.to_vec();

        Ok(Reply {
            status,
            body,
            generation: credential.map(|c| c.generation),
        })
    }
}
