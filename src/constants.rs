/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default read timeout in seconds
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
/// Default write timeout in seconds
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;
/// User agent string used in HTTP requests to identify this client to the Auth Service
pub const USER_AGENT: &str = concat!("auth-session-client/", env!("CARGO_PKG_VERSION"));

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Registration endpoint
pub const REGISTER_PATH: &str = "/auth/register";
/// Login endpoint
pub const LOGIN_PATH: &str = "/auth/login";
/// Logout endpoint
pub const LOGOUT_PATH: &str = "/auth/logout";
/// Profile endpoint (GET reads, PATCH updates)
pub const PROFILE_PATH: &str = "/auth/profile";
/// Password change endpoint
pub const CHANGE_PASSWORD_PATH: &str = "/auth/change-password";
/// Token refresh endpoint
pub const REFRESH_PATH: &str = "/auth/refresh";
/// Password reset request endpoint
pub const REQUEST_PASSWORD_RESET_PATH: &str = "/auth/request-password-reset";
/// Password reset confirmation endpoint
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
/// Service health endpoint
pub const HEALTH_PATH: &str = "/auth/health";
