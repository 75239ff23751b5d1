/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Auth Session Client
//!
//! Client library for the Auth Service API. It authenticates users, keeps the
//! access/refresh token pair in memory for the lifetime of the client, and
//! recovers from expired access tokens by refreshing once and retrying the
//! original call.
//!
//! ## Features
//!
//! - Register, login, logout, profile and password operations
//! - Transparent refresh-and-retry on `401 Unauthorized`, at most once per call
//! - One shared refresh for concurrent calls that hit an expired token
//! - Non-verifying access token inspection (`token_info`, `is_token_expired`)
//! - Configuration from a builder or from `AUTH_*` environment variables
//!
//! ## Usage
//!
//! ```ignore
//! use auth_session_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let client = Client::new(Config::builder().tenant_id("tenant-1").build())?;
//!
//!     let login = client.login("user@example.com", "password123", None).await?;
//!     println!("logged in as {}", login.user.email);
//!
//!     let profile = client.get_profile().await?;
//!     println!("{profile}");
//!
//!     client.logout().await;
//!     Ok(())
//! }
//! ```

/// Session state, configuration and the client itself
pub mod application;
/// Global constants: defaults, header names and endpoint paths
pub mod constants;
/// Error types
pub mod error;
/// Wire models, token claims and HTTP dispatch
pub mod model;
/// Convenient re-exports of the most used types
pub mod prelude;
/// Environment and logging helpers
pub mod utils;

/// Configuration alias kept at the crate root
pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
