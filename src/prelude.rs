/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! # Auth Session Client Prelude
//!
//! Brings the commonly used types and traits into scope with one import.
//!
//! ```rust
//! use auth_session_client::prelude::*;
//!
//! let config = Config::builder().tenant_id("tenant-1").build();
//! assert_eq!(config.base_url, "http://localhost:3001");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the session client
pub use crate::config::{Config, ConfigBuilder};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type and result alias
pub use crate::error::{AppError, AuthResult};

// ============================================================================
// CLIENT AND SESSION
// ============================================================================

/// Session client
pub use crate::application::client::Client;

/// Account operations trait
pub use crate::application::interfaces::account::AccountService;

/// Session state types
pub use crate::application::auth::{SessionPhase, SessionState, TokenPair};

/// Token claims
pub use crate::model::auth::TokenClaims;

// ============================================================================
// DATA MODELS
// ============================================================================

/// Request models
pub use crate::model::requests::UpdateProfileRequest;

/// Response models
pub use crate::model::responses::{
    HealthStatus, LoginResult, MessageResponse, TokenRefreshResponse, UserProfile,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logger setup
pub use crate::utils::logger::setup_logger;
