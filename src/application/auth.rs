/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! In-memory session state for the Auth Service client
//!
//! The session is a small state machine:
//! - `Unauthenticated`: no tokens held
//! - `Authenticated`: an access/refresh token pair is held
//! - `RefreshInFlight`: one caller owns the refresh gate and is exchanging the
//!   refresh token; everyone else who needs a refresh waits on the gate and then
//!   reuses the outcome
//!
//! Tokens only ever exist as a [`TokenPair`], so the two fields are set and
//! cleared together. Every commit bumps a generation number; a caller that got a
//! 401 compares the generation it sent against the current one to tell whether
//! somebody else already refreshed.

use crate::model::responses::{LoginResult, TokenRefreshResponse};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

/// Access and refresh token, always held together
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Bearer token attached to authenticated requests
    pub access_token: String,
    /// Token exchanged for a new pair at `/auth/refresh`
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl From<&LoginResult> for TokenPair {
    fn from(login: &LoginResult) -> Self {
        Self::new(login.access_token.clone(), login.refresh_token.clone())
    }
}

impl From<&TokenRefreshResponse> for TokenPair {
    fn from(refresh: &TokenRefreshResponse) -> Self {
        Self::new(refresh.access_token.clone(), refresh.refresh_token.clone())
    }
}

/// Tokens held by the client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No tokens held
    #[default]
    Unauthenticated,
    /// A token pair is held
    Authenticated {
        /// The held pair
        tokens: TokenPair,
        /// Commit number of this pair
        generation: u64,
    },
}

impl SessionState {
    /// The held pair, if any
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        match self {
            SessionState::Authenticated { tokens, .. } => Some(tokens),
            SessionState::Unauthenticated => None,
        }
    }

    /// Commit number of the held pair, if any
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            SessionState::Authenticated { generation, .. } => Some(*generation),
            SessionState::Unauthenticated => None,
        }
    }
}

/// Observable phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No tokens held
    Unauthenticated,
    /// Tokens held, no refresh running
    Authenticated,
    /// A refresh is being performed
    RefreshInFlight,
}

/// Access token captured for one outgoing request
#[derive(Clone)]
pub struct Credential {
    /// Token to send as bearer
    pub access_token: String,
    /// Generation of the pair it came from
    pub generation: u64,
}

/// Result of asking for a refresh after a request was rejected with 401
pub enum RefreshSlot<'a> {
    /// Newer tokens were committed after the rejected request was built
    Superseded,
    /// No refresh token is held any more
    Unavailable,
    /// The caller owns the refresh and must commit or abandon it
    Owned(RefreshTicket<'a>),
}

/// Exclusive right to perform a refresh
///
/// Holds the refresh gate until it is committed, abandoned or dropped.
/// Dropping without committing leaves the session untouched.
pub struct RefreshTicket<'a> {
    store: &'a SessionStore,
    refresh_token: String,
    generation: u64,
    _gate: MutexGuard<'a, ()>,
}

impl RefreshTicket<'_> {
    /// Refresh token to exchange
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Stores the new pair, unless the session changed while refreshing
    ///
    /// Returns false when the pair was discarded because the session was
    /// cleared or replaced in the meantime.
    pub async fn commit(self, tokens: TokenPair) -> bool {
        let mut state = self.store.state.write().await;
        if state.generation() != Some(self.generation) {
            debug!("Session changed during refresh, discarding refreshed tokens");
            return false;
        }
        let generation = self.store.bump(&mut state);
        *state = SessionState::Authenticated { tokens, generation };
        true
    }

    /// Clears the session after a failed refresh, unless it changed meanwhile
    pub async fn abandon(self) {
        self.store.clear_if_current(Some(self.generation)).await;
    }
}

/// Shared, lock-protected session state
#[derive(Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    refresh_gate: Mutex<()>,
    generations: AtomicU64,
}

impl SessionStore {
    /// Creates an unauthenticated store
    pub fn new() -> Self {
        Self::default()
    }

    // Only called with the state write lock held, which orders the increments
    fn bump(&self, _state: &mut SessionState) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Consistent copy of the current state
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// The held pair, if any
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.state.read().await.tokens().cloned()
    }

    /// Access token and its generation, for attaching to a request
    pub async fn credential(&self) -> Option<Credential> {
        match &*self.state.read().await {
            SessionState::Authenticated { tokens, generation } => Some(Credential {
                access_token: tokens.access_token.clone(),
                generation: *generation,
            }),
            SessionState::Unauthenticated => None,
        }
    }

    /// The held access token, if any
    pub async fn access_token(&self) -> Option<String> {
        self.tokens().await.map(|t| t.access_token)
    }

    /// The held refresh token, if any
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens().await.map(|t| t.refresh_token)
    }

    /// True iff an access token is held
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.tokens().is_some()
    }

    /// Current phase, `RefreshInFlight` while somebody holds the refresh gate
    pub async fn phase(&self) -> SessionPhase {
        if self.refresh_gate.try_lock().is_err() {
            return SessionPhase::RefreshInFlight;
        }
        match &*self.state.read().await {
            SessionState::Authenticated { .. } => SessionPhase::Authenticated,
            SessionState::Unauthenticated => SessionPhase::Unauthenticated,
        }
    }

    /// Replaces the session with `tokens`, returning the new generation
    pub async fn set(&self, tokens: TokenPair) -> u64 {
        let mut state = self.state.write().await;
        let generation = self.bump(&mut state);
        *state = SessionState::Authenticated { tokens, generation };
        generation
    }

    /// Drops both tokens
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        self.bump(&mut state);
        *state = SessionState::Unauthenticated;
    }

    /// Drops both tokens if the held pair is still the one with `generation`
    pub async fn clear_if_current(&self, generation: Option<u64>) -> bool {
        let mut state = self.state.write().await;
        if generation.is_none() || state.generation() != generation {
            return false;
        }
        self.bump(&mut state);
        *state = SessionState::Unauthenticated;
        true
    }

    /// Waits for the refresh gate for an explicit refresh
    ///
    /// Returns `None` when no refresh token is held.
    pub async fn begin_refresh(&self) -> Option<RefreshTicket<'_>> {
        let gate = self.refresh_gate.lock().await;
        let state = self.state.read().await;
        match &*state {
            SessionState::Authenticated { tokens, generation } => Some(RefreshTicket {
                store: self,
                refresh_token: tokens.refresh_token.clone(),
                generation: *generation,
                _gate: gate,
            }),
            SessionState::Unauthenticated => None,
        }
    }

    /// Waits for the refresh gate after a request built at `seen` got a 401
    ///
    /// If the generation moved on while waiting, another caller already
    /// refreshed and the request should simply be sent again.
    pub async fn begin_recovery(&self, seen: Option<u64>) -> RefreshSlot<'_> {
        let gate = self.refresh_gate.lock().await;
        let state = self.state.read().await;
        match &*state {
            SessionState::Authenticated { generation, .. } if Some(*generation) != seen => {
                RefreshSlot::Superseded
            }
            SessionState::Authenticated { tokens, generation } => {
                RefreshSlot::Owned(RefreshTicket {
                    store: self,
                    refresh_token: tokens.refresh_token.clone(),
                    generation: *generation,
                    _gate: gate,
                })
            }
            SessionState::Unauthenticated => RefreshSlot::Unavailable,
        }
    }
}
