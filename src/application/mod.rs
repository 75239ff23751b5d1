/// Session state machine and token pair
pub mod auth;
/// Session client exposing the account operations
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces implemented by the client
pub mod interfaces;
