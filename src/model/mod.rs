/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Access token claims decoding
pub mod auth;
/// HTTP dispatch with one refresh-and-retry cycle
pub mod http;
/// Request models for API calls
pub mod requests;
/// Response models from API calls
pub mod responses;
