/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

/// Reads and parses an environment variable, falling back to `default` when it is
/// unset or does not parse
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|e| {
            error!("Failed to parse {}: {:?}, using default", env_var, e);
            default
        }),
        Err(_) => default,
    }
}

/// Reads an environment variable as a non-empty string
///
/// Blank values are treated as unset so that `AUTH_TENANT_ID=` in a `.env`
/// file does not produce an empty tenant id.
pub fn get_env_string(env_var: &str) -> Option<String> {
    env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a duration expressed in whole seconds
pub fn get_env_secs_or_default(env_var: &str, default_secs: u64) -> Duration {
    Duration::from_secs(get_env_or_default(env_var, default_secs))
}
