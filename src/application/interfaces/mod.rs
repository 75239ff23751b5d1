/// Account operations interface
pub mod account;
