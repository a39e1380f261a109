//! Issue MFA-backed STS session credentials for several sub-profiles from one set of
//! root credentials, and append them as `[profile ...]` blocks to an AWS config file.

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod mfa;
pub mod session;
