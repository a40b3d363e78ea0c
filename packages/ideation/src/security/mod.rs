//! Credential handling for upstream API keys.

pub mod credentials;

pub use credentials::{ApiCredentials, SecretString};
