//! Client for the hosted user-pool API.
//!
//! All account state lives in the remote pool; this module only relays
//! requests and normalizes the provider's error codes.

mod client;
mod error;

pub use client::{AuthTokens, CognitoClient};
pub use error::ProviderError;
