//! Authentication for the gateway: the provider secret hash, bearer-token
//! verification against the pool's JWKS, the resend cooldown and the HTTP
//! handlers that tie them to the remote user pool.

pub mod handlers;
mod rate_limit;
mod secret_hash;
mod verifier;

pub use rate_limit::{Decision, ResendGate};
pub use secret_hash::compute_secret_hash;
pub use verifier::{Claims, TokenVerifier};
