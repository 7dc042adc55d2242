pub mod auth;
pub mod cognito;
pub mod config;
pub mod error;

use std::sync::Arc;
use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{Claims, Decision, ResendGate, TokenVerifier};
pub use cognito::{AuthTokens, CognitoClient, ProviderError};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub cognito: Arc<CognitoClient>,
    pub verifier: Arc<TokenVerifier>,
    pub resend_gate: Arc<ResendGate>,
}

impl AppState {
    pub fn new(config: Settings) -> Self {
        // One connection pool shared by the provider client and the verifier.
        let http = reqwest::Client::new();

        let cognito = CognitoClient::new(
            config.cognito_endpoint(),
            config.cognito.client_id.clone(),
            config.cognito.client_secret.clone(),
            http.clone(),
        );

        let verifier = TokenVerifier::new(
            config.jwks_url(),
            config.cognito.client_id.clone(),
            http,
        );

        Self {
            config: Arc::new(config),
            cognito: Arc::new(cognito),
            verifier: Arc::new(verifier),
            resend_gate: Arc::new(ResendGate::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config);
        assert_eq!(state.config.cognito.client_id, "testclientid");
    }

    #[test]
    fn test_app_state_clone_shares_components() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config);
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.cognito, &cloned.cognito));
        assert!(Arc::ptr_eq(&state.resend_gate, &cloned.resend_gate));
    }
}
