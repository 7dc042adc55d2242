use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::compute_secret_hash;
use super::ProviderError;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Tokens issued by the pool. `refresh_token` is only present for the
/// password flow; refresh-token auth returns id/access only.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Thin client for the user-pool API. All calls are unauthenticated
/// app-client operations carrying the computed secret hash.
pub struct CognitoClient {
    endpoint: String,
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
}

impl CognitoClient {
    pub fn new(
        endpoint: String,
        client_id: String,
        client_secret: String,
        http: reqwest::Client,
    ) -> Self {
        Self {
            endpoint,
            client_id,
            client_secret,
            http,
        }
    }

    fn secret_hash(&self, username: &str) -> String {
        compute_secret_hash(username, &self.client_id, &self.client_secret)
    }

    /// USER_PASSWORD_AUTH: exchange email+password for a token triple.
    pub async fn initiate_auth_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ProviderError> {
        let body = json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": self.client_id,
            "AuthParameters": {
                "USERNAME": email,
                "PASSWORD": password,
                "SECRET_HASH": self.secret_hash(email),
            },
        });

        let response = self.call("InitiateAuth", body).await?;
        Self::parse_auth_result(&response)
    }

    /// REFRESH_TOKEN_AUTH: exchange a refresh token for fresh id/access tokens.
    pub async fn initiate_auth_refresh(
        &self,
        refresh_token: &str,
    ) -> Result<AuthTokens, ProviderError> {
        let body = json!({
            "AuthFlow": "REFRESH_TOKEN_AUTH",
            "ClientId": self.client_id,
            "AuthParameters": {
                "REFRESH_TOKEN": refresh_token,
            },
        });

        let response = self.call("InitiateAuth", body).await?;
        Self::parse_auth_result(&response)
    }

    /// Create a new account; the pool emails a confirmation code.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ProviderError> {
        let body = json!({
            "ClientId": self.client_id,
            "Username": email,
            "Password": password,
            "SecretHash": self.secret_hash(email),
            "UserAttributes": [
                {"Name": "email", "Value": email},
                {"Name": "name", "Value": name},
            ],
        });

        self.call("SignUp", body).await?;
        Ok(())
    }

    /// Confirm a pending account with its emailed code.
    pub async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), ProviderError> {
        let body = json!({
            "ClientId": self.client_id,
            "Username": email,
            "ConfirmationCode": code,
            "SecretHash": self.secret_hash(email),
        });

        self.call("ConfirmSignUp", body).await?;
        Ok(())
    }

    /// Ask the pool to email a fresh confirmation code.
    pub async fn resend_confirmation_code(&self, email: &str) -> Result<(), ProviderError> {
        let body = json!({
            "ClientId": self.client_id,
            "Username": email,
            "SecretHash": self.secret_hash(email),
        });

        self.call("ResendConfirmationCode", body).await?;
        Ok(())
    }

    async fn call(&self, operation: &str, body: Value) -> Result<Value, ProviderError> {
        debug!("Calling provider operation {}", operation);

        let payload =
            serde_json::to_vec(&body).map_err(|e| ProviderError::Transport(e.to_string()))?;

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Amz-Target", format!("{}.{}", TARGET_PREFIX, operation))
            .header("Content-Type", AMZ_JSON)
            .body(payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(payload);
        }

        let error_type = payload["__type"].as_str().unwrap_or("Unknown").to_string();
        let message = payload["message"]
            .as_str()
            .or_else(|| payload["Message"].as_str())
            .unwrap_or_default()
            .to_string();

        Err(ProviderError::from_response(&error_type, message))
    }

    fn parse_auth_result(response: &Value) -> Result<AuthTokens, ProviderError> {
        let result = &response["AuthenticationResult"];

        let id_token = result["IdToken"].as_str();
        let access_token = result["AccessToken"].as_str();

        match (id_token, access_token) {
            (Some(id_token), Some(access_token)) => Ok(AuthTokens {
                id_token: id_token.to_string(),
                access_token: access_token.to_string(),
                refresh_token: result["RefreshToken"].as_str().map(str::to_string),
            }),
            _ => Err(ProviderError::Other(
                "MalformedResponse".to_string(),
                "authentication result missing tokens".to_string(),
            )),
        }
    }
}
