use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use crate::error::AuthError;

/// Claims extracted from a verified identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    /// Group memberships the pool attaches to the token; absent for users
    /// outside any group.
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Validates bearer tokens against the pool's published signing keys.
///
/// Keys are fetched on every call; the verifier holds no cache. A token is
/// accepted only if its signature matches a key from the set, its audience
/// equals the configured app client id, and it has not expired.
pub struct TokenVerifier {
    jwks_url: String,
    client_id: String,
    http: reqwest::Client,
}

impl TokenVerifier {
    pub fn new(jwks_url: String, client_id: String, http: reqwest::Client) -> Self {
        Self {
            jwks_url,
            client_id,
            http,
        }
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|key| key.kid == kid)
            .ok_or(AuthError::InvalidToken)?;

        let decoding_key =
            DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| AuthError::InvalidToken)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.leeway = 0;

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
                _ => Err(AuthError::InvalidToken),
            },
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        response.json().await.map_err(|_| AuthError::InvalidToken)
    }
}
