use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Override for the user-pool API endpoint. Tests point this at a mock
    /// server; unset in production, where the regional endpoint is derived.
    pub endpoint: Option<String>,
    /// Override for the JWKS URL, same purpose as `endpoint`.
    pub jwks_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub cognito: CognitoConfig,
    pub cors: CorsConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default values
            .set_default("environment", "development")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("cognito.region", "us-east-1")?
            .set_default("cognito.user_pool_id", "")?
            .set_default("cognito.client_id", "")?
            .set_default("cognito.client_secret", "")?
            .set_default("cors.allowed_origin", "http://localhost:5173")?
            // Add in settings from the config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in settings from environment variables (with prefix "APP_")
            // E.g., `APP_COGNITO__REGION=eu-west-1` sets `Settings.cognito.region`
            .add_source(
                Environment::with_prefix("app")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        s.try_deserialize()
    }

    /// Base URL of the user-pool API. The regional endpoint unless overridden.
    pub fn cognito_endpoint(&self) -> String {
        match &self.cognito.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.cognito.region),
        }
    }

    /// URL of the pool's published signing-key set.
    pub fn jwks_url(&self) -> String {
        match &self.cognito.jwks_url {
            Some(url) => url.clone(),
            None => format!(
                "https://cognito-idp.{}.amazonaws.com/{}/.well-known/jwks.json",
                self.cognito.region, self.cognito.user_pool_id
            ),
        }
    }

    #[cfg(test)]
    pub fn new_for_test() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("environment", "test")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("cognito.region", "us-east-1")?
            .set_default("cognito.user_pool_id", "us-east-1_testpool")?
            .set_default("cognito.client_id", "testclientid")?
            .set_default("cognito.client_secret", "testsecret")?
            .set_default("cors.allowed_origin", "http://localhost:5173")?
            .add_source(
                Environment::with_prefix("app")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn cleanup_env() {
        env::remove_var("APP_SERVER__PORT");
        env::remove_var("APP_COGNITO__REGION");
        env::remove_var("APP_COGNITO__USER_POOL_ID");
        env::remove_var("APP_COGNITO__CLIENT_ID");
        env::remove_var("APP_COGNITO__CLIENT_SECRET");
        env::remove_var("APP_CORS__ALLOWED_ORIGIN");
    }

    #[test]
    fn test_settings_defaults() {
        cleanup_env();
        let settings = Settings::new_for_test().expect("Failed to load settings");
        assert_eq!(settings.environment, "test");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.cognito.region, "us-east-1");
        assert_eq!(settings.cognito.client_id, "testclientid");
        assert_eq!(settings.cors.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn test_derived_endpoint_and_jwks_url() {
        cleanup_env();
        let settings = Settings::new_for_test().expect("Failed to load settings");
        assert_eq!(
            settings.cognito_endpoint(),
            "https://cognito-idp.us-east-1.amazonaws.com/"
        );
        assert_eq!(
            settings.jwks_url(),
            "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_testpool/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_endpoint_override() {
        cleanup_env();
        let mut settings = Settings::new_for_test().expect("Failed to load settings");
        settings.cognito.endpoint = Some("http://127.0.0.1:9999/".to_string());
        settings.cognito.jwks_url = Some("http://127.0.0.1:9999/jwks.json".to_string());
        assert_eq!(settings.cognito_endpoint(), "http://127.0.0.1:9999/");
        assert_eq!(settings.jwks_url(), "http://127.0.0.1:9999/jwks.json");
    }
}
