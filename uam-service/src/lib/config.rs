use std::env;

use auth::SecretKey;
use auth::TokenSettings;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Upper bound on the configured token lifetime (ten years).
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

    /// Build the token settings handed to the service and the auth middleware.
    ///
    /// # Errors
    /// * `Message` - Secret is empty or the lifetime is not in `1..=MAX_EXPIRATION_HOURS`
    pub fn token_settings(&self) -> Result<TokenSettings, ConfigError> {
        let secret = SecretKey::new(self.secret.as_bytes())
            .map_err(|e| ConfigError::Message(format!("jwt.secret: {}", e)))?;

        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        Ok(TokenSettings::new(
            secret,
            Duration::hours(self.expiration_hours),
        ))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 8080, 24 hour tokens, 5 connections)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_hours", TokenSettings::DEFAULT_TTL_HOURS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        // Fail at startup rather than on the first login.
        config.jwt.token_settings()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(secret: &str, expiration_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_hours,
        }
    }

    #[test]
    fn test_token_settings() {
        let settings = jwt("supersecretkey", 24).token_settings().unwrap();

        assert_eq!(settings.secret.as_bytes(), b"supersecretkey");
        assert_eq!(settings.ttl, Duration::hours(24));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = jwt("", 24).token_settings();
        assert!(matches!(result, Err(ConfigError::Message(msg)) if msg.contains("jwt.secret")));
    }

    #[test]
    fn test_expiration_out_of_range_rejected() {
        assert!(jwt("k", 0).token_settings().is_err());
        assert!(jwt("k", -5).token_settings().is_err());
        assert!(jwt("k", JwtConfig::MAX_EXPIRATION_HOURS + 1)
            .token_settings()
            .is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let printed = format!("{:?}", jwt("supersecretkey", 24));
        assert!(!printed.contains("supersecretkey"));
    }
}
