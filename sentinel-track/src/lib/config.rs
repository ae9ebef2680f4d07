use std::env;

use auth::ConfigurationError;
use auth::SigningConfig;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
    pub leeway_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl JwtConfig {
    /// Build the immutable signing configuration shared by signer and validator.
    ///
    /// # Errors
    /// * `ConfigurationError` - Key, issuer or audience missing, or an
    ///   expiry / leeway outside the accepted range
    pub fn signing_config(&self) -> Result<SigningConfig, ConfigurationError> {
        let expiry = Duration::try_minutes(self.expiration_minutes).ok_or(
            ConfigurationError::InvalidExpiry(self.expiration_minutes.saturating_mul(60)),
        )?;
        let leeway = Duration::try_seconds(self.leeway_seconds)
            .ok_or(ConfigurationError::InvalidLeeway(self.leeway_seconds))?;

        SigningConfig::new(self.key.as_bytes(), self.issuer.as_str(), self.audience.as_str())?
            .with_expiry(expiry)?
            .with_leeway(leeway)
    }
}

/// Accounts created at startup when absent.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Deserialize, Clone)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("role", &self.role)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__KEY, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults for port, token expiry and leeway
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default(
                "jwt.expiration_minutes",
                SigningConfig::DEFAULT_EXPIRY_MINUTES,
            )?
            .set_default("jwt.leeway_seconds", 0)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__KEY=... overrides jwt.key
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            key: "config_test_secret_at_least_32_bytes!".to_string(),
            issuer: "sentinel-track".to_string(),
            audience: "sentinel-track-clients".to_string(),
            expiration_minutes: 90,
            leeway_seconds: 5,
        }
    }

    #[test]
    fn test_signing_config_from_jwt_section() {
        let signing = jwt_config().signing_config().unwrap();

        assert_eq!(signing.issuer(), "sentinel-track");
        assert_eq!(signing.audience(), "sentinel-track-clients");
        assert_eq!(signing.expiry(), Duration::minutes(90));
        assert_eq!(signing.leeway(), Duration::seconds(5));
    }

    #[test]
    fn test_empty_key_is_configuration_error() {
        let mut config = jwt_config();
        config.key = String::new();

        assert_eq!(
            config.signing_config().unwrap_err(),
            ConfigurationError::MissingKey
        );
    }

    #[test]
    fn test_zero_expiry_is_configuration_error() {
        let mut config = jwt_config();
        config.expiration_minutes = 0;

        assert_eq!(
            config.signing_config().unwrap_err(),
            ConfigurationError::InvalidExpiry(0)
        );
    }

    #[test]
    fn test_out_of_range_durations_are_configuration_errors() {
        let mut config = jwt_config();
        config.expiration_minutes = i64::MAX;
        assert!(matches!(
            config.signing_config(),
            Err(ConfigurationError::InvalidExpiry(_))
        ));

        let mut config = jwt_config();
        config.expiration_minutes = 200_000_000_000;
        assert!(matches!(
            config.signing_config(),
            Err(ConfigurationError::InvalidExpiry(_))
        ));

        let mut config = jwt_config();
        config.leeway_seconds = i64::MAX;
        assert_eq!(
            config.signing_config().unwrap_err(),
            ConfigurationError::InvalidLeeway(i64::MAX)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let output = format!("{:?}", jwt_config());
        assert!(!output.contains("config_test_secret"));

        let seed = SeedUser {
            username: "admin".to_string(),
            email: "admin@sentinel.example".to_string(),
            password: "seed-password".to_string(),
            role: "admin".to_string(),
        };
        assert!(!format!("{:?}", seed).contains("seed-password"));
    }

    #[test]
    fn test_deserialize_from_toml_source() {
        let configuration = ConfigBuilder::builder()
            .set_default("jwt.expiration_minutes", 60)
            .unwrap()
            .set_default("jwt.leeway_seconds", 0)
            .unwrap()
            .add_source(config::File::from_str(
                r#"
                [server]
                http_port = 9090

                [jwt]
                key = "toml_secret_at_least_32_bytes_long!"
                issuer = "sentinel-track"
                audience = "sentinel-track-clients"

                [[seed.users]]
                username = "admin"
                email = "admin@sentinel.example"
                password = "admin-pass"
                role = "admin"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.jwt.expiration_minutes, 60);
        assert_eq!(config.seed.users.len(), 1);
        assert_eq!(config.seed.users[0].role, "admin");
    }
}
