//! Server configuration from environment variables.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Secret used to sign and validate bearer tokens (HS256).
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expiry_hours: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_SECRET`: Token signing secret (default: a dev-only value)
    /// - `JWT_EXPIRY_HOURS`: Token lifetime (default: 24)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: format!("not a valid port number: {}", s),
            })?,
            Err(_) => 3000,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "blocknote-dev-secret".to_string());

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            jwt_secret,
            jwt_expiry_hours,
        })
    }

    /// Whether the signing secret is the built-in development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == "blocknote-dev-secret"
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // None of these variables are set in the test environment.
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.jwt_expiry_hours, 24);
        assert!(config.uses_dev_secret());
    }
}
