use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory of static front-end files served as the router fallback.
    pub static_dir: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// External conversational process settings.
    pub conversation: ConversationConfig,
}

/// How to launch the conversational reply process.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Interpreter or executable to run (default: `python3`).
    pub program: String,
    /// Script passed to the program before the user input.
    pub script: String,
    /// Kill the process after this long (default: 60s).
    pub timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `STATIC_DIR`            | unset                   |
    /// | `CONVERSE_PROGRAM`      | `python3`               |
    /// | `CONVERSE_SCRIPT`       | `scripts/converse.py`   |
    /// | `CONVERSE_TIMEOUT_SECS` | `60`                    |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values or a missing `JWT_SECRET`, so
    /// misconfiguration fails fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let converse_timeout_secs: u64 = std::env::var("CONVERSE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("CONVERSE_TIMEOUT_SECS must be a valid u64");

        let conversation = ConversationConfig {
            program: std::env::var("CONVERSE_PROGRAM").unwrap_or_else(|_| "python3".into()),
            script: std::env::var("CONVERSE_SCRIPT")
                .unwrap_or_else(|_| "scripts/converse.py".into()),
            timeout: Duration::from_secs(converse_timeout_secs),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            jwt,
            conversation,
        }
    }
}
