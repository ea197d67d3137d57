//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `POSTGRES_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `POSTGRES_SSL_MODE` - `disable`, `allow`, `prefer`, `require`, `verify-ca`,
//!   `verify-full` (default: require)
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 3000)
//! - `DASHBOARD_LISTING_CACHE_TTL_SECS` - Invoice listing cache TTL (default: 300)
//! - `DASHBOARD_LOG_JSON` - Emit JSON logs (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (seeding - DESTRUCTIVE)
//! - `DASHBOARD_SEED_ENABLED` - Expose `GET /seed` (default: false)
//! - `DASHBOARD_SEED_TOKEN` - Bearer token required by `GET /seed` (min 32 chars, high entropy)
//! - `DASHBOARD_SEED_CONCURRENCY` - Concurrent password hashes while seeding (default: 4)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgSslMode;
use thiserror::Error;

const MIN_SEED_TOKEN_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_SEED_CONCURRENCY: usize = 4;
const DEFAULT_LISTING_CACHE_TTL_SECS: u64 = 300;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Seed route settings
    pub seed: SeedConfig,
    /// How long a rendered invoice listing stays cached
    pub listing_cache_ttl: Duration,
    /// Emit JSON formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Database connection configuration.
///
/// Implements `Debug` manually to redact the connection string.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub url: SecretString,
    /// Transport security required for the connection
    pub ssl_mode: PgSslMode,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// Access control and tuning for the destructive seed operation.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SeedConfig {
    /// Whether `GET /seed` is reachable at all
    pub enabled: bool,
    /// Bearer token the request must present, if set
    pub token: Option<SecretString>,
    /// Maximum number of passwords hashed at once
    pub hash_concurrency: NonZeroUsize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            token: None,
            hash_concurrency: NonZeroUsize::new(DEFAULT_SEED_CONCURRENCY)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("enabled", &self.enabled)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("hash_concurrency", &self.hash_concurrency)
            .finish()
    }
}

impl SeedConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let enabled = env.bool_or("DASHBOARD_SEED_ENABLED", false)?;

        let token = env
            .optional("DASHBOARD_SEED_TOKEN")
            .map(|token| {
                validate_seed_token(&token, "DASHBOARD_SEED_TOKEN")?;
                Ok::<_, ConfigError>(SecretString::from(token))
            })
            .transpose()?;

        let hash_concurrency = env
            .parsed_or("DASHBOARD_SEED_CONCURRENCY", DEFAULT_SEED_CONCURRENCY)?;
        let hash_concurrency = NonZeroUsize::new(hash_concurrency).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "DASHBOARD_SEED_CONCURRENCY".to_string(),
                "must be greater than zero".to_string(),
            )
        })?;

        Ok(Self {
            enabled,
            token,
            hash_concurrency,
        })
    }
}

impl DatabaseConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        // POSTGRES_URL first, then the generic DATABASE_URL used by most hosts
        let url = env
            .optional("POSTGRES_URL")
            .or_else(|| env.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("POSTGRES_URL".to_string()))?;

        let ssl_mode = env
            .or_default("POSTGRES_SSL_MODE", "require")
            .parse::<PgSslMode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("POSTGRES_SSL_MODE".to_string(), e.to_string())
            })?;

        Ok(Self { url, ssl_mode })
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the seed token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`DashboardConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let database = DatabaseConfig::load(&env)?;
        let host = env.parsed_or("DASHBOARD_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parsed_or("DASHBOARD_PORT", 3000_u16)?;
        let seed = SeedConfig::load(&env)?;
        let listing_cache_ttl = Duration::from_secs(env.parsed_or(
            "DASHBOARD_LISTING_CACHE_TTL_SECS",
            DEFAULT_LISTING_CACHE_TTL_SECS,
        )?);
        let log_json = env.bool_or("DASHBOARD_LOG_JSON", false)?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database,
            host,
            port,
            seed,
            listing_cache_ttl,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment variable lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
    fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got {other:?}"),
            )),
        }
    }
}

/// Validate the seed token: length, placeholder blocklist, entropy.
fn validate_seed_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    if token.len() < MIN_SEED_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SEED_TOKEN_LENGTH,
                token.len()
            ),
        ));
    }
    validate_secret_strength(token, var_name)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Compare a presented bearer token with the configured one.
///
/// The comparison touches every byte so the time taken does not reveal the
/// length of the matching prefix.
#[must_use]
pub fn token_matches(expected: &SecretString, presented: &str) -> bool {
    let expected = expected.expose_secret().as_bytes();
    let presented = presented.as_bytes();
    if expected.len() != presented.len() {
        return false;
    }
    expected
        .iter()
        .zip(presented)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_TOKEN: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

    fn load(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("POSTGRES_URL", "postgres://localhost/dashboard")]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(matches!(config.database.ssl_mode, PgSslMode::Require));
        assert!(!config.seed.enabled);
        assert!(config.seed.token.is_none());
        assert_eq!(config.seed.hash_concurrency.get(), DEFAULT_SEED_CONCURRENCY);
        assert_eq!(config.listing_cache_ttl, Duration::from_secs(300));
        assert!(!config.log_json);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]).unwrap();
        assert_eq!(config.database.url.expose_secret(), "postgres://fallback/db");

        let config = load(&[
            ("POSTGRES_URL", "postgres://primary/db"),
            ("DATABASE_URL", "postgres://fallback/db"),
        ])
        .unwrap();
        assert_eq!(config.database.url.expose_secret(), "postgres://primary/db");
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "POSTGRES_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("POSTGRES_URL", "postgres://x/y"), ("DASHBOARD_PORT", "http")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "DASHBOARD_PORT"));
    }

    #[test]
    fn test_invalid_ssl_mode() {
        let err = load(&[("POSTGRES_URL", "postgres://x/y"), ("POSTGRES_SSL_MODE", "always")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "POSTGRES_SSL_MODE"));
    }

    #[test]
    fn test_ssl_mode_override() {
        let config = load(&[("POSTGRES_URL", "postgres://x/y"), ("POSTGRES_SSL_MODE", "disable")])
            .unwrap();
        assert!(matches!(config.database.ssl_mode, PgSslMode::Disable));
    }

    #[test]
    fn test_seed_enabled_flag() {
        for (raw, expected) in [("true", true), ("1", true), ("YES", true), ("off", false)] {
            let config =
                load(&[("POSTGRES_URL", "postgres://x/y"), ("DASHBOARD_SEED_ENABLED", raw)])
                    .unwrap();
            assert_eq!(config.seed.enabled, expected, "{raw}");
        }

        let err = load(&[("POSTGRES_URL", "postgres://x/y"), ("DASHBOARD_SEED_ENABLED", "maybe")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_seed_concurrency_must_be_positive() {
        let err = load(&[
            ("POSTGRES_URL", "postgres://x/y"),
            ("DASHBOARD_SEED_CONCURRENCY", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_seed_token_accepted() {
        let config = load(&[
            ("POSTGRES_URL", "postgres://x/y"),
            ("DASHBOARD_SEED_TOKEN", STRONG_TOKEN),
        ])
        .unwrap();
        assert!(config.seed.token.is_some());
    }

    #[test]
    fn test_seed_token_too_short() {
        let err = load(&[("POSTGRES_URL", "postgres://x/y"), ("DASHBOARD_SEED_TOKEN", "aB3$xY9!")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_seed_token_placeholder() {
        let err = load(&[
            ("POSTGRES_URL", "postgres://x/y"),
            ("DASHBOARD_SEED_TOKEN", "your-seed-token-goes-here-please-1234"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy(STRONG_TOKEN) > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"a".repeat(40), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_token_matches() {
        let expected = SecretString::from(STRONG_TOKEN);
        assert!(token_matches(&expected, STRONG_TOKEN));
        assert!(!token_matches(&expected, "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6&"));
        assert!(!token_matches(&expected, "short"));
        assert!(!token_matches(&expected, ""));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[
            ("POSTGRES_URL", "postgres://user:hunter2@db/dashboard"),
            ("DASHBOARD_SEED_TOKEN", STRONG_TOKEN),
        ])
        .unwrap();

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
        assert!(!debug_output.contains(STRONG_TOKEN));
    }
}
