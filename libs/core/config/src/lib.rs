//! Environment-driven configuration shared by every service in the workspace.
//!
//! Each config struct implements [`FromEnv`] and reads its own variables, so
//! an application config is just a composition of the pieces it needs:
//!
//! ```ignore
//! let server = ServerConfig::from_env()?;
//! let database = PostgresConfig::from_env()?;
//! ```

pub mod server;
pub mod tracing;

use std::{env, fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

impl ConfigError {
    pub fn parse(key: &str, details: impl fmt::Display) -> Self {
        Self::ParseError {
            key: key.to_string(),
            details: details.to_string(),
        }
    }
}

/// Deployment flavour, selected by `APP_ENV`.
///
/// Anything other than `production` (case-insensitive) is treated as
/// development, so a missing or misspelled value never enables the
/// stricter production behaviour by accident.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .map(|value| Self::from_name(&value))
            .unwrap_or_default()
    }

    fn from_name(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static application identity reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
///
/// ```ignore
/// let info = core_config::app_info!();
/// ```
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Read `key` (falling back to `default`) and parse it into `T`.
///
/// The error names the variable, which is what operators need when a
/// deployment refuses to start.
pub fn env_parse<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env_or_default(key, default)
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::parse(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_any_case() {
        for value in ["production", "PRODUCTION", " Production "] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_value_is_development() {
        temp_env::with_var("APP_ENV", Some("prod"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::default().as_str(), "development");
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_env_required_missing_names_variable() {
        temp_env::with_var_unset("PRODUCTS_TEST_REQUIRED", || {
            let err = env_required("PRODUCTS_TEST_REQUIRED").unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "PRODUCTS_TEST_REQUIRED"));
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset() {
        temp_env::with_var_unset("PRODUCTS_TEST_LIMIT", || {
            let value: u32 = env_parse("PRODUCTS_TEST_LIMIT", "25").unwrap();
            assert_eq!(value, 25);
        });
    }

    #[test]
    fn test_env_parse_trims_value() {
        temp_env::with_var("PRODUCTS_TEST_FLAG", Some(" false "), || {
            let value: bool = env_parse("PRODUCTS_TEST_FLAG", "true").unwrap();
            assert!(!value);
        });
    }

    #[test]
    fn test_env_parse_reports_key_on_failure() {
        temp_env::with_var("PRODUCTS_TEST_LIMIT", Some("lots"), || {
            let err = env_parse::<u32>("PRODUCTS_TEST_LIMIT", "25").unwrap_err();
            let message = err.to_string();
            assert!(message.contains("PRODUCTS_TEST_LIMIT"));
            assert!(message.contains("invalid digit"));
        });
    }
}
