pub mod tracing;

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Failed to load env file '{path}': {details}")]
    EnvFile { path: String, details: String },
}

/// Application environment (dev = local, prod = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Load the local override file before anything reads the environment.
///
/// The file is `.env` in the working directory unless `ENV_FILE` points
/// elsewhere. Variables already present in the process environment win over
/// the file. A missing file is not an error; `Ok(None)` is returned.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    let path = env_or_default("ENV_FILE", ".env");

    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(PathBuf::from(path))),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(ConfigError::EnvFile {
            path,
            details: err.to_string(),
        }),
    }
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// A value that is set but fails to parse is an error rather than a silent
/// fallback.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

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
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_default_and_value() {
        temp_env::with_var_unset("PARSE_ME", || {
            assert_eq!(env_parse("PARSE_ME", 7u16).unwrap(), 7);
        });
        temp_env::with_var("PARSE_ME", Some(" 42 "), || {
            assert_eq!(env_parse("PARSE_ME", 7u16).unwrap(), 42);
        });
    }

    #[test]
    fn test_env_parse_invalid_value_is_error() {
        temp_env::with_var("PARSE_ME_BAD", Some("99999"), || {
            let err = env_parse::<u16>("PARSE_ME_BAD", 1).unwrap_err();
            assert!(err.to_string().contains("PARSE_ME_BAD"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("FLAG_ON", Some("Yes"), || {
            assert!(env_flag("FLAG_ON", false).unwrap());
        });
        temp_env::with_var("FLAG_OFF", Some("0"), || {
            assert!(!env_flag("FLAG_OFF", true).unwrap());
        });
        temp_env::with_var("FLAG_BAD", Some("maybe"), || {
            assert!(env_flag("FLAG_BAD", true).is_err());
        });
    }

    #[test]
    fn test_load_env_file_missing_is_not_an_error() {
        temp_env::with_var("ENV_FILE", Some("/definitely/not/here/.env"), || {
            assert!(load_env_file().unwrap().is_none());
        });
    }

    #[test]
    fn test_load_env_file_does_not_override_process_env() {
        let path = env::temp_dir().join(format!("core_config_test_{}.env", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "CORE_CONFIG_FROM_FILE=file").unwrap();
        writeln!(file, "CORE_CONFIG_ALREADY_SET=file").unwrap();
        drop(file);

        temp_env::with_vars(
            [
                ("ENV_FILE", Some(path.to_str().unwrap())),
                ("CORE_CONFIG_FROM_FILE", None),
                ("CORE_CONFIG_ALREADY_SET", Some("process")),
            ],
            || {
                let loaded = load_env_file().unwrap();
                assert_eq!(loaded.as_deref(), Some(path.as_path()));
                assert_eq!(env::var("CORE_CONFIG_FROM_FILE").unwrap(), "file");
                assert_eq!(env::var("CORE_CONFIG_ALREADY_SET").unwrap(), "process");
            },
        );

        let _ = std::fs::remove_file(&path);
    }
}
