use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

pub const DEFAULT_DENSE_MODEL: &str = "BAAI/bge-small-en-v1.5";
pub const DEFAULT_SPARSE_MODEL: &str = "prithivida/Splade_PP_en_v1";

const DEFAULT_INFERENCE_WORKERS: usize = 2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DENSE_MAX_LENGTH: usize = 512;

/// What to do with a batch item whose text is blank once the query marker
/// is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyTextPolicy {
    /// Embed it like any other item.
    #[default]
    Allow,
    /// Fail the whole request with invalid-argument before any model runs.
    Reject,
}

impl FromStr for EmptyTextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(EmptyTextPolicy::Allow),
            "reject" => Ok(EmptyTextPolicy::Reject),
            other => Err(format!("expected 'allow' or 'reject', got '{}'", other)),
        }
    }
}

/// Embedding service configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Blocking inference tasks allowed to run at once.
    pub inference_workers: usize,
    /// Per-request deadline; `None` waits indefinitely.
    ///
    /// The clock starts when the request is dispatched, so time spent queued
    /// for an inference worker counts against it.
    pub request_timeout: Option<Duration>,
    pub empty_text_policy: EmptyTextPolicy,
    pub dense_model: String,
    pub sparse_model: String,
    /// Tokenizer truncation for the dense model.
    pub dense_max_length: usize,
    /// Where model files are downloaded; `None` uses the library default.
    pub cache_dir: Option<PathBuf>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            inference_workers: DEFAULT_INFERENCE_WORKERS,
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            empty_text_policy: EmptyTextPolicy::default(),
            dense_model: DEFAULT_DENSE_MODEL.to_string(),
            sparse_model: DEFAULT_SPARSE_MODEL.to_string(),
            dense_max_length: DEFAULT_DENSE_MAX_LENGTH,
            cache_dir: None,
        }
    }
}

impl EmbeddingConfig {
    pub fn with_inference_workers(mut self, workers: usize) -> Self {
        self.inference_workers = workers;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_empty_text_policy(mut self, policy: EmptyTextPolicy) -> Self {
        self.empty_text_policy = policy;
        self
    }
}

impl FromEnv for EmbeddingConfig {
    /// Reads `INFERENCE_WORKERS`, `REQUEST_TIMEOUT_SECS` (`0` disables the
    /// deadline), `EMPTY_TEXT_POLICY`, `DENSE_MODEL`, `SPARSE_MODEL`,
    /// `DENSE_MAX_LENGTH` and `MODEL_CACHE_DIR`.
    fn from_env() -> Result<Self, ConfigError> {
        let inference_workers = env_parse("INFERENCE_WORKERS", DEFAULT_INFERENCE_WORKERS)?;
        if inference_workers == 0 {
            return Err(ConfigError::ParseError {
                key: "INFERENCE_WORKERS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let timeout_secs = env_parse("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let cache_dir = std::env::var("MODEL_CACHE_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            inference_workers,
            request_timeout,
            empty_text_policy: env_parse("EMPTY_TEXT_POLICY", EmptyTextPolicy::default())?,
            dense_model: env_or_default("DENSE_MODEL", DEFAULT_DENSE_MODEL),
            sparse_model: env_or_default("SPARSE_MODEL", DEFAULT_SPARSE_MODEL),
            dense_max_length: env_parse("DENSE_MAX_LENGTH", DEFAULT_DENSE_MAX_LENGTH)?,
            cache_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 7] = [
        "INFERENCE_WORKERS",
        "REQUEST_TIMEOUT_SECS",
        "EMPTY_TEXT_POLICY",
        "DENSE_MODEL",
        "SPARSE_MODEL",
        "DENSE_MAX_LENGTH",
        "MODEL_CACHE_DIR",
    ];

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(KEYS, || {
            let config = EmbeddingConfig::from_env().unwrap();
            assert_eq!(config.inference_workers, 2);
            assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
            assert_eq!(config.empty_text_policy, EmptyTextPolicy::Allow);
            assert_eq!(config.dense_model, DEFAULT_DENSE_MODEL);
            assert_eq!(config.sparse_model, DEFAULT_SPARSE_MODEL);
            assert_eq!(config.dense_max_length, 512);
            assert!(config.cache_dir.is_none());
        });
    }

    #[test]
    fn test_from_env_custom_values() {
        temp_env::with_vars(
            [
                ("INFERENCE_WORKERS", Some("4")),
                ("REQUEST_TIMEOUT_SECS", Some("0")),
                ("EMPTY_TEXT_POLICY", Some("Reject")),
                ("MODEL_CACHE_DIR", Some("/tmp/models")),
            ],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config.inference_workers, 4);
                assert_eq!(config.request_timeout, None);
                assert_eq!(config.empty_text_policy, EmptyTextPolicy::Reject);
                assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/models")));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_zero_workers() {
        temp_env::with_var("INFERENCE_WORKERS", Some("0"), || {
            let err = EmbeddingConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("INFERENCE_WORKERS"));
        });
    }

    #[test]
    fn test_from_env_rejects_unknown_policy() {
        temp_env::with_var("EMPTY_TEXT_POLICY", Some("sometimes"), || {
            let err = EmbeddingConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("EMPTY_TEXT_POLICY"));
        });
    }
}
