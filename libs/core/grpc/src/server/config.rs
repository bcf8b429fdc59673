//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse};

use crate::error::{GrpcError, GrpcResult};

const DEFAULT_HOST: &str = "[::]";
const DEFAULT_PORT: u16 = 50051;
const DEFAULT_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024;
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;

/// Configuration for gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: [::], all interfaces)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum message size for decoding (default: 8MB)
    pub max_decoding_message_size: usize,
    /// Maximum message size for encoding (default: 8MB)
    pub max_encoding_message_size: usize,
    /// TCP keepalive interval in seconds (default: 60)
    pub keepalive_secs: u64,
    /// Requests handled at once across all connections; the rest wait (default: 10)
    pub max_concurrent_requests: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            keepalive_secs: 60,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: [::])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_COMPRESSION` (default: true)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 8388608 / 8MB)
    /// - `GRPC_MAX_CONCURRENT_REQUESTS` (default: 10)
    fn from_env() -> Result<Self, ConfigError> {
        let max_message_size = env_parse("GRPC_MAX_MESSAGE_SIZE", DEFAULT_MAX_MESSAGE_SIZE)?;
        let max_concurrent_requests =
            env_parse("GRPC_MAX_CONCURRENT_REQUESTS", DEFAULT_MAX_CONCURRENT_REQUESTS)?;
        if max_concurrent_requests == 0 {
            return Err(ConfigError::ParseError {
                key: "GRPC_MAX_CONCURRENT_REQUESTS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host: env_or_default("GRPC_HOST", DEFAULT_HOST),
            port: env_parse("GRPC_PORT", DEFAULT_PORT)?,
            enable_compression: env_flag("GRPC_COMPRESSION", true)?,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
            keepalive_secs: 60,
            max_concurrent_requests,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> GrpcResult<Self> {
        Ok(<Self as FromEnv>::from_env()?)
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Set maximum message size.
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    /// Set the request concurrency limit.
    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    /// TCP keepalive as a duration, for `Server::builder().tcp_keepalive`.
    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        let addr = self.addr_string();
        addr.parse()
            .map_err(|source| GrpcError::InvalidAddress { addr, source })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
