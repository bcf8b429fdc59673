use core_config::ConfigError;
use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors that can occur while configuring a gRPC server
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Host/port pair does not form a socket address
  #[error("Invalid server address '{addr}': {source}")]
  InvalidAddress {
    addr: String,
    #[source]
    source: std::net::AddrParseError,
  },

  /// Configuration could not be read from the environment
  #[error(transparent)]
  Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_error_is_transparent() {
    let err: GrpcError = ConfigError::ParseError {
      key: "GRPC_PORT".to_string(),
      details: "invalid digit".to_string(),
    }
    .into();
    assert_eq!(
      err.to_string(),
      "Failed to parse environment variable 'GRPC_PORT': invalid digit"
    );
  }
}
