//! gRPC Server Builder
//!
//! Utilities for creating gRPC servers with health checks, compression and
//! standard limits.
//!
//! ```ignore
//! use grpc_server::server::{GrpcServer, ServerConfig};
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = GrpcServer::health_service();
//!
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .tcp_keepalive(Some(config.keepalive()))
//!     .add_service(health_service)
//!     .add_service(my_service)
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;
mod limit;

pub use builder::GrpcServer;
pub use config::ServerConfig;
pub use limit::ConcurrencyLimited;
