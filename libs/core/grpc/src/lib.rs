//! # gRPC Server Library
//!
//! Shared plumbing for the gRPC services in this workspace: environment-driven
//! server configuration, health reporting, startup logging, graceful shutdown
//! and a request-id interceptor.
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_server::{GrpcServer, RequestIdInterceptor, ServerConfig, shutdown_signal};
//! use protos::embedding::v1::embedding_service_server::{EmbeddingServiceServer, SERVICE_NAME};
//! use tonic::service::interceptor::InterceptedService;
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = GrpcServer::health_service();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(InterceptedService::new(EmbeddingServiceServer::new(my_impl), RequestIdInterceptor))
//!     .serve_with_shutdown(config.socket_addr()?, shutdown_signal())
//!     .await?;
//! ```

pub mod error;
pub mod interceptors;
pub mod server;
pub mod shutdown;

pub use error::{GrpcError, GrpcResult};
pub use interceptors::{REQUEST_ID_HEADER, RequestIdInterceptor, request_id};
pub use server::{ConcurrencyLimited, GrpcServer, ServerConfig};
pub use shutdown::shutdown_signal;
