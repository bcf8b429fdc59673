//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Local `.env` override and tracing initialization
//! - Model loading (off the async runtime)
//! - Service creation
//! - gRPC server configuration, request pool and startup
//! - Health check service (grpc.health.v1.Health)
//! - Graceful shutdown

use std::future::Future;
use std::sync::Arc;

use core_config::{Environment, FromEnv};
use domain_embedding::{EmbeddingConfig, EmbeddingService, FastEmbedDense, FastEmbedSparse};
use eyre::{Result, WrapErr};
use grpc_server::{
    ConcurrencyLimited, GrpcServer, RequestIdInterceptor, ServerConfig, shutdown_signal,
};
use protos::embedding::v1::embedding_service_server::{EmbeddingServiceServer, SERVICE_NAME};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Server;
use tracing::info;

use crate::service::EmbeddingServiceImpl;

/// Run the gRPC server
///
/// This is the main entry point for server initialization. It:
/// 1. Applies the optional `.env` override and sets up structured logging
/// 2. Loads server and embedding configuration from the environment
/// 3. Loads the dense and sparse models once
/// 4. Binds the listener and serves until Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but cannot be read
/// - Configuration is invalid
/// - A model cannot be loaded
/// - Server binding fails
/// - Server runtime encounters an error
pub async fn run() -> Result<()> {
    core_config::tracing::install_color_eyre();

    // Must happen before anything reads the environment.
    let env_file = core_config::load_env_file().wrap_err("Failed to load .env file")?;

    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment overrides");
    }

    let server_config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    let embedding_config =
        EmbeddingConfig::from_env().wrap_err("Failed to load embedding configuration")?;

    info!(
        dense = %embedding_config.dense_model,
        sparse = %embedding_config.sparse_model,
        "Loading embedding models..."
    );
    let loader_config = embedding_config.clone();
    let (dense, sparse) = tokio::task::spawn_blocking(move || {
        let dense = FastEmbedDense::load(&loader_config)?;
        let sparse = FastEmbedSparse::load(&loader_config)?;
        Ok::<_, domain_embedding::EmbeddingError>((dense, sparse))
    })
    .await
    .wrap_err("Model loading task failed")?
    .wrap_err("Failed to load embedding models")?;

    info!(
        inference_workers = embedding_config.inference_workers,
        request_timeout = ?embedding_config.request_timeout,
        empty_text_policy = ?embedding_config.empty_text_policy,
        "Embedding models ready"
    );

    let service = EmbeddingService::new(Arc::new(dense), Arc::new(sparse), &embedding_config);

    let addr = server_config
        .socket_addr()
        .wrap_err("Invalid server address")?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    serve(listener, service, &server_config, shutdown_signal()).await
}

/// Serve the embedding and health services on `listener` until `shutdown`
/// resolves.
///
/// Health is reported SERVING once the listener is live and NOT_SERVING as
/// soon as shutdown begins; in-flight requests are allowed to finish.
pub async fn serve(
    listener: TcpListener,
    service: EmbeddingService,
    config: &ServerConfig,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .wrap_err("Failed to read listener address")?;

    let (health_reporter, health_service) = GrpcServer::health_service();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
    GrpcServer::log_startup(config, SERVICE_NAME);
    info!(addr = %local_addr, "EmbeddingService listening");

    let mut embedding_server = EmbeddingServiceServer::new(EmbeddingServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if config.enable_compression {
        embedding_server = embedding_server
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let shutdown = async move {
        shutdown.await;
        GrpcServer::set_not_serving(&health_reporter, SERVICE_NAME).await;
    };

    // Only embedding calls count against the request pool.
    let embedding_service = ConcurrencyLimited::new(
        InterceptedService::new(embedding_server, RequestIdInterceptor),
        config.max_concurrent_requests,
    );

    Server::builder()
        .tcp_keepalive(Some(config.keepalive()))
        .add_service(health_service)
        .add_service(embedding_service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
        .wrap_err("gRPC server failed")?;

    info!("Server shut down");
    Ok(())
}
