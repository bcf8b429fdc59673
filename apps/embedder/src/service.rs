//! Embedding gRPC service implementation
//!
//! Handlers leverage the From conversions defined in
//! `domain_embedding::conversions`.

use std::sync::Arc;

use domain_embedding::{EmbeddingError, EmbeddingService};
use grpc_server::request_id;
use protos::embedding::v1::{
    DenseEmbedding, Embeddings, Queries, Query,
    embedding_service_server::EmbeddingService as EmbeddingServiceTrait,
};
use tonic::{Request, Response, Status};
use tracing::{error, info, warn};

/// gRPC service implementation for embedding operations
///
/// Wraps the domain EmbeddingService and handles proto ↔ domain conversions.
#[derive(Clone)]
pub struct EmbeddingServiceImpl {
    service: Arc<EmbeddingService>,
}

impl EmbeddingServiceImpl {
    pub fn new(service: EmbeddingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Log a failed call once and turn it into a status.
fn failure(request_id: &str, operation: &'static str, err: EmbeddingError) -> Status {
    match &err {
        EmbeddingError::Validation(_) => {
            warn!(request_id, operation, error = %err, "Rejected embedding request");
        }
        _ => {
            error!(request_id, operation, error = %err, "Embedding request failed");
        }
    }
    Status::from(err)
}

#[tonic::async_trait]
impl EmbeddingServiceTrait for EmbeddingServiceImpl {
    async fn create_embeddings(
        &self,
        request: Request<Queries>,
    ) -> Result<Response<Embeddings>, Status> {
        let request_id = request_id(&request).to_owned();
        let req = request.into_inner();

        info!(request_id = %request_id, count = req.queries.len(), "CreateEmbeddings received");

        let embeddings = self
            .service
            .create_embeddings(req.queries)
            .await
            .map_err(|e| failure(&request_id, "CreateEmbeddings", e))?;

        info!(
            request_id = %request_id,
            count = embeddings.len(),
            dimension = embeddings.dense_dimension().unwrap_or_default(),
            "CreateEmbeddings completed"
        );

        Ok(Response::new(embeddings.into()))
    }

    async fn create_dense_embedding(
        &self,
        request: Request<Query>,
    ) -> Result<Response<DenseEmbedding>, Status> {
        let request_id = request_id(&request).to_owned();
        let req = request.into_inner();

        info!(request_id = %request_id, "CreateDenseEmbedding received");

        let vector = self
            .service
            .create_dense_embedding(req.query)
            .await
            .map_err(|e| failure(&request_id, "CreateDenseEmbedding", e))?;

        info!(
            request_id = %request_id,
            dimension = vector.dimension(),
            "CreateDenseEmbedding completed"
        );

        Ok(Response::new(vector.into()))
    }
}
