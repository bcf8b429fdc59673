//! Runs the dense and sparse adapters side by side on the inference pool.
//!
//! The pool is a semaphore over `spawn_blocking`: each unit of work holds a
//! permit for as long as the model call runs, so at most `inference_workers`
//! calls execute at once and the rest wait their turn.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::dense::DenseAdapter;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{Batch, DenseVector, Embeddings};
use crate::sparse::SparseAdapter;

#[derive(Clone)]
pub struct Dispatcher {
    dense: DenseAdapter,
    sparse: SparseAdapter,
    workers: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(dense: DenseAdapter, sparse: SparseAdapter, config: &EmbeddingConfig) -> Self {
        Self {
            dense,
            sparse,
            workers: Arc::new(Semaphore::new(config.inference_workers.max(1))),
            timeout: config.request_timeout,
        }
    }

    /// Dense and sparse embeddings for the whole batch, or the first error.
    ///
    /// Neither side's result is returned alone.
    pub async fn dispatch(&self, batch: Arc<Batch>) -> EmbeddingResult<Embeddings> {
        let dense_batch = batch.clone();
        let dense = self.dense.clone();
        let dense_task = self.run_blocking("dense", move || dense.embed(&dense_batch));

        let sparse_batch = batch.clone();
        let sparse = self.sparse.clone();
        let sparse_task = self.run_blocking("sparse", move || sparse.embed(&sparse_batch));

        let (dense, sparse) = self
            .with_deadline(async { tokio::try_join!(dense_task, sparse_task) })
            .await?;

        if dense.len() != batch.len() || sparse.len() != batch.len() {
            return Err(EmbeddingError::Reconstruction(format!(
                "batch of {} produced {} dense and {} sparse results",
                batch.len(),
                dense.len(),
                sparse.len()
            )));
        }

        Ok(Embeddings { dense, sparse })
    }

    /// Dense embeddings only, used by the single-item path.
    pub async fn dispatch_dense(&self, batch: Arc<Batch>) -> EmbeddingResult<Vec<DenseVector>> {
        let dense = self.dense.clone();
        self.with_deadline(self.run_blocking("dense", move || dense.embed(&batch)))
            .await
    }

    async fn with_deadline<T>(
        &self,
        work: impl Future<Output = EmbeddingResult<T>>,
    ) -> EmbeddingResult<T> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| EmbeddingError::DeadlineExceeded(limit))?,
            None => work.await,
        }
    }

    /// Wait for a worker permit, then run `f` on the blocking pool.
    ///
    /// The permit travels into the blocking task. If the caller stops
    /// waiting, the call still finishes and only then frees its slot.
    async fn run_blocking<T, F>(&self, stage: &'static str, f: F) -> EmbeddingResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> EmbeddingResult<T> + Send + 'static,
    {
        let permit = self
            .workers
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EmbeddingError::Internal("inference pool is closed".to_string()))?;

        debug!(stage, "Inference task started");

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await?
    }
}
