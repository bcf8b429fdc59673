use std::sync::Arc;

use tracing::debug;

use crate::config::{EmbeddingConfig, EmptyTextPolicy};
use crate::dense::DenseAdapter;
use crate::dispatcher::Dispatcher;
use crate::embedding::{DenseModel, SparseModel};
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{Batch, DenseVector, Embeddings, Role};
use crate::sparse::SparseAdapter;

/// Embedding service providing the two request-level operations.
///
/// Owns the long-lived models (through the adapters) for the life of the
/// process; everything else is request-scoped.
#[derive(Clone)]
pub struct EmbeddingService {
    dispatcher: Dispatcher,
    empty_text_policy: EmptyTextPolicy,
}

impl EmbeddingService {
    pub fn new(
        dense: Arc<dyn DenseModel>,
        sparse: Arc<dyn SparseModel>,
        config: &EmbeddingConfig,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(DenseAdapter::new(dense), SparseAdapter::new(sparse), config),
            empty_text_policy: config.empty_text_policy,
        }
    }

    /// Dense and sparse embeddings for every text, in input order.
    pub async fn create_embeddings(&self, texts: Vec<String>) -> EmbeddingResult<Embeddings> {
        if texts.is_empty() {
            return Err(EmbeddingError::Validation("No queries provided".to_string()));
        }

        let batch = Batch::new(texts);
        self.check_empty_texts(&batch)?;

        let queries = batch
            .classified()
            .filter(|item| item.role == Role::Query)
            .count();
        debug!(
            count = batch.len(),
            queries,
            passages = batch.len() - queries,
            "Creating embeddings"
        );
        let embeddings = self.dispatcher.dispatch(Arc::new(batch)).await?;
        debug!(
            count = embeddings.len(),
            dimension = embeddings.dense_dimension().unwrap_or_default(),
            "Embeddings created"
        );

        Ok(embeddings)
    }

    /// Dense embedding for a single text. A leading query marker is honoured.
    pub async fn create_dense_embedding(&self, text: String) -> EmbeddingResult<DenseVector> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::Validation("Empty query provided".to_string()));
        }

        let batch = Batch::new(vec![text]);
        self.check_empty_texts(&batch)?;

        let mut vectors = self.dispatcher.dispatch_dense(Arc::new(batch)).await?;
        let vector = vectors.pop().ok_or_else(|| {
            EmbeddingError::Reconstruction("dense model returned no vector".to_string())
        })?;

        debug!(dimension = vector.dimension(), "Dense embedding created");
        Ok(vector)
    }

    fn check_empty_texts(&self, batch: &Batch) -> EmbeddingResult<()> {
        if self.empty_text_policy == EmptyTextPolicy::Allow {
            return Ok(());
        }

        match batch.classified().find(|item| item.text.trim().is_empty()) {
            Some(item) => Err(EmbeddingError::Validation(format!(
                "Empty text at position {}",
                item.position
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{MockDenseModel, MockSparseModel};
    use crate::models::SparseVector;

    fn untouched() -> (MockDenseModel, MockSparseModel) {
        let mut dense = MockDenseModel::new();
        dense.expect_embed().never();
        let mut sparse = MockSparseModel::new();
        sparse.expect_query_embed().never();
        sparse.expect_passage_embed().never();
        sparse.expect_embed().never();
        (dense, sparse)
    }

    fn working() -> (MockDenseModel, MockSparseModel) {
        let mut dense = MockDenseModel::new();
        dense
            .expect_embed()
            .returning(|texts| Ok(texts.iter().map(|t| DenseVector::new(vec![t.len() as f32])).collect()));
        let mut sparse = MockSparseModel::new();
        let one = |texts: &[String]| {
            texts
                .iter()
                .map(|_| SparseVector::new(vec![0], vec![1.0]))
                .collect::<EmbeddingResult<Vec<_>>>()
        };
        sparse.expect_query_embed().returning(one);
        sparse.expect_passage_embed().returning(one);
        (dense, sparse)
    }

    fn service(models: (MockDenseModel, MockSparseModel), config: EmbeddingConfig) -> EmbeddingService {
        EmbeddingService::new(Arc::new(models.0), Arc::new(models.1), &config)
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_without_model_calls() {
        let svc = service(untouched(), EmbeddingConfig::default());
        let err = svc.create_embeddings(vec![]).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Validation(ref m) if m == "No queries provided"));
    }

    #[tokio::test]
    async fn test_blank_single_query_rejected_without_model_calls() {
        let svc = service(untouched(), EmbeddingConfig::default());
        for text in ["", "   ", "\t\n"] {
            let err = svc.create_dense_embedding(text.to_string()).await.unwrap_err();
            assert!(matches!(err, EmbeddingError::Validation(ref m) if m == "Empty query provided"));
        }
    }

    #[tokio::test]
    async fn test_marker_only_item_allowed_by_default() {
        let svc = service(working(), EmbeddingConfig::default());
        let out = svc
            .create_embeddings(vec!["_Query_".to_string(), "doc".to_string()])
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[tokio::test]
    async fn test_reject_policy_fails_before_models_run() {
        let config = EmbeddingConfig::default().with_empty_text_policy(EmptyTextPolicy::Reject);
        let svc = service(untouched(), config);
        let err = svc
            .create_embeddings(vec!["doc".to_string(), "_Query_  ".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Validation(ref m) if m.contains("position 1")));
    }

    #[tokio::test]
    async fn test_single_item_query_marker_is_honoured() {
        let svc = service(working(), EmbeddingConfig::default());
        let query = svc.create_dense_embedding("_Query_cats".to_string()).await.unwrap();
        let passage = svc.create_dense_embedding("cats".to_string()).await.unwrap();

        // The echo double encodes the length of the text the model saw.
        let instructed = crate::dense::QUERY_INSTRUCTION.len() + "cats".len();
        assert_eq!(query.values, vec![instructed as f32]);
        assert_eq!(passage.values, vec![4.0]);
    }
}
