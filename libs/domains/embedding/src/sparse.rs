use std::sync::Arc;

use tracing::debug;

use crate::embedding::SparseModel;
use crate::error::EmbeddingResult;
use crate::models::{Batch, SparseVector};
use crate::router::{Reassembly, RoutedBatch};

/// Sends queries through `query_embed` and passages through `passage_embed`,
/// then puts the results back in input order.
#[derive(Clone)]
pub struct SparseAdapter {
    model: Arc<dyn SparseModel>,
}

impl SparseAdapter {
    pub fn new(model: Arc<dyn SparseModel>) -> Self {
        Self { model }
    }

    pub fn embed(&self, batch: &Batch) -> EmbeddingResult<Vec<SparseVector>> {
        let routed = RoutedBatch::route(batch);
        let mut out = Reassembly::new(batch.len());

        // The model is never called with zero items.
        if !routed.queries.is_empty() {
            let vectors = self.model.query_embed(routed.queries.texts())?;
            out.scatter(routed.queries.positions(), vectors)?;
        }
        if !routed.passages.is_empty() {
            let vectors = self.model.passage_embed(routed.passages.texts())?;
            out.scatter(routed.passages.positions(), vectors)?;
        }

        debug!(
            queries = routed.queries.len(),
            passages = routed.passages.len(),
            "Sparse batch embedded"
        );

        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockSparseModel;
    use crate::error::EmbeddingError;
    use crate::models::ModelKind;
    use mockall::predicate::*;

    fn batch(texts: &[&str]) -> Batch {
        texts.iter().copied().collect()
    }

    /// One single-entry vector per text, keyed by `tag` and text length.
    fn tagged(tag: u32, texts: &[String]) -> EmbeddingResult<Vec<SparseVector>> {
        texts
            .iter()
            .map(|t| SparseVector::new(vec![tag], vec![t.len() as f32]))
            .collect()
    }

    #[test]
    fn test_mixed_batch_reassembled_in_input_order() {
        let mut mock = MockSparseModel::new();
        mock.expect_query_embed()
            .with(eq(vec!["qq".to_string()]))
            .times(1)
            .returning(|texts| tagged(1, texts));
        mock.expect_passage_embed()
            .with(eq(vec!["p".to_string(), "ppp".to_string()]))
            .times(1)
            .returning(|texts| tagged(2, texts));

        let adapter = SparseAdapter::new(Arc::new(mock));
        let vectors = adapter.embed(&batch(&["p", "_Query_qq", "ppp"])).unwrap();

        let summary: Vec<(u32, f32)> = vectors
            .iter()
            .map(|v| (v.indices()[0], v.values()[0]))
            .collect();
        assert_eq!(summary, vec![(2, 1.0), (1, 2.0), (2, 3.0)]);
    }

    #[test]
    fn test_passage_only_batch_never_calls_query_path() {
        let mut mock = MockSparseModel::new();
        mock.expect_query_embed().never();
        mock.expect_passage_embed()
            .times(1)
            .returning(|texts| tagged(2, texts));

        let adapter = SparseAdapter::new(Arc::new(mock));
        assert_eq!(adapter.embed(&batch(&["a", "b"])).unwrap().len(), 2);
    }

    #[test]
    fn test_query_only_batch_never_calls_passage_path() {
        let mut mock = MockSparseModel::new();
        mock.expect_passage_embed().never();
        mock.expect_query_embed()
            .times(1)
            .returning(|texts| tagged(1, texts));

        let adapter = SparseAdapter::new(Arc::new(mock));
        assert_eq!(adapter.embed(&batch(&["_Query_a"])).unwrap().len(), 1);
    }

    #[test]
    fn test_query_failure_aborts_batch() {
        let mut mock = MockSparseModel::new();
        mock.expect_query_embed()
            .returning(|_| Err(EmbeddingError::model(ModelKind::Sparse, "bad tokens")));
        mock.expect_passage_embed().returning(|texts| tagged(2, texts));

        let adapter = SparseAdapter::new(Arc::new(mock));
        let err = adapter.embed(&batch(&["_Query_a", "b"])).unwrap_err();
        assert!(matches!(err, EmbeddingError::Model { kind: ModelKind::Sparse, .. }));
    }

    #[test]
    fn test_short_sub_batch_result_is_reconstruction_defect() {
        let mut mock = MockSparseModel::new();
        mock.expect_passage_embed()
            .returning(|_| Ok(vec![SparseVector::default()]));

        let adapter = SparseAdapter::new(Arc::new(mock));
        let err = adapter.embed(&batch(&["a", "b"])).unwrap_err();
        assert!(matches!(err, EmbeddingError::Reconstruction(_)));
    }

    #[test]
    fn test_empty_batch_calls_nothing() {
        let mut mock = MockSparseModel::new();
        mock.expect_query_embed().never();
        mock.expect_passage_embed().never();

        let adapter = SparseAdapter::new(Arc::new(mock));
        assert!(adapter.embed(&Batch::default()).unwrap().is_empty());
    }
}
