use crate::error::EmbeddingResult;
use crate::models::{DenseVector, SparseVector};

/// Dense embedding model.
///
/// Calls are synchronous and CPU-bound; callers run them on the inference
/// pool. Implementations must return one vector per input, in input order,
/// all of the same dimensionality.
#[cfg_attr(test, mockall::automock)]
pub trait DenseModel: Send + Sync {
    fn embed(&self, texts: &[String]) -> EmbeddingResult<Vec<DenseVector>>;
}

/// Sparse (token-weighted) embedding model.
///
/// `query_embed` and `passage_embed` let models that treat the two sides
/// asymmetrically do so; both default to `embed`. Never called with an
/// empty slice.
#[cfg_attr(test, mockall::automock)]
pub trait SparseModel: Send + Sync {
    fn embed(&self, texts: &[String]) -> EmbeddingResult<Vec<SparseVector>>;

    fn query_embed(&self, texts: &[String]) -> EmbeddingResult<Vec<SparseVector>> {
        self.embed(texts)
    }

    fn passage_embed(&self, texts: &[String]) -> EmbeddingResult<Vec<SparseVector>> {
        self.embed(texts)
    }
}
