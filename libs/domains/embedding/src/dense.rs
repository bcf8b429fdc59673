use std::sync::Arc;

use tracing::debug;

use crate::embedding::DenseModel;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{Batch, DenseVector, ModelKind, Role};

/// Instruction prepended to query texts before dense embedding.
pub const QUERY_INSTRUCTION: &str = "Represent this sentence for searching relevant passages: ";

/// Runs the whole batch through the dense model in a single call.
///
/// The dense model never sees roles: queries are distinguished only by the
/// instruction prefix, passages are passed through verbatim.
#[derive(Clone)]
pub struct DenseAdapter {
    model: Arc<dyn DenseModel>,
}

impl DenseAdapter {
    pub fn new(model: Arc<dyn DenseModel>) -> Self {
        Self { model }
    }

    /// Texts as the dense model will see them, in input order.
    pub fn prepare(batch: &Batch) -> Vec<String> {
        batch
            .classified()
            .map(|item| match item.role {
                Role::Query => format!("{}{}", QUERY_INSTRUCTION, item.text),
                Role::Passage => item.text.to_owned(),
            })
            .collect()
    }

    pub fn embed(&self, batch: &Batch) -> EmbeddingResult<Vec<DenseVector>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let texts = Self::prepare(batch);
        let vectors = self.model.embed(&texts)?;

        if vectors.len() != batch.len() {
            return Err(EmbeddingError::Reconstruction(format!(
                "dense model returned {} vectors for {} inputs",
                vectors.len(),
                batch.len()
            )));
        }

        if let Some(first) = vectors.first() {
            let dimension = first.dimension();
            if let Some((position, odd)) = vectors
                .iter()
                .enumerate()
                .find(|(_, v)| v.dimension() != dimension)
            {
                return Err(EmbeddingError::model(
                    ModelKind::Dense,
                    format!(
                        "vector at position {} has dimension {}, expected {}",
                        position,
                        odd.dimension(),
                        dimension
                    ),
                ));
            }
            debug!(count = vectors.len(), dimension, "Dense batch embedded");
        }

        Ok(vectors)
    }
}
