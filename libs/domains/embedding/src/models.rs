use std::fmt;

use crate::error::{EmbeddingError, EmbeddingResult};

/// How an input item is treated by the models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Search query: marker stripped, instruction-prefixed on the dense path,
    /// `query_embed` on the sparse path.
    Query,
    /// Passage to be indexed: fed to both models verbatim.
    Passage,
}

/// Which collaborator model an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Dense,
    Sparse,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Dense => f.write_str("dense"),
            ModelKind::Sparse => f.write_str("sparse"),
        }
    }
}

/// One text from the caller's batch and its zero-based position in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    pub position: usize,
    pub text: String,
}

/// An input item after prefix classification.
///
/// `text` borrows from the input with the query marker (if any) removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedItem<'a> {
    pub position: usize,
    pub role: Role,
    pub text: &'a str,
}

/// Ordered, immutable request batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    items: Vec<InputItem>,
}

impl Batch {
    pub fn new(texts: Vec<String>) -> Self {
        let items = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| InputItem { position, text })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[InputItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Classify every item, in input order.
    pub fn classified(&self) -> impl Iterator<Item = ClassifiedItem<'_>> {
        self.items.iter().map(ClassifiedItem::from_input)
    }
}

impl<S: Into<String>> FromIterator<S> for Batch {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Fixed-length dense embedding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseVector {
    pub values: Vec<f32>,
}

impl DenseVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }
}

impl From<Vec<f32>> for DenseVector {
    fn from(values: Vec<f32>) -> Self {
        Self { values }
    }
}

/// Sparse embedding as parallel `(index, weight)` arrays with unique indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Build a sparse vector, rejecting mismatched lengths and repeated indices.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> EmbeddingResult<Self> {
        if indices.len() != values.len() {
            return Err(EmbeddingError::model(
                ModelKind::Sparse,
                format!(
                    "sparse vector has {} indices but {} values",
                    indices.len(),
                    values.len()
                ),
            ));
        }

        let mut seen = std::collections::HashSet::with_capacity(indices.len());
        if let Some(dup) = indices.iter().find(|index| !seen.insert(**index)) {
            return Err(EmbeddingError::model(
                ModelKind::Sparse,
                format!("sparse vector repeats index {}", dup),
            ));
        }

        Ok(Self { indices, values })
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u32>, Vec<f32>) {
        (self.indices, self.values)
    }
}

/// Dense and sparse results, both aligned to the input batch by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Embeddings {
    pub dense: Vec<DenseVector>,
    pub sparse: Vec<SparseVector>,
}

impl Embeddings {
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Dimensionality of the dense vectors, if any were produced.
    pub fn dense_dimension(&self) -> Option<usize> {
        self.dense.first().map(DenseVector::dimension)
    }
}
