#[cfg(feature = "fastembed")]
mod fastembed_embedder;
mod provider;

#[cfg(feature = "fastembed")]
pub use fastembed_embedder::{FastEmbedDense, FastEmbedSparse};
pub use provider::{DenseModel, SparseModel};

#[cfg(test)]
pub use provider::{MockDenseModel, MockSparseModel};
