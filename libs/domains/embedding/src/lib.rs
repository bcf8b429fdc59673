//! Embedding Domain Library
//!
//! Turns an ordered batch of texts into dense and sparse embeddings for
//! hybrid search. Texts starting with `_Query_` are search queries; all
//! others are passages to be indexed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ EmbeddingService │  ← validation, empty-text policy
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Dispatcher    │  ← inference pool, deadline, all-or-nothing join
//! └───┬──────────┬───┘
//!     │          │
//! ┌───▼────┐ ┌───▼──────────┐
//! │ Dense  │ │ Sparse       │
//! │Adapter │ │ Adapter      │  ← router + reassembly
//! └───┬────┘ └───┬──────────┘
//!     │          │
//! ┌───▼────────┐ ┌▼────────────┐
//! │ DenseModel │ │ SparseModel │  (traits)
//! └───┬────────┘ └┬────────────┘
//!     │           │
//! ┌───▼───────────▼───┐
//! │ FastEmbedDense /  │  (feature "fastembed")
//! │ FastEmbedSparse   │
//! └───────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_embedding::{EmbeddingConfig, EmbeddingService, FastEmbedDense, FastEmbedSparse};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EmbeddingConfig::default();
//! let dense = Arc::new(FastEmbedDense::load(&config)?);
//! let sparse = Arc::new(FastEmbedSparse::load(&config)?);
//! let service = EmbeddingService::new(dense, sparse, &config);
//!
//! let out = service
//!     .create_embeddings(vec!["_Query_what is rust".into(), "Rust is a language".into()])
//!     .await?;
//! assert_eq!(out.dense.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod conversions;
pub mod dense;
pub mod dispatcher;
pub mod embedding;
pub mod error;
pub mod models;
pub mod router;
pub mod service;
pub mod sparse;

pub use classifier::{QUERY_MARKER, classify};
pub use config::{EmbeddingConfig, EmptyTextPolicy};
pub use dense::{DenseAdapter, QUERY_INSTRUCTION};
pub use dispatcher::Dispatcher;
pub use embedding::{DenseModel, SparseModel};
#[cfg(feature = "fastembed")]
pub use embedding::{FastEmbedDense, FastEmbedSparse};
pub use error::{EmbeddingError, EmbeddingResult};
pub use models::{Batch, DenseVector, Embeddings, ModelKind, Role, SparseVector};
pub use router::{Reassembly, RoutedBatch, SubBatch};
pub use service::EmbeddingService;
pub use sparse::SparseAdapter;
