//! Embedding gRPC Service
//!
//! Serves dense + sparse text embeddings for hybrid search over gRPC.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd, x-request-id)
//! ConcurrencyLimited (request pool; health checks bypass it)
//!   ↓
//! EmbeddingServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! EmbeddingService (domain layer)
//!   ↓ (inference pool, fork-join)
//! ┌────────────────┬─────────────────┐
//! │ FastEmbedDense │ FastEmbedSparse │
//! └────────────────┴─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `server`: Server initialization and lifecycle
//! - `service`: gRPC service implementation (EmbeddingServiceImpl)

pub mod server;
pub mod service;

pub use server::{run, serve};
pub use service::EmbeddingServiceImpl;
