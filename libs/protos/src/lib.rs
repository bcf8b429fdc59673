//! Generated protobuf types and gRPC stubs.
//!
//! Sources live in `proto/`; the Rust output under `src/generated/` is
//! produced by `buf generate` (prost + tonic plugins) and checked in.

pub mod embedding {
    pub mod v1 {
        include!("generated/embedding/v1/embedding.v1.rs");
    }
}
