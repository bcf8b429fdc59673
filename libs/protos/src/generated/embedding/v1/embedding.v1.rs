// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Queries {
    #[prost(string, repeated, tag="1")]
    pub queries: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Query {
    #[prost(string, tag="1")]
    pub query: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DenseEmbedding {
    #[prost(float, repeated, tag="1")]
    pub values: ::prost::alloc::vec::Vec<f32>,
}
/// Parallel arrays: (indices\[i\], values\[i\]) is one non-zero vocabulary weight.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SparseEmbedding {
    #[prost(uint32, repeated, tag="1")]
    pub indices: ::prost::alloc::vec::Vec<u32>,
    #[prost(float, repeated, tag="2")]
    pub values: ::prost::alloc::vec::Vec<f32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Embeddings {
    #[prost(message, repeated, tag="1")]
    pub dense_embeddings: ::prost::alloc::vec::Vec<DenseEmbedding>,
    #[prost(message, repeated, tag="2")]
    pub sparse_embeddings: ::prost::alloc::vec::Vec<SparseEmbedding>,
}
include!("embedding.v1.tonic.rs");
// @@protoc_insertion_point(module)
