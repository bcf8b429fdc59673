use protos::embedding::v1::{
    DenseEmbedding as ProtoDenseEmbedding, Embeddings as ProtoEmbeddings,
    SparseEmbedding as ProtoSparseEmbedding,
};

use crate::models::{DenseVector, Embeddings, SparseVector};

impl From<DenseVector> for ProtoDenseEmbedding {
    fn from(vector: DenseVector) -> Self {
        ProtoDenseEmbedding {
            values: vector.values,
        }
    }
}

impl From<SparseVector> for ProtoSparseEmbedding {
    fn from(vector: SparseVector) -> Self {
        let (indices, values) = vector.into_parts();
        ProtoSparseEmbedding { indices, values }
    }
}

impl From<Embeddings> for ProtoEmbeddings {
    fn from(embeddings: Embeddings) -> Self {
        ProtoEmbeddings {
            dense_embeddings: embeddings.dense.into_iter().map(Into::into).collect(),
            sparse_embeddings: embeddings.sparse.into_iter().map(Into::into).collect(),
        }
    }
}
