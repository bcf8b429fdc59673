//! Local ONNX models via fastembed.
//!
//! fastembed's `embed` takes `&mut self`, so each model sits behind a
//! `Mutex`. The inference pool already bounds concurrency, the lock only
//! serialises calls that land on the same model.

use std::sync::{Mutex, MutexGuard};

use fastembed::{
    EmbeddingModel, SparseInitOptions, SparseModel as FastSparseModel, SparseTextEmbedding,
    TextEmbedding, TextInitOptions,
};
use tracing::{info, warn};

use super::provider::{DenseModel, SparseModel};
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{DenseVector, ModelKind, SparseVector};

fn dense_model_for(name: &str) -> EmbeddingResult<EmbeddingModel> {
    match name {
        "BAAI/bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "BAAI/bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        "BAAI/bge-large-en-v1.5" => Ok(EmbeddingModel::BGELargeENV15),
        "sentence-transformers/all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        other => Err(EmbeddingError::Config(format!(
            "unsupported dense model '{}'",
            other
        ))),
    }
}

fn sparse_model_for(name: &str) -> EmbeddingResult<FastSparseModel> {
    match name {
        "prithivida/Splade_PP_en_v1" => Ok(FastSparseModel::SPLADEPPV1),
        other => Err(EmbeddingError::Config(format!(
            "unsupported sparse model '{}'",
            other
        ))),
    }
}

/// A panic inside one inference call must not take the model out of service.
fn lock_model<'a, T>(model: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    model.lock().unwrap_or_else(|poisoned| {
        warn!(model = %name, "Model lock poisoned by an earlier panic, recovering");
        poisoned.into_inner()
    })
}

fn check_count(kind: ModelKind, expected: usize, got: usize) -> EmbeddingResult<()> {
    if expected != got {
        return Err(EmbeddingError::model(
            kind,
            format!("expected {} embeddings, model returned {}", expected, got),
        ));
    }
    Ok(())
}

pub struct FastEmbedDense {
    name: String,
    model: Mutex<TextEmbedding>,
}

impl FastEmbedDense {
    /// Load (and download on first use) the configured dense model.
    pub fn load(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let variant = dense_model_for(&config.dense_model)?;

        let mut options = TextInitOptions::new(variant)
            .with_max_length(config.dense_max_length)
            .with_show_download_progress(false);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::model(ModelKind::Dense, e.to_string()))?;

        info!(model = %config.dense_model, max_length = config.dense_max_length, "Dense model loaded");

        Ok(Self {
            name: config.dense_model.clone(),
            model: Mutex::new(model),
        })
    }
}

impl DenseModel for FastEmbedDense {
    fn embed(&self, texts: &[String]) -> EmbeddingResult<Vec<DenseVector>> {
        let mut model = lock_model(&self.model, &self.name);
        let raw = model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingError::model(ModelKind::Dense, e.to_string()))?;

        check_count(ModelKind::Dense, texts.len(), raw.len())?;
        Ok(raw.into_iter().map(DenseVector::from).collect())
    }
}

pub struct FastEmbedSparse {
    name: String,
    model: Mutex<SparseTextEmbedding>,
}

impl FastEmbedSparse {
    /// Load (and download on first use) the configured sparse model.
    pub fn load(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let variant = sparse_model_for(&config.sparse_model)?;

        let mut options = SparseInitOptions::new(variant).with_show_download_progress(false);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model = SparseTextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::model(ModelKind::Sparse, e.to_string()))?;

        info!(model = %config.sparse_model, "Sparse model loaded");

        Ok(Self {
            name: config.sparse_model.clone(),
            model: Mutex::new(model),
        })
    }
}

impl SparseModel for FastEmbedSparse {
    fn embed(&self, texts: &[String]) -> EmbeddingResult<Vec<SparseVector>> {
        let mut model = lock_model(&self.model, &self.name);
        let raw = model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingError::model(ModelKind::Sparse, e.to_string()))?;

        check_count(ModelKind::Sparse, texts.len(), raw.len())?;

        raw.into_iter()
            .map(|embedding| {
                let indices = embedding
                    .indices
                    .into_iter()
                    .map(|index| {
                        u32::try_from(index).map_err(|_| {
                            EmbeddingError::model(
                                ModelKind::Sparse,
                                format!("token index {} does not fit in u32", index),
                            )
                        })
                    })
                    .collect::<EmbeddingResult<Vec<u32>>>()?;
                SparseVector::new(indices, embedding.values)
            })
            .collect()
    }
}
