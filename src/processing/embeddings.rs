//! Sentence embeddings and semantic similarity scoring

use crate::error::{Result, ResumeRelevanceError};
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationParams};

/// Pretrained sentence embedding model used for semantic scoring.
pub const EMBEDDING_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Word pieces beyond this are truncated, matching the model's `max_seq_length`.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Encodes a text into a fixed-dimensional dense vector.
///
/// Implementations are shared read-only across callers, so inference takes `&self`.
pub trait SentenceEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn model_id(&self) -> &str;
}

/// Cosine similarity between two embeddings. Zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeRelevanceError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Scores two texts by the cosine similarity of their embeddings.
#[derive(Clone)]
pub struct SemanticScorer {
    embedder: Arc<dyn SentenceEmbedder>,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self { embedder }
    }

    /// Raw cosine similarity multiplied by 100.
    ///
    /// The value is not remapped from [-1, 1], so unrelated texts can score
    /// below zero. Empty texts are embedded like any other input.
    pub fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        let start_time = Instant::now();
        let a = self.embedder.embed(text_a)?;
        let b = self.embedder.embed(text_b)?;
        let cosine = cosine_similarity(&a, &b)?;

        debug!(
            "Semantic similarity {:.4} ({} dims) in {:.2?}",
            cosine,
            a.len(),
            start_time.elapsed()
        );
        Ok(f64::from(cosine) * 100.0)
    }

    pub fn model_id(&self) -> &str {
        self.embedder.model_id()
    }
}

/// Local files making up a BERT sentence-transformer checkpoint.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub const CONFIG: &'static str = "config.json";
    pub const TOKENIZER: &'static str = "tokenizer.json";
    pub const WEIGHTS: &'static str = "model.safetensors";
}

/// all-MiniLM-L6-v2 running on candle: BERT encoder, mean pooling, L2 normalization.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_id: String,
}

impl MiniLmEmbedder {
    pub fn load(files: &ModelFiles, model_id: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading embedding model {} from {}", model_id, files.weights.display());

        let device = get_device_with_override()?;

        let config_content = std::fs::read_to_string(&files.config).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!(
                "Failed to read model config {}: {}",
                files.config.display(),
                e
            ))
        })?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to parse model config: {}", e))
        })?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to load tokenizer: {}", e))
        })?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| {
                ResumeRelevanceError::ModelLoad(format!("Failed to configure truncation: {}", e))
            })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DTYPE, &device)
                .map_err(|e| {
                    ResumeRelevanceError::ModelLoad(format!("Failed to load safetensors: {}", e))
                })?
        };
        let model = BertModel::load(vb, &bert_config).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to build BERT model: {}", e))
        })?;

        info!("Embedding model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            tokenizer,
            device,
            model_id: model_id.to_string(),
        })
    }

    fn forward(&self, text: &str) -> Result<Tensor> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ResumeRelevanceError::Embedding(format!("Tokenization failed: {}", e)))?;

        if !encoding.get_overflowing().is_empty() {
            debug!("Input truncated to {} tokens", MAX_SEQUENCE_LENGTH);
        }

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean over real tokens only, then unit length
        let mask = attention_mask.to_dtype(DTYPE)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;
        let norm = pooled.sqr()?.sum_keepdim(1)?.sqrt()?;
        Ok(pooled.broadcast_div(&norm)?)
    }
}

impl SentenceEmbedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.forward(text)?;
        Ok(embedding.squeeze(0)?.to_vec1::<f32>()?)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Pick the inference device, honoring `RESUME_RELEVANCE_DEVICE=cpu|cuda|metal`.
pub fn get_device_with_override() -> Result<Device> {
    let preference = std::env::var("RESUME_RELEVANCE_DEVICE").unwrap_or_default();

    match preference.to_lowercase().as_str() {
        "cuda" => Device::new_cuda(0).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to initialize CUDA: {}", e))
        }),
        "metal" => Device::new_metal(0).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to initialize Metal: {}", e))
        }),
        "" | "cpu" => Ok(Device::Cpu),
        other => {
            warn!("Unknown device '{}', falling back to CPU", other);
            Ok(Device::Cpu)
        }
    }
}
