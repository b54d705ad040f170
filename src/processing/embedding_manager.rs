//! Embedding model management: locating, downloading and lazily loading the
//! shared sentence embedder.
//!
//! The model is expensive to load, so a `ModelHandle` loads it at most once and
//! hands out clones of the same `Arc` afterwards. The handle is created by the
//! caller and passed into the pipeline explicitly; there is no global instance.

use crate::config::Config;
use crate::error::{Result, ResumeRelevanceError};
use crate::processing::embeddings::{MiniLmEmbedder, ModelFiles, SentenceEmbedder, EMBEDDING_MODEL_ID};
use hf_hub::api::tokio::ApiBuilder;
use hf_hub::{Cache, Repo};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Blocking constructor for an embedder, run off the async runtime.
pub type EmbedderLoader = Arc<dyn Fn() -> Result<Arc<dyn SentenceEmbedder>> + Send + Sync>;

/// Lazily-initialized, process-lifetime owner of the embedding model.
///
/// `get` is safe to call from concurrent tasks: the first caller loads the
/// model, the others wait for it, and everyone receives the same instance.
pub struct ModelHandle {
    model_id: String,
    cache_dir: PathBuf,
    offline: bool,
    /// Replaces the Hugging Face download + MiniLM load when set
    loader: Option<EmbedderLoader>,
    embedder: OnceCell<Arc<dyn SentenceEmbedder>>,
}

impl ModelHandle {
    pub fn new(config: &Config) -> Self {
        Self {
            model_id: EMBEDDING_MODEL_ID.to_string(),
            cache_dir: config.cache_dir().to_path_buf(),
            offline: config.models.offline,
            loader: None,
            embedder: OnceCell::new(),
        }
    }

    /// A lazy handle that builds its embedder with `loader` on first use.
    pub fn with_loader<F>(model_id: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SentenceEmbedder>> + Send + Sync + 'static,
    {
        Self {
            model_id: model_id.into(),
            cache_dir: PathBuf::new(),
            offline: true,
            loader: Some(Arc::new(loader)),
            embedder: OnceCell::new(),
        }
    }

    /// A handle that is already initialized with the given embedder.
    pub fn with_embedder(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self {
            model_id: embedder.model_id().to_string(),
            cache_dir: PathBuf::new(),
            offline: true,
            loader: None,
            embedder: OnceCell::new_with(Some(embedder)),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    pub fn is_loaded(&self) -> bool {
        self.embedder.initialized()
    }

    /// Return the shared embedder, loading it on first use.
    ///
    /// A failed load leaves the handle empty; the next call tries again.
    pub async fn get(&self) -> Result<Arc<dyn SentenceEmbedder>> {
        let embedder = self.embedder.get_or_try_init(|| self.load()).await?;
        Ok(Arc::clone(embedder))
    }

    async fn load(&self) -> Result<Arc<dyn SentenceEmbedder>> {
        let task = match &self.loader {
            Some(loader) => {
                let loader = Arc::clone(loader);
                tokio::task::spawn_blocking(move || loader())
            }
            None => {
                let files = self.ensure_files(false).await?;
                let model_id = self.model_id.clone();
                tokio::task::spawn_blocking(move || {
                    MiniLmEmbedder::load(&files, &model_id).map(|m| Arc::new(m) as Arc<dyn SentenceEmbedder>)
                })
            }
        };

        task.await
            .map_err(|e| ResumeRelevanceError::ModelLoad(format!("Model loading task failed: {}", e)))?
    }

    /// Model files already present in the local cache, if complete.
    pub fn cached_files(&self) -> Option<ModelFiles> {
        let cache = Cache::new(self.cache_dir.clone());
        let repo = cache.repo(Repo::model(self.model_id.clone()));

        Some(ModelFiles {
            config: repo.get(ModelFiles::CONFIG)?,
            tokenizer: repo.get(ModelFiles::TOKENIZER)?,
            weights: repo.get(ModelFiles::WEIGHTS)?,
        })
    }

    /// Make sure the model files are on disk, downloading them unless offline.
    pub async fn ensure_files(&self, force: bool) -> Result<ModelFiles> {
        if !force {
            if let Some(files) = self.cached_files() {
                return Ok(files);
            }
        }

        if self.offline {
            return Err(ResumeRelevanceError::ModelLoad(format!(
                "Model '{}' is not in the cache at {} and offline mode is enabled",
                self.model_id,
                self.cache_dir.display()
            )));
        }

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| {
            ResumeRelevanceError::ModelLoad(format!("Failed to create model cache directory: {}", e))
        })?;

        info!("Downloading embedding model {} into {}", self.model_id, self.cache_dir.display());

        let api = ApiBuilder::new()
            .with_cache_dir(self.cache_dir.clone())
            .with_progress(true)
            .build()
            .map_err(|e| ResumeRelevanceError::ModelLoad(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(self.model_id.clone());

        let mut fetched = Vec::with_capacity(3);
        for file in [ModelFiles::CONFIG, ModelFiles::TOKENIZER, ModelFiles::WEIGHTS] {
            let result = if force { repo.download(file).await } else { repo.get(file).await };
            let path = result.map_err(|e| {
                ResumeRelevanceError::ModelLoad(format!("Failed to download required file {}: {}", file, e))
            })?;
            info!("Downloaded: {}", file);
            fetched.push(path);
        }

        let [config, tokenizer, weights]: [PathBuf; 3] = fetched
            .try_into()
            .map_err(|_| ResumeRelevanceError::ModelLoad("Incomplete model download".to_string()))?;

        Ok(ModelFiles {
            config,
            tokenizer,
            weights,
        })
    }
}
