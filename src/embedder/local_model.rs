//! fastembed（ONNX）によるローカル埋め込み

use super::Embedder;
use crate::config::Config;
use crate::error::{IngredientError, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

/// モデル名 → fastembed のモデル
pub fn model_kind(name: &str) -> Result<EmbeddingModel> {
    match name {
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" | "BAAI/bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        _ => Err(IngredientError::Embedding(format!(
            "unsupported model: {}. Use all-MiniLM-L6-v2, all-MiniLM-L12-v2, bge-small-en-v1.5 or bge-base-en-v1.5",
            name
        ))),
    }
}

pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    /// モデルを読み込む（初回はダウンロード）
    pub fn load(config: &Config) -> Result<Self> {
        let kind = model_kind(&config.model)?;
        let options = InitOptions::new(kind).with_show_download_progress(config.show_download_progress);

        let model = TextEmbedding::try_new(options)
            .map_err(|e| IngredientError::Embedding(format!("failed to load {}: {}", config.model, e)))?;

        Ok(Self { model })
    }
}

impl Embedder for FastEmbedder {
    fn encode(&mut self, names: &[String]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(names.to_vec(), None)
            .map_err(|e| IngredientError::Embedding(format!("inference failed: {}", e)))
    }
}
