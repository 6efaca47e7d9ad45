//! 埋め込み・類似度エンジン
//!
//! 名前列をベクトル化し、全ペアのコサイン類似度行列を作る。
//! モデルはエンジンが所有し、実行ごとに一度だけ読み込む。

mod local_model;

pub use local_model::{model_kind, FastEmbedder};

use crate::error::{IngredientError, Result};
use ingredient_similarity_common::{cosine_similarity, SimilarityMatrix};

/// 文字列列 → 固定長ベクトル列
///
/// 入力1件につき1ベクトル、順序維持。同じモデルなら決定的であること。
pub trait Embedder {
    fn encode(&mut self, names: &[String]) -> Result<Vec<Vec<f32>>>;
}

pub struct SimilarityEngine<E: Embedder> {
    embedder: E,
}

impl<E: Embedder> SimilarityEngine<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// 名前をベクトル化（空ならモデルを呼ばない）
    pub fn encode(&mut self, names: &[String]) -> Result<Vec<Vec<f32>>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.embedder.encode(names)?;
        if embeddings.len() != names.len() {
            return Err(IngredientError::Embedding(format!(
                "expected {} embeddings, got {}",
                names.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }

    /// ベクトル列同士の類似度行列
    pub fn similarities(&self, embeddings: &[Vec<f32>]) -> Result<SimilarityMatrix> {
        Ok(cosine_similarity(embeddings, embeddings)?)
    }

    pub fn similarity_matrix(&mut self, names: &[String]) -> Result<SimilarityMatrix> {
        let embeddings = self.encode(names)?;
        self.similarities(&embeddings)
    }
}
