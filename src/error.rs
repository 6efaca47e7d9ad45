use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngredientError {
    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("埋め込みモデルエラー: {0}")]
    Embedding(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ingredient_similarity_common::Error),
}

pub type Result<T> = std::result::Result<T, IngredientError>;
