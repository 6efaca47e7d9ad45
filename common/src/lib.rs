//! Ingredient Similarity Common Library
//!
//! CSV読み込み・類似度行列・Excelレイアウトなど、I/Oを持たない共通ロジック

pub mod types;
pub mod error;
pub mod parser;
pub mod similarity;
pub mod export;

pub use types::{CreatedAt, IngredientRecord};
pub use error::{Error, Result};
pub use parser::{parse_ingredients, parse_int_or_none, parse_created_at, names_of};
pub use similarity::{cosine_similarity, round_score, ScoredPair, SimilarityMatrix};
