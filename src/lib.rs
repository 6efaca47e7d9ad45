//! Ingredient Similarity
//!
//! 食材CSV → 名前の埋め込み → コサイン類似度行列 → 3色スケール付きExcel

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod embedder;
pub mod export;
pub mod pipeline;
