//! コサイン類似度行列
//!
//! 埋め込みベクトル列から全ペアの類似度を計算する。
//! レポートに書き出すのは上三角（i < j）のみ。

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// 類似度行列（行優先）
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f32>,
}

/// 上三角の1ペア
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair {
    pub i: usize,
    pub j: usize,
    pub score: f32,
}

impl SimilarityMatrix {
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            scores: Vec::new(),
        }
    }

    /// 行ごとのスコアから作成（全行が同じ長さであること）
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut scores = Vec::with_capacity(rows.len() * cols);

        for row in &rows {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            scores.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            scores,
        })
    }

    /// 行数（正方行列なら名前の数）
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.scores.get(i * self.cols + j).copied()
    }

    /// 上三角（i < j）を行優先で列挙
    pub fn upper_triangle(&self) -> impl Iterator<Item = ScoredPair> + '_ {
        (0..self.rows).flat_map(move |i| {
            ((i + 1)..self.cols).map(move |j| ScoredPair {
                i,
                j,
                score: self.scores[i * self.cols + j],
            })
        })
    }

    /// 上三角をスコア降順に並べる（同点は元の順序）
    pub fn ranked_pairs(&self) -> Vec<ScoredPair> {
        let mut pairs: Vec<ScoredPair> = self.upper_triangle().collect();
        pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        pairs
    }
}

/// ベクトル列 a と b の全ペアのコサイン類似度
///
/// (i, j) = cos(a[i], b[j])。ノルム0のベクトルとの類似度は 0.0。
pub fn cosine_similarity(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<SimilarityMatrix> {
    let dim = a.first().or_else(|| b.first()).map(|v| v.len()).unwrap_or(0);

    for v in a.iter().chain(b.iter()) {
        if v.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: v.len(),
            });
        }
    }

    let norms_a: Vec<f32> = a.iter().map(|v| norm(v)).collect();
    let norms_b: Vec<f32> = b.iter().map(|v| norm(v)).collect();

    let mut scores = Vec::with_capacity(a.len() * b.len());
    for (va, na) in a.iter().zip(&norms_a) {
        for (vb, nb) in b.iter().zip(&norms_b) {
            let denom = na * nb;
            let score = if denom == 0.0 { 0.0 } else { dot(va, vb) / denom };
            scores.push(score);
        }
    }

    Ok(SimilarityMatrix {
        rows: a.len(),
        cols: b.len(),
        scores,
    })
}

/// 小数点以下 `decimals` 桁に丸める
pub fn round_score(score: f32, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (score as f64 * factor).round() / factor
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
