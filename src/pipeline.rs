//! 一括処理: CSV → 名前 → 類似度行列 → Excel
//!
//! 各段階が完了してから次へ進む。どの段階の失敗も実行全体を中断する。

use crate::config::Config;
use crate::embedder::{Embedder, SimilarityEngine};
use crate::error::Result;
use crate::export::{self, excel::ReportWriter};
use crate::loader;
use chrono::Local;
use ingredient_similarity_common::{names_of, SimilarityMatrix};
use std::path::{Path, PathBuf};

/// 生成したレポートの概要
#[derive(Debug)]
pub struct ReportSummary {
    pub output_path: PathBuf,
    pub names: Vec<String>,
    pub matrix: SimilarityMatrix,
}

impl ReportSummary {
    /// 類似度の高い順に `limit` 件（名前a, 名前b, スコア）
    pub fn top_pairs(&self, limit: usize) -> Vec<(&str, &str, f32)> {
        self.matrix
            .ranked_pairs()
            .into_iter()
            .take(limit)
            .map(|p| (self.names[p.i].as_str(), self.names[p.j].as_str(), p.score))
            .collect()
    }
}

/// レポートを生成して `output_dir` に保存
///
/// モデルはヘッダー書き込み後に `load_embedder` で一度だけ読み込む。
pub fn generate_report<E, F>(
    input: &Path,
    output_dir: &Path,
    config: &Config,
    load_embedder: F,
) -> Result<ReportSummary>
where
    E: Embedder,
    F: FnOnce(&Config) -> Result<E>,
{
    let ingredients = loader::load_ingredients(input)?;
    let names = names_of(&ingredients);
    println!("Retrieved {} from the file ({}).", ingredients.len(), input.display());

    let now = Local::now();
    let output_path = export::report_path(output_dir, config, &now);
    println!(
        "Creating Excel workbook with name '{}'",
        export::report_file_name(config, &now)
    );

    let mut report = ReportWriter::new(config.sheet_options());
    report.write_headers(&names)?;
    println!("Initialized the columns and rows headers.");

    let mut engine = SimilarityEngine::new(load_embedder(config)?);
    let embeddings = engine.encode(&names)?;
    println!("Encoded the names.");
    let matrix = engine.similarities(&embeddings)?;
    println!("Calculating the cosinus similarities.");

    report.write_scores(&matrix)?;
    println!("Filling the similarity values into the sheet.");

    report.apply_color_scale()?;
    println!("Added the conditional rendering.");

    report.autofit()?;
    report.save(&output_path)?;
    println!("Finished. Created the worksheet.");

    Ok(ReportSummary {
        output_path,
        names,
        matrix,
    })
}
