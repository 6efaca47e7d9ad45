//! Excel生成（共通ライブラリ）
//!
//! 類似度行列のシートレイアウト:
//! - (0,0) はプレースホルダー（値 0）
//! - 0行目の1..n-1列に names[1..]、i列の i+1行目に names[i]
//! - (i+1, j) に類似度（i < j）
//! - スコア範囲に3色スケールの条件付き書式

use crate::error::{Error, Result};
use crate::similarity::{round_score, SimilarityMatrix};
use rust_xlsxwriter::*;

/// 3色スケールの色設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub minimum: Color,
    pub midpoint: Color,
    pub maximum: Color,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            minimum: Color::Green,
            midpoint: Color::Yellow,
            maximum: Color::Red,
        }
    }
}

/// シート出力オプション
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetOptions {
    /// スコアの小数点以下桁数
    pub decimals: u32,
    pub color_scale: ColorScale,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            color_scale: ColorScale::default(),
        }
    }
}

/// 書き出したスコアの最小値・最大値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn include(range: Option<Self>, value: f64) -> Self {
        match range {
            Some(r) => Self {
                min: r.min.min(value),
                max: r.max.max(value),
            },
            None => Self {
                min: value,
                max: value,
            },
        }
    }
}

/// セル共通の細線ボーダー
pub fn border_format() -> Format {
    Format::new().set_border(FormatBorder::Thin)
}

/// 行・列ヘッダーを書き込む
///
/// 先頭の名前は列ヘッダーにならず、末尾の名前は行ヘッダーにならない。
pub fn write_headers(worksheet: &mut Worksheet, names: &[String], border: &Format) -> Result<()> {
    worksheet
        .write_number_with_format(0, 0, 0, border)
        .map_err(|e| Error::Excel(format!("placeholder write failed: {}", e)))?;

    for i in 0..names.len().saturating_sub(1) {
        worksheet
            .write_string_with_format(0, col(i + 1)?, &names[i + 1], border)
            .map_err(|e| Error::Excel(format!("column header write failed: {}", e)))?;
        worksheet
            .write_string_with_format(row(i + 1)?, col(i)?, &names[i], border)
            .map_err(|e| Error::Excel(format!("row header write failed: {}", e)))?;
    }

    Ok(())
}

/// 上三角のスコアを丸めて書き込み、書いた値の範囲を返す
pub fn write_scores(
    worksheet: &mut Worksheet,
    matrix: &SimilarityMatrix,
    decimals: u32,
    border: &Format,
) -> Result<Option<ScoreRange>> {
    let mut range = None;

    for pair in matrix.upper_triangle() {
        let value = round_score(pair.score, decimals);
        worksheet
            .write_number_with_format(row(pair.i + 1)?, col(pair.j)?, value, border)
            .map_err(|e| Error::Excel(format!("score write failed: {}", e)))?;
        range = Some(ScoreRange::include(range, value));
    }

    Ok(range)
}

/// スコア領域（1..n-1 行 × 1..n-1 列）に3色スケールを設定
///
/// 中間点は観測範囲の数値的な中央値。スコアが無い場合は何もしない。
pub fn apply_color_scale(
    worksheet: &mut Worksheet,
    count: usize,
    range: Option<ScoreRange>,
    colors: &ColorScale,
) -> Result<()> {
    let range = match range {
        Some(r) if count >= 2 => r,
        _ => return Ok(()),
    };

    let conditional_format = ConditionalFormat3ColorScale::new()
        .set_minimum_color(colors.minimum)
        .set_midpoint(ConditionalFormatType::Number, range.midpoint())
        .set_midpoint_color(colors.midpoint)
        .set_maximum_color(colors.maximum);

    let last = count - 1;
    worksheet
        .add_conditional_format(1, 1, row(last)?, col(last)?, &conditional_format)
        .map_err(|e| Error::Excel(format!("conditional format failed: {}", e)))?;

    Ok(())
}

/// 類似度レポートを一括でバッファに生成
///
/// CLI は段階ごとに書き込む `ReportWriter` を使う。こちらはシートXMLの検証用。
pub fn generate_excel_buffer(
    names: &[String],
    matrix: &SimilarityMatrix,
    options: &SheetOptions,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let border = border_format();
    let worksheet = workbook.add_worksheet();

    write_headers(worksheet, names, &border)?;
    let range = write_scores(worksheet, matrix, options.decimals, &border)?;
    apply_color_scale(worksheet, names.len(), range, &options.color_scale)?;
    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("save failed: {}", e)))
}

fn row(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| Error::Excel(format!("row {} out of range", index)))
}

fn col(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .ok()
        .filter(|c| *c < 16_384)
        .ok_or_else(|| Error::Excel(format!("column {} out of range", index)))
}
