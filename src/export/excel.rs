//! Excel生成（CLI版）
//!
//! ReportWriter が実行中のワークブックを所有し、段階ごとに書き込んで最後に保存する。
//! ディスクに書くのは save のみ。

use crate::error::{IngredientError, Result};
use ingredient_similarity_common::export::excel_core::{
    self, border_format, ScoreRange, SheetOptions,
};
use ingredient_similarity_common::SimilarityMatrix;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

pub struct ReportWriter {
    workbook: Workbook,
    border: Format,
    options: SheetOptions,
    name_count: usize,
    range: Option<ScoreRange>,
}

impl ReportWriter {
    pub fn new(options: SheetOptions) -> Self {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();

        Self {
            workbook,
            border: border_format(),
            options,
            name_count: 0,
            range: None,
        }
    }

    /// 行・列ヘッダーとプレースホルダーを書き込む
    pub fn write_headers(&mut self, names: &[String]) -> Result<()> {
        let worksheet = first_sheet(&mut self.workbook)?;
        excel_core::write_headers(worksheet, names, &self.border)?;
        self.name_count = names.len();
        Ok(())
    }

    /// 上三角の類似度を書き込む
    pub fn write_scores(&mut self, matrix: &SimilarityMatrix) -> Result<()> {
        let worksheet = first_sheet(&mut self.workbook)?;
        self.range = excel_core::write_scores(worksheet, matrix, self.options.decimals, &self.border)?;
        Ok(())
    }

    pub fn apply_color_scale(&mut self) -> Result<()> {
        let worksheet = first_sheet(&mut self.workbook)?;
        excel_core::apply_color_scale(
            worksheet,
            self.name_count,
            self.range,
            &self.options.color_scale,
        )?;
        Ok(())
    }

    pub fn autofit(&mut self) -> Result<()> {
        first_sheet(&mut self.workbook)?.autofit();
        Ok(())
    }

    /// ディスクに保存してワークブックを閉じる
    pub fn save(mut self, output_path: &Path) -> Result<()> {
        self.workbook
            .save(output_path)
            .map_err(|e| IngredientError::ExcelGeneration(format!("{}: {}", output_path.display(), e)))
    }
}

fn first_sheet(workbook: &mut Workbook) -> Result<&mut Worksheet> {
    workbook
        .worksheet_from_index(0)
        .map_err(|e| IngredientError::ExcelGeneration(format!("worksheet missing: {}", e)))
}
