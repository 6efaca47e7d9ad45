use ingredient_similarity_common::export::excel_core::{ColorScale, SheetOptions};

/// 実行設定
///
/// 設定ファイル・環境変数は読まない。値はすべて既定値。
#[derive(Debug, Clone)]
pub struct Config {
    /// 埋め込みモデル名
    pub model: String,
    /// モデル取得時に進捗を表示
    pub show_download_progress: bool,
    /// スコアの小数点以下桁数
    pub decimals: u32,
    /// 出力ファイル名の接尾辞（`{timestamp}_{suffix}.xlsx`）
    pub file_suffix: String,
    /// 出力ファイル名のタイムスタンプ形式（ローカル時刻）
    pub timestamp_format: String,
    /// コンソールに表示する類似ペア数
    pub top_pairs: usize,
    pub color_scale: ColorScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "all-MiniLM-L6-v2".into(),
            show_download_progress: true,
            decimals: 2,
            file_suffix: "INGREDIENTS_DATA_VALIDATION".into(),
            timestamp_format: "%Y_%m_%d_%H_%M_%S".into(),
            top_pairs: 5,
            color_scale: ColorScale::default(),
        }
    }
}

impl Config {
    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            decimals: self.decimals,
            color_scale: self.color_scale,
        }
    }
}
