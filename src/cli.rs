use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ingredient-similarity")]
#[command(version)]
#[command(
    about = "Inputs a csv file of the ingredients rows and outputs an Excel file summarizing the analysed rows.",
    long_about = None
)]
pub struct Cli {
    /// 食材CSVファイル（id,name,shelf_life,opened_shelf_life,created_at）
    pub filename: PathBuf,
}
