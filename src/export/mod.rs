pub mod excel;

use crate::config::Config;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// `{timestamp}_{suffix}.xlsx`（ローカル時刻）
pub fn report_file_name(config: &Config, now: &DateTime<Local>) -> String {
    format!("{}_{}.xlsx", now.format(&config.timestamp_format), config.file_suffix)
}

pub fn report_path(output_dir: &Path, config: &Config, now: &DateTime<Local>) -> PathBuf {
    output_dir.join(report_file_name(config, now))
}
