//! レポート生成の統合テスト
//!
//! CSV → スタブ埋め込み → Excel を実行し、calamine で出力を読み戻して検証

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use ingredient_similarity::config::Config;
use ingredient_similarity::embedder::Embedder;
use ingredient_similarity::error::{IngredientError, Result};
use ingredient_similarity::pipeline::{generate_report, ReportSummary};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const HEADER: &str = "id,name,shelf_life,opened_shelf_life,created_at\n";

/// 文字のヒストグラムを返す決定的なスタブ
struct CharEmbedder;

impl Embedder for CharEmbedder {
    fn encode(&mut self, names: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(names
            .iter()
            .map(|name| {
                let mut v = vec![0.0; 36];
                for c in name.to_lowercase().chars() {
                    if let Some(idx) = c.to_digit(36) {
                        v[idx as usize] += 1.0;
                    }
                }
                v
            })
            .collect())
    }
}

fn load_char_embedder(_config: &Config) -> Result<CharEmbedder> {
    Ok(CharEmbedder)
}

fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("ingredients.csv");
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).expect("CSV書き込み失敗");
    path
}

fn run(dir: &Path, rows: &[&str]) -> ReportSummary {
    let input = write_csv(dir, rows);
    generate_report(&input, dir, &Config::default(), load_char_embedder).expect("レポート生成失敗")
}

fn read_sheet(path: &Path) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Excel読み込み失敗");
    workbook.worksheet_range("Sheet1").expect("シートが見つからない")
}

fn cell(range: &Range<Data>, row: u32, col: u32) -> Option<Data> {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => None,
        Some(value) => Some(value.clone()),
    }
}

fn number(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match cell(range, row, col) {
        Some(Data::Float(f)) => f,
        Some(Data::Int(i)) => i as f64,
        other => panic!("({}, {}) は数値ではない: {:?}", row, col, other),
    }
}

fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match cell(range, row, col) {
        Some(Data::String(s)) => s,
        other => panic!("({}, {}) は文字列ではない: {:?}", row, col, other),
    }
}

fn xlsx_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|e| e == "xlsx").unwrap_or(false))
        .collect()
}

#[test]
fn test_flour_example_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &[
            "1,Flour,365,30,2023-01-01T00:00:00",
            "2,Flour Type 1,365,30,2023-01-01T00:00:00",
            "3,Sugar,730,365,2023-01-01T00:00:00",
        ],
    );

    assert_eq!(summary.names, vec!["Flour", "Flour Type 1", "Sugar"]);
    assert!(summary.output_path.exists(), "Excelファイルが作成されていない");

    let file_name = summary.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.ends_with("_INGREDIENTS_DATA_VALIDATION.xlsx"));
    // YYYY_MM_DD_HH_MM_SS
    assert!(chrono::NaiveDateTime::parse_from_str(&file_name[..19], "%Y_%m_%d_%H_%M_%S").is_ok());

    let sheet = read_sheet(&summary.output_path);

    // プレースホルダー
    assert_eq!(number(&sheet, 0, 0), 0.0);

    // 列ヘッダー（先頭の名前は使わない）
    assert_eq!(text(&sheet, 0, 1), "Flour Type 1");
    assert_eq!(text(&sheet, 0, 2), "Sugar");

    // 行ヘッダー（末尾の名前は使わない）
    assert_eq!(text(&sheet, 1, 0), "Flour");
    assert_eq!(text(&sheet, 2, 1), "Flour Type 1");

    let flour_type = number(&sheet, 1, 1);
    let flour_sugar = number(&sheet, 1, 2);
    let type_sugar = number(&sheet, 2, 2);
    assert!(flour_type > flour_sugar);
    assert!((flour_type - 0.71).abs() < 1e-9);
    assert!((flour_sugar - 0.4).abs() < 1e-9);
    assert!(type_sugar > 0.0);

    // 3行目は存在しない
    assert!(cell(&sheet, 3, 0).is_none());
    assert!(cell(&sheet, 0, 3).is_none());
}

#[test]
fn test_score_region_is_upper_triangular() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &[
            "1,Butter,30,7,2023-01-01",
            "2,Peanut Butter,180,90,2023-01-02",
            "3,Salt,,,2023-01-03",
            "4,Sea Salt,,,2023-01-04",
            "5,Olive Oil,540,60,2023-01-05",
        ],
    );

    let n = summary.names.len() as u32;
    let sheet = read_sheet(&summary.output_path);

    for row in 1..n {
        let i = row - 1;
        for col in 0..n {
            if col > i {
                let value = number(&sheet, row, col);
                let expected = summary.matrix.get(i as usize, col as usize).unwrap() as f64;
                assert!((value - (expected * 100.0).round() / 100.0).abs() < 1e-9);
            } else if col == i {
                assert_eq!(text(&sheet, row, col), summary.names[i as usize]);
            } else {
                assert!(cell(&sheet, row, col).is_none(), "({}, {}) は空であるべき", row, col);
            }
        }
    }
}

#[test]
fn test_scores_are_rounded_to_two_decimals() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &["1,abc,1,1,2023-01-01", "2,abd,1,1,2023-01-01", "3,xyz a,1,1,2023-01-01"],
    );

    let sheet = read_sheet(&summary.output_path);
    for (row, col) in [(1, 1), (1, 2), (2, 2)] {
        let value = number(&sheet, row, col);
        assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
    }
}

#[test]
fn test_duplicate_names_are_kept() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &["1,Milk,7,3,2023-01-01", "1,Milk,7,3,2023-01-01"],
    );

    assert_eq!(summary.names, vec!["Milk", "Milk"]);
    let sheet = read_sheet(&summary.output_path);
    assert_eq!(text(&sheet, 0, 1), "Milk");
    assert_eq!(text(&sheet, 1, 0), "Milk");
    assert_eq!(number(&sheet, 1, 1), 1.0);
}

#[test]
fn test_single_record_only_placeholder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(dir.path(), &["1,Flour,365,30,2023-01-01T00:00:00"]);

    let sheet = read_sheet(&summary.output_path);
    assert_eq!(number(&sheet, 0, 0), 0.0);
    assert!(cell(&sheet, 0, 1).is_none());
    assert!(cell(&sheet, 1, 0).is_none());
    assert!(summary.top_pairs(5).is_empty());
}

#[test]
fn test_no_records_only_placeholder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(dir.path(), &[]);

    assert!(summary.names.is_empty());
    assert!(summary.matrix.is_empty());
    let sheet = read_sheet(&summary.output_path);
    assert_eq!(number(&sheet, 0, 0), 0.0);
    assert!(cell(&sheet, 0, 1).is_none());
}

#[test]
fn test_unparsable_shelf_life_still_loads() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &["1,Honey,forever,,2023-01-01", "2,Vinegar,,n/a,2023-01-01"],
    );

    assert_eq!(summary.names, vec!["Honey", "Vinegar"]);
    assert!(summary.output_path.exists());
}

#[test]
fn test_bad_timestamp_writes_no_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = write_csv(
        dir.path(),
        &["1,Flour,365,30,2023-01-01T00:00:00", "2,Sugar,730,365,last tuesday"],
    );

    let result = generate_report(&input, dir.path(), &Config::default(), load_char_embedder);
    assert!(matches!(
        result,
        Err(IngredientError::Common(ingredient_similarity_common::Error::InvalidTimestamp { row: 2, .. }))
    ));
    assert!(xlsx_files(dir.path()).is_empty(), "出力ファイルが作成されている");
}

#[test]
fn test_model_failure_writes_no_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = write_csv(dir.path(), &["1,Flour,365,30,2023-01-01", "2,Sugar,730,365,2023-01-01"]);

    let result = generate_report(&input, dir.path(), &Config::default(), |_: &Config| {
        Err::<CharEmbedder, _>(IngredientError::Embedding("model unavailable".to_string()))
    });

    assert!(matches!(result, Err(IngredientError::Embedding(_))));
    assert!(xlsx_files(dir.path()).is_empty(), "出力ファイルが作成されている");
}

#[test]
fn test_unwritable_output_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = write_csv(dir.path(), &["1,Flour,365,30,2023-01-01", "2,Sugar,730,365,2023-01-01"]);
    let missing = dir.path().join("does-not-exist");

    let result = generate_report(&input, &missing, &Config::default(), load_char_embedder);
    assert!(matches!(result, Err(IngredientError::ExcelGeneration(_))));
}

#[test]
fn test_top_pairs_sorted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = run(
        dir.path(),
        &[
            "1,Flour,365,30,2023-01-01",
            "2,Flour Type 1,365,30,2023-01-01",
            "3,Sugar,730,365,2023-01-01",
        ],
    );

    let pairs = summary.top_pairs(5);
    assert_eq!(pairs.len(), 3);
    assert_eq!((pairs[0].0, pairs[0].1), ("Flour", "Flour Type 1"));
    assert!(pairs.windows(2).all(|w| w[0].2 >= w[1].2));
    assert_eq!(summary.top_pairs(1).len(), 1);
}
