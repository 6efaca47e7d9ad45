//! 食材CSVパーサー
//!
//! ヘッダー行付きのカンマ区切りテキストを IngredientRecord の列に変換する。
//! ダブルクォート（`""` エスケープ、改行を含むフィールド）に対応。

use crate::error::{Error, Result};
use crate::types::{CreatedAt, IngredientRecord};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

pub const COLUMN_ID: &str = "id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_SHELF_LIFE: &str = "shelf_life";
pub const COLUMN_OPENED_SHELF_LIFE: &str = "opened_shelf_life";
pub const COLUMN_CREATED_AT: &str = "created_at";

/// 必須カラムのインデックス（ヘッダー内の順序は問わない）
///
/// 同名のカラムが重複する場合は最後のものを使う。
struct ColumnIndex {
    id: usize,
    name: usize,
    shelf_life: usize,
    opened_shelf_life: usize,
    created_at: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |column: &str| {
            header
                .iter()
                .rposition(|h| h == column)
                .ok_or_else(|| Error::MissingColumn(column.to_string()))
        };

        Ok(Self {
            id: find(COLUMN_ID)?,
            name: find(COLUMN_NAME)?,
            shelf_life: find(COLUMN_SHELF_LIFE)?,
            opened_shelf_life: find(COLUMN_OPENED_SHELF_LIFE)?,
            created_at: find(COLUMN_CREATED_AT)?,
        })
    }

    fn max(&self) -> usize {
        [
            self.id,
            self.name,
            self.shelf_life,
            self.opened_shelf_life,
            self.created_at,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// CSV文字列から食材レコードを読み込む
///
/// 行の順序はファイルの順序のまま。`created_at` が1行でも不正なら全体がエラー。
pub fn parse_ingredients(content: &str) -> Result<Vec<IngredientRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut rows = tokenize(content)?.into_iter();

    let header = rows.next().ok_or(Error::MissingHeader)?;
    let columns = ColumnIndex::from_header(&header)?;
    let required_len = columns.max() + 1;

    let mut records = Vec::new();

    for (idx, fields) in rows.enumerate() {
        let row = idx + 1;

        if fields.len() < required_len {
            return Err(Error::MalformedRow {
                row,
                reason: format!(
                    "expected at least {} fields, found {}",
                    required_len,
                    fields.len()
                ),
            });
        }

        let created_raw = &fields[columns.created_at];
        let created_at = parse_created_at(created_raw).ok_or_else(|| Error::InvalidTimestamp {
            row,
            value: created_raw.clone(),
        })?;

        records.push(IngredientRecord {
            id: fields[columns.id].clone(),
            name: fields[columns.name].clone(),
            shelf_life: parse_int_or_none(&fields[columns.shelf_life]),
            opened_shelf_life: parse_int_or_none(&fields[columns.opened_shelf_life]),
            created_at,
        });
    }

    Ok(records)
}

/// 名前列を抽出（順序維持、正規化なし）
pub fn names_of(records: &[IngredientRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

/// 整数に変換できなければ None
pub fn parse_int_or_none(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// ISO-8601 の日時文字列をパース
///
/// 対応形式: `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH[:MM[:SS[.fff]]]`,
/// 時刻付きなら末尾に `Z` / `±HH:MM` / `±HHMM` を付けられる。
pub fn parse_created_at(value: &str) -> Option<CreatedAt> {
    let date_part = value.get(..10)?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    let rest = &value[10..];
    if rest.is_empty() {
        return Some(CreatedAt::naive(date.and_hms_opt(0, 0, 0)?));
    }

    let time_and_offset = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
    let (time_part, offset) = split_offset(time_and_offset)?;
    let time = parse_time(time_part)?;
    let local = NaiveDateTime::new(date, time);

    Some(match offset {
        Some(offset) => CreatedAt::with_offset(local, offset),
        None => CreatedAt::naive(local),
    })
}

/// 時刻部分とUTCオフセットを分離
fn split_offset(value: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(time) = value.strip_suffix('Z') {
        return Some((time, Some(FixedOffset::east_opt(0)?)));
    }

    match value.rfind(|c: char| c == '+' || c == '-') {
        Some(pos) => {
            let sign = if value[pos..].starts_with('-') { -1 } else { 1 };
            let seconds = parse_offset_seconds(&value[pos + 1..])?;
            Some((&value[..pos], Some(FixedOffset::east_opt(sign * seconds)?)))
        }
        None => Some((value, None)),
    }
}

fn parse_offset_seconds(value: &str) -> Option<i32> {
    let digits: String = value.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 3600 + minutes * 60)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    const FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

    // 時のみ（`T10`）は分を補う
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_digit()) {
        return NaiveTime::parse_from_str(&format!("{}:00", value), "%H:%M").ok();
    }

    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// CSVを行・フィールドに分解（ダブルクォート対応）
///
/// 空行はスキップ。閉じられていないクォートはエラー。
fn tokenize(content: &str) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_quoted = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_quoted => {
                in_quotes = true;
                field_quoted = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_quoted = false;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut row, &mut field, &mut field_quoted);
            }
            '\n' => end_row(&mut rows, &mut row, &mut field, &mut field_quoted),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::MalformedRow {
            row: rows.len(),
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || field_quoted || !row.is_empty() {
        end_row(&mut rows, &mut row, &mut field, &mut field_quoted);
    }

    Ok(rows)
}

fn end_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Vec<String>,
    field: &mut String,
    field_quoted: &mut bool,
) {
    row.push(std::mem::take(field));
    let blank = row.len() == 1 && row[0].is_empty() && !*field_quoted;
    let finished = std::mem::take(row);
    if !blank {
        rows.push(finished);
    }
    *field_quoted = false;
}
