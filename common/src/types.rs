//! 食材データの型定義
//!
//! - IngredientRecord: 入力CSVの1行
//! - CreatedAt: ISO-8601の作成日時（オフセット任意）

use chrono::{FixedOffset, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// 食材レコード
///
/// 下流で使うのは `name` のみ。その他のフィールドは保持するだけ。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRecord {
    pub id: String,

    pub name: String,

    /// 賞味期限（日数）。空欄・数値以外は None
    pub shelf_life: Option<i64>,

    /// 開封後の賞味期限（日数）
    pub opened_shelf_life: Option<i64>,

    pub created_at: CreatedAt,
}

impl fmt::Display for IngredientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// 作成日時
///
/// 入力に書かれた壁時計時刻と、明示されていればUTCオフセット。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedAt {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl CreatedAt {
    pub fn naive(local: NaiveDateTime) -> Self {
        Self { local, offset: None }
    }

    pub fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            local,
            offset: Some(offset),
        }
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%dT%H:%M:%S"))?;

        let micros = self.local.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{:06}", micros)?;
        }

        if let Some(offset) = self.offset {
            let seconds = offset.local_minus_utc();
            let sign = if seconds < 0 { '-' } else { '+' };
            let minutes = seconds.abs() / 60;
            write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)?;
        }

        Ok(())
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
