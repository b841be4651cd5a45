//! Table Conversion
//!
//! calamineのセル範囲を`RowTable`に変換するモジュール。
//! 最初の空でない行をヘッダーとし、完全に空の行は読み飛ばします。
//! 列は常にA列から数えます。

use std::collections::HashMap;
use std::iter;

use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::XlsxMergeError;
use crate::types::{CellValue, RowTable};

/// セル範囲をテーブルに変換
///
/// calamineの範囲は最初の使用セルから始まるため、それより左の列は空セルで補います。
/// 空のシートは列も行もないテーブルになります。
pub(crate) fn table_from_range(range: &Range<Data>) -> Result<RowTable, XlsxMergeError> {
    let leading = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range
        .rows()
        .map(|row| {
            iter::repeat(CellValue::Empty)
                .take(leading)
                .chain(row.iter().map(convert_cell))
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.iter().all(CellValue::is_empty));

    let Some(header) = rows.next() else {
        return Ok(RowTable::default());
    };

    let mut table = RowTable::new(header_names(&header));
    for row in rows {
        table.push_row(row)?;
    }
    Ok(table)
}

/// ヘッダー行から列名を生成
///
/// - 空のセルは`Unnamed: <列番号>`
/// - 重複する名前には`.1`、`.2`…を付けて一意にする
/// - 付けた名前がさらに衝突した場合は、その名前に続けて番号を付ける（`A.1.1`）
pub(crate) fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(header.len());
    let mut names = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let mut name = match cell.as_header_text() {
            text if text.is_empty() => format!("Unnamed: {}", idx),
            text => text,
        };

        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{}.{}", name, count);
            count = counts.get(&name).copied().unwrap_or(0);
        }

        counts.insert(name.clone(), 1);
        names.push(name);
    }

    names
}

/// calamineのセルを`CellValue`に変換
pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            // 経過時間はシリアル値（日数）のまま扱う
            if dt.is_duration() {
                CellValue::Number(dt.as_f64())
            } else {
                dt.as_datetime()
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}

/// ISO 8601形式の日時・日付文字列を解析（ods由来）
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}
