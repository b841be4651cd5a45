//! Merge Module
//!
//! 抽出済みテーブルを縦方向に連結するモジュール。
//!
//! 列は全テーブルの列の和集合で、初出順に並べます。
//! 出所列`__source_file`は常に最後の列になります。
//! その列を持たない行の値は`CellValue::Empty`で埋めます。

use std::collections::HashMap;

use tracing::debug;

use crate::api::SOURCE_COLUMN;
use crate::error::XlsxMergeError;
use crate::types::{CellValue, MergedTable, RowTable};

/// テーブルを読み込み順に連結
///
/// # 戻り値
///
/// * `Ok(MergedTable)` - 1件以上のテーブルを連結した結果
/// * `Err(XlsxMergeError::NothingToMerge)` - テーブルが1件もない場合
///
/// # 使用例
///
/// ```rust
/// use xlsxmerge::{merge, CellValue, RowTable};
///
/// # fn main() -> Result<(), xlsxmerge::XlsxMergeError> {
/// let a = RowTable::from_rows(
///     vec!["Name".into(), "Age".into()],
///     vec![vec![CellValue::from("alice"), CellValue::from(30.0)]],
/// )?
/// .with_source_column("a.xlsx");
/// let b = RowTable::from_rows(
///     vec!["Name".into(), "City".into()],
///     vec![vec![CellValue::from("bob"), CellValue::from("Osaka")]],
/// )?
/// .with_source_column("b.xlsx");
///
/// let merged = merge(vec![a, b])?;
/// assert_eq!(merged.columns(), &["Name", "Age", "City", "__source_file"]);
/// assert_eq!(merged.value(0, "City"), Some(&CellValue::Empty));
/// # Ok(())
/// # }
/// ```
pub fn merge(tables: Vec<RowTable>) -> Result<MergedTable, XlsxMergeError> {
    if tables.is_empty() {
        return Err(XlsxMergeError::NothingToMerge { attempted: 0 });
    }

    let columns = union_columns(&tables);
    let positions: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let total_rows = tables.iter().map(RowTable::len).sum();
    let mut rows = Vec::with_capacity(total_rows);

    for table in &tables {
        // このテーブルの列番号 -> 結合後の列番号
        let mapping: Vec<usize> = table
            .columns()
            .iter()
            .map(|name| positions[name.as_str()])
            .collect();

        for row in table.rows() {
            let mut merged_row = vec![CellValue::Empty; columns.len()];
            for (value, &target) in row.iter().zip(&mapping) {
                merged_row[target] = value.clone();
            }
            rows.push(merged_row);
        }
    }

    debug!(
        tables = tables.len(),
        rows = rows.len(),
        columns = columns.len(),
        "merged tables"
    );

    let source_count = tables.len();
    let table = RowTable::from_rows(columns, rows)?;
    Ok(MergedTable::new(table, source_count))
}

/// 全テーブルの列名の和集合（初出順、出所列は末尾）
fn union_columns(tables: &[RowTable]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut has_source = false;

    for table in tables {
        for name in table.columns() {
            if name == SOURCE_COLUMN {
                has_source = true;
            } else if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }

    if has_source {
        columns.push(SOURCE_COLUMN.to_string());
    }
    columns
}
