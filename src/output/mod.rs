//! Output Module
//!
//! 結合済みテーブルを1シートのワークブックとして書き出すモジュール。
//! 1行目は列名のヘッダー行で、行インデックス列は出力しません。

use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::info;

use crate::error::XlsxMergeError;
use crate::types::{CellValue, MergedTable};

/// ワークシートの最大行数（ヘッダー行を含む）
pub const MAX_ROWS: usize = 1_048_576;

/// ワークシートの最大列数
pub const MAX_COLUMNS: usize = 16_384;

/// 出力シート名
const SHEET_NAME: &str = "Sheet1";

/// セルの書式
struct CellFormats {
    header: Format,
    datetime: Format,
    date: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            date: Format::new().set_num_format("yyyy-mm-dd"),
        }
    }

    fn for_datetime(&self, dt: &NaiveDateTime) -> &Format {
        if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
            &self.date
        } else {
            &self.datetime
        }
    }
}

/// 結合済みテーブルをファイルに書き出す
///
/// 既存のファイルは確認なしに上書きされます。
///
/// # 戻り値
///
/// * `Ok(())` - 書き出しに成功した場合
/// * `Err(XlsxMergeError::SheetTooLarge)` - ワークシートの上限を超える場合（何も書き出さない）
/// * `Err(XlsxMergeError::Write)` - 保存に失敗した場合
pub fn write(table: &MergedTable, path: &Path) -> Result<(), XlsxMergeError> {
    let mut workbook = build_workbook(table)?;
    workbook.save(path)?;

    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "wrote merged workbook"
    );
    Ok(())
}

/// 結合済みテーブルをメモリ上のxlsxバイト列に変換
pub fn write_to_buffer(table: &MergedTable) -> Result<Vec<u8>, XlsxMergeError> {
    let mut workbook = build_workbook(table)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(table: &MergedTable) -> Result<Workbook, XlsxMergeError> {
    check_limits(table)?;

    let formats = CellFormats::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &formats.header)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, value, &formats)?;
        }
    }

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    formats: &CellFormats,
) -> Result<(), XlsxMergeError> {
    match value {
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::String(s) | CellValue::Error(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, formats.for_datetime(dt))?;
        }
        // 欠損値は空セルのまま
        CellValue::Empty => {}
    }
    Ok(())
}

fn check_limits(table: &MergedTable) -> Result<(), XlsxMergeError> {
    let rows = table.row_count() + 1;
    let columns = table.columns().len();

    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(XlsxMergeError::SheetTooLarge {
            rows,
            columns,
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::types::RowTable;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn merged(columns: &[&str], rows: Vec<Vec<CellValue>>) -> MergedTable {
        let table =
            RowTable::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap();
        merge(vec![table]).unwrap()
    }

    fn read_back(bytes: Vec<u8>) -> calamine::Range<Data> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(sheets.sheet_names(), vec![SHEET_NAME.to_string()]);
        sheets.worksheet_range(SHEET_NAME).unwrap()
    }

    #[test]
    fn test_header_and_values() {
        let table = merged(
            &["Name", "Amount", "Paid"],
            vec![
                vec![
                    CellValue::from("alice"),
                    CellValue::from(12.5),
                    CellValue::Bool(true),
                ],
                vec![CellValue::from("bob"), CellValue::Empty, CellValue::Bool(false)],
            ],
        );

        let range = read_back(write_to_buffer(&table).unwrap());

        assert_eq!(range.get_size(), (3, 3));
        assert_eq!(range.get((0, 0)), Some(&Data::String("Name".to_string())));
        assert_eq!(range.get((0, 2)), Some(&Data::String("Paid".to_string())));
        assert_eq!(range.get((1, 1)), Some(&Data::Float(12.5)));
        assert_eq!(range.get((1, 2)), Some(&Data::Bool(true)));
        assert_eq!(range.get((2, 1)), Some(&Data::Empty));
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        let table = merged(&["When"], vec![vec![CellValue::DateTime(dt)]]);

        let range = read_back(write_to_buffer(&table).unwrap());

        match range.get((1, 0)) {
            Some(Data::DateTime(value)) => assert_eq!(value.as_datetime(), Some(dt)),
            other => panic!("Expected DateTime cell, got {:?}", other),
        }
    }

    #[test]
    fn test_error_values_written_as_text() {
        let table = merged(&["Ratio"], vec![vec![CellValue::Error("#DIV/0!".to_string())]]);
        let range = read_back(write_to_buffer(&table).unwrap());
        assert_eq!(range.get((1, 0)), Some(&Data::String("#DIV/0!".to_string())));
    }

    #[test]
    fn test_too_many_columns() {
        let columns: Vec<String> = (0..=MAX_COLUMNS).map(|i| format!("c{}", i)).collect();
        let table = merge(vec![RowTable::new(columns)]).unwrap();

        match write_to_buffer(&table) {
            Err(XlsxMergeError::SheetTooLarge { columns, .. }) => {
                assert_eq!(columns, MAX_COLUMNS + 1)
            }
            other => panic!("Expected SheetTooLarge, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"old contents").unwrap();

        let table = merged(&["X"], vec![vec![CellValue::from(1.0)]]);
        write(&table, &path).unwrap();

        let range = read_back(std::fs::read(&path).unwrap());
        assert_eq!(range.get((1, 0)), Some(&Data::Float(1.0)));
    }
}
