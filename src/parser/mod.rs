//! Parser Module
//!
//! calamineを使用したExcelファイル解析。
//! 入力ファイル1件から選択シートを読み込み、出所列付きのテーブルを作ります。

mod table;
mod workbook;

use workbook::WorkbookParser;

use tracing::debug;

use crate::api::SheetSelector;
use crate::error::XlsxMergeError;
use crate::security::SecurityConfig;
use crate::types::{RowTable, SourceFile};

/// 入力ファイル1件からテーブルを抽出
///
/// ワークブックを開き、`selector`のシートを読み込んで`__source_file`列を追加します。
/// 失敗はそのファイル単位のエラーとして返され、部分的な行は返しません。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmerge::{extract, SheetSelector, SourceFile};
///
/// let file = SourceFile::new("/data/jan.xlsx");
/// match extract(&file, &SheetSelector::Index(0)) {
///     Ok(table) => println!("{} rows", table.len()),
///     Err(e) => eprintln!("skipped {}: {}", file.name(), e),
/// }
/// ```
pub fn extract(file: &SourceFile, selector: &SheetSelector) -> Result<RowTable, XlsxMergeError> {
    extract_with(file, selector, &SecurityConfig::default())
}

pub(crate) fn extract_with(
    file: &SourceFile,
    selector: &SheetSelector,
    security: &SecurityConfig,
) -> Result<RowTable, XlsxMergeError> {
    let mut parser = WorkbookParser::open_path(file.path(), security)?;
    let sheet_name = parser.select_sheet(selector)?;
    let table = parser.read_table(&sheet_name)?;

    debug!(
        file = file.name(),
        sheet = %sheet_name,
        rows = table.len(),
        columns = table.columns().len(),
        "extracted sheet"
    );

    Ok(table.with_source_column(file.name()))
}
