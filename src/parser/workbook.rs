//! Workbook Parser
//!
//! calamineを使用してワークブックを開き、シートを選択・読み込むモジュール。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use tracing::debug;

use crate::api::SheetSelector;
use crate::error::XlsxMergeError;
use crate::parser::table::table_from_range;
use crate::security::SecurityConfig;
use crate::types::RowTable;

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 形式（xlsx / xlsm / xlsb / xls / ods）は内容から自動判定します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// パスを指定してワークブックを開く
    ///
    /// ファイルハンドルはこの関数の中で閉じられます。
    pub fn open_path(path: &Path, security: &SecurityConfig) -> Result<Self, XlsxMergeError> {
        let file = File::open(path)?;
        security.check_input_size(file.metadata()?.len())?;
        Self::open(file, security)
    }

    /// リーダーからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー
    /// * `security` - 入力サイズの上限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxMergeError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxMergeError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, XlsxMergeError> {
        // 上限+1バイトまでしか読まない
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を解決
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxMergeError::SheetIndexOutOfRange)` - インデックスが範囲外の場合
    /// * `Err(XlsxMergeError::SheetNotFound)` - 指定名のシートがない場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxMergeError> {
        let all_sheet_names = self.get_sheet_names();

        match selector {
            SheetSelector::Index(index) => all_sheet_names.get(*index).cloned().ok_or(
                XlsxMergeError::SheetIndexOutOfRange {
                    index: *index,
                    total: all_sheet_names.len(),
                },
            ),

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(XlsxMergeError::SheetNotFound(name.clone()));
                }
                Ok(name.clone())
            }

            // 名前の完全一致を優先し、なければインデックスとして解決
            SheetSelector::NameOrIndex(text) => {
                if all_sheet_names.contains(text) {
                    return Ok(text.clone());
                }
                match text.parse::<usize>() {
                    Ok(index) => all_sheet_names.get(index).cloned().ok_or(
                        XlsxMergeError::SheetIndexOutOfRange {
                            index,
                            total: all_sheet_names.len(),
                        },
                    ),
                    Err(_) => Err(XlsxMergeError::SheetNotFound(text.clone())),
                }
            }
        }
    }

    /// シートを読み込み、1行目をヘッダーとするテーブルに変換
    pub fn read_table(&mut self, sheet_name: &str) -> Result<RowTable, XlsxMergeError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        debug!(
            sheet = sheet_name,
            height = range.height(),
            width = range.width(),
            "loaded worksheet range"
        );
        table_from_range(&range)
    }
}
