//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::api::SOURCE_COLUMN;
use crate::error::XlsxMergeError;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル（欠損値）
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// ヘッダーセルとして使う文字列を取得
    ///
    /// 整数値の数値は小数点なしで表現します（`2024.0` -> `"2024"`）。
    pub fn as_header_text(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// 入力ワークブック1件
///
/// 起動時に一度だけ列挙され、以後変更されません。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    path: PathBuf,
    name: String,
}

impl SourceFile {
    /// パスから生成（ファイル名部分をベース名として保持）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    /// ファイルパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ベース名（例: `jan.xlsx`）
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 1シート分の表データ
///
/// 列名の並びと、各列に1つずつ値を持つ行の並びで構成されます。
/// すべての行は列数と同じ幅を持ちます。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RowTable {
    /// 列名を指定して空のテーブルを生成
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 列名と行からテーブルを生成
    ///
    /// 列数より短い行は`CellValue::Empty`で埋めます。
    /// 列数より長い行は`XlsxMergeError::RowWidthMismatch`になります。
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, XlsxMergeError> {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// 行を追加
    pub fn push_row(&mut self, mut row: Vec<CellValue>) -> Result<(), XlsxMergeError> {
        let width = self.columns.len();
        if row.len() > width {
            return Err(XlsxMergeError::RowWidthMismatch {
                row: self.rows.len(),
                expected: width,
                found: row.len(),
            });
        }
        row.resize(width, CellValue::Empty);
        self.rows.push(row);
        Ok(())
    }

    /// 列名の一覧
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 行の一覧
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 行が1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列インデックスを取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 指定行・指定列の値を取得
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 出所列を末尾に追加し、全行にファイル名を設定
    ///
    /// 同名の列が既にある場合は、その列を取り除いてから追加し直します。
    pub fn with_source_column(mut self, source_name: &str) -> Self {
        if let Some(existing) = self.column_index(SOURCE_COLUMN) {
            self.columns.remove(existing);
            for row in &mut self.rows {
                row.remove(existing);
            }
        }

        self.columns.push(SOURCE_COLUMN.to_string());
        for row in &mut self.rows {
            row.push(CellValue::String(source_name.to_string()));
        }
        self
    }
}

/// 結合済みテーブル
///
/// すべての`RowTable`を読み込み順に縦に連結したものです。
/// 列はすべての入力列の和集合で、値のない位置は`CellValue::Empty`になります。
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    table: RowTable,
    source_count: usize,
}

impl MergedTable {
    pub(crate) fn new(table: RowTable, source_count: usize) -> Self {
        Self {
            table,
            source_count,
        }
    }

    /// 結合元のテーブル数
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// 列名の一覧
    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// 行の一覧
    pub fn rows(&self) -> &[Vec<CellValue>] {
        self.table.rows()
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// 指定行・指定列の値を取得
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.table.value(row, column)
    }

    /// 内部のテーブルを参照
    pub fn as_table(&self) -> &RowTable {
        &self.table
    }
}
