//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsxmergeクレート全体で使用するエラー型
///
/// エラーは2種類に分かれます。
///
/// - ファイル単位のエラー（`Io`、`Parse`、`SheetNotFound`など）:
///   パイプラインはそのファイルをスキップして処理を続行します。
/// - パイプライン全体のエラー（`NoMatchingFiles`、`NothingToMerge`、`Write`など）:
///   実行を中断し、出力ファイルは作成されません。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::path::Path;
/// use xlsxmerge::{discover, XlsxMergeError};
///
/// match discover(Path::new("/data"), "*.xlsx") {
///     Err(XlsxMergeError::NoMatchingFiles { dir, pattern }) => {
///         eprintln!("nothing in {} for {}", dir.display(), pattern);
///     }
///     Err(e) => eprintln!("{}", e),
///     Ok(files) => println!("{} file(s)", files.len()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxMergeError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineがワークブックを開く、またはシートを読む際に発生したエラーです。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 出力ワークブックの生成・保存中に発生したエラー
    #[error("Failed to write Excel file: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// globパターンが不正
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// 設定の検証に失敗したエラー
    ///
    /// `MergerBuilder::build()`やシート選択の解析時に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 指定インデックスのシートが存在しない
    #[error("Sheet index {index} is out of range (total: {total})")]
    SheetIndexOutOfRange {
        /// 要求されたインデックス
        index: usize,
        /// ワークブック内のシート数
        total: usize,
    },

    /// 指定名のシートが存在しない
    #[error("Worksheet named '{0}' not found")]
    SheetNotFound(String),

    /// パターンに一致するファイルが1件もない
    #[error("No Excel files found in {} matching pattern '{pattern}'", .dir.display())]
    NoMatchingFiles {
        /// 走査したディレクトリ
        dir: PathBuf,
        /// 使用したglobパターン
        pattern: String,
    },

    /// 読み込みに成功したファイルが1件もない
    #[error("Nothing to merge: none of the {attempted} matching file(s) could be read")]
    NothingToMerge {
        /// 読み込みを試みたファイル数
        attempted: usize,
    },

    /// ワークシートの上限（行数・列数）を超えた
    #[error("Merged table does not fit in one worksheet: {rows} rows x {columns} columns (max: {max_rows} x {max_columns})")]
    SheetTooLarge {
        /// ヘッダー行を含む行数
        rows: usize,
        /// 列数
        columns: usize,
        /// 最大行数
        max_rows: usize,
        /// 最大列数
        max_columns: usize,
    },

    /// 行の幅が列数を超えている
    #[error("Row {row} has {found} values but the table has {expected} columns")]
    RowWidthMismatch {
        /// 行番号（0始まり）
        row: usize,
        /// 列数
        expected: usize,
        /// 実際の値の数
        found: usize,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過など。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
