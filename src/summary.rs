//! Run Summary
//!
//! 1回の結合処理の結果をまとめる型と、表示用の補助関数。

use std::fmt;
use std::path::PathBuf;

/// 読み込みに失敗してスキップされたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// ファイルのベース名
    pub name: String,
    /// 失敗の理由（エラーメッセージ）
    pub reason: String,
}

/// 結合処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// パターンに一致したファイル数
    pub discovered: usize,
    /// 結合できたファイルのベース名（読み込み順）
    pub merged_files: Vec<String>,
    /// スキップしたファイル（読み込み順）
    pub skipped: Vec<SkippedFile>,
    /// 出力ファイルのパス
    pub output: PathBuf,
    /// 出力したデータ行数（ヘッダー行を除く）
    pub rows: usize,
}

impl MergeSummary {
    /// 結合できたファイル数
    pub fn merged_count(&self) -> usize {
        self.merged_files.len()
    }
}

/// 最終行の表示: `Merged <M> workbooks → <path> (<rows> rows).`
impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Merged {} workbooks → {} ({} rows).",
            self.merged_count(),
            self.output.display(),
            format_thousands(self.rows)
        )
    }
}

/// 3桁ごとにカンマで区切った数値文字列
///
/// ```rust
/// use xlsxmerge::format_thousands;
///
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// ```
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
