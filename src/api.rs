//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;
use std::str::FromStr;

use crate::error::XlsxMergeError;

/// 出力ファイルの既定パス
pub const DEFAULT_OUTPUT: &str = "merged.xlsx";

/// 入力ファイルを選ぶ既定のglobパターン
pub const DEFAULT_PATTERN: &str = "*.xlsx";

/// 出所列（provenance column）の列名
///
/// 各行がどの入力ファイルから来たかを記録する合成列です。
pub const SOURCE_COLUMN: &str = "__source_file";

/// シート選択方式
///
/// すべての入力ワークブックに同じ選択方式が適用されます。
/// 実際のシート一覧との照合は読み込み時まで行われず、
/// 見つからない場合はそのファイルだけが読み込み失敗として扱われます。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),

    /// 数字のみのシート指定
    ///
    /// 同名のシートがあればそれを選択し、なければ数値をインデックスとして扱います。
    /// 例: `2024`という名前のシートがあるワークブックでは`"2024"`はそのシートを指します。
    NameOrIndex(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Index(index) => write!(f, "#{}", index),
            SheetSelector::Name(name) | SheetSelector::NameOrIndex(name) => {
                write!(f, "'{}'", name)
            }
        }
    }
}

/// コマンドライン文字列からの変換
///
/// ASCII数字のみで構成される文字列は`NameOrIndex`、それ以外はシート名として扱います。
/// 空文字列は`XlsxMergeError::Config`になります。
///
/// ```rust
/// use xlsxmerge::SheetSelector;
///
/// assert_eq!(
///     "2".parse::<SheetSelector>().unwrap(),
///     SheetSelector::NameOrIndex("2".to_string())
/// );
/// assert_eq!(
///     "Sales".parse::<SheetSelector>().unwrap(),
///     SheetSelector::Name("Sales".to_string())
/// );
/// ```
impl FromStr for SheetSelector {
    type Err = XlsxMergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(XlsxMergeError::Config(
                "Sheet selector must not be empty".to_string(),
            ));
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(SheetSelector::NameOrIndex(s.to_string()));
        }

        Ok(SheetSelector::Name(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_first_sheet() {
        assert_eq!(SheetSelector::default(), SheetSelector::Index(0));
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(
            "0".parse::<SheetSelector>().unwrap(),
            SheetSelector::NameOrIndex("0".to_string())
        );
        assert_eq!(
            "2024".parse::<SheetSelector>().unwrap(),
            SheetSelector::NameOrIndex("2024".to_string())
        );
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(
            "Sheet1".parse::<SheetSelector>().unwrap(),
            SheetSelector::Name("Sheet1".to_string())
        );
        // 数字以外を含む場合は名前として扱う
        assert_eq!(
            "-1".parse::<SheetSelector>().unwrap(),
            SheetSelector::Name("-1".to_string())
        );
        assert_eq!(
            "2024 Q1".parse::<SheetSelector>().unwrap(),
            SheetSelector::Name("2024 Q1".to_string())
        );
    }

    #[test]
    fn test_parse_empty_is_config_error() {
        match "".parse::<SheetSelector>() {
            Err(XlsxMergeError::Config(msg)) => assert!(msg.contains("must not be empty")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_overflowing_digits_kept_as_text() {
        let result = "99999999999999999999999999".parse::<SheetSelector>();
        assert_eq!(
            result.unwrap(),
            SheetSelector::NameOrIndex("99999999999999999999999999".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SheetSelector::Index(3).to_string(), "#3");
        assert_eq!(SheetSelector::Name("Data".to_string()).to_string(), "'Data'");
        assert_eq!(
            SheetSelector::NameOrIndex("2024".to_string()).to_string(),
            "'2024'"
        );
    }
}
