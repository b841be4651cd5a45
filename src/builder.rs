//! Builder Module
//!
//! Fluent Builder APIを提供し、`Merger`インスタンスを段階的に構築する。

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info};

use crate::api::{SheetSelector, DEFAULT_OUTPUT, DEFAULT_PATTERN};
use crate::discover::discover_with;
use crate::error::XlsxMergeError;
use crate::merge::merge;
use crate::output::write;
use crate::parser::extract_with;
use crate::security::SecurityConfig;
use crate::summary::{MergeSummary, SkippedFile};

/// 結合処理の設定を保持する構造体
///
/// `MergerBuilder::build()`で検証された後は変更されません。
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// 入力ファイルを探すディレクトリ
    source_dir: PathBuf,

    /// 出力ファイルのパス
    output: PathBuf,

    /// 入力ファイルのglobパターン
    pattern: Pattern,

    /// シート選択方式
    sheet_selector: SheetSelector,

    /// セキュリティ制限
    security: SecurityConfig,
}

impl MergeConfig {
    /// 入力ファイルを探すディレクトリ
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// 出力ファイルのパス
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// 入力ファイルのglobパターン
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// シート選択方式
    pub fn sheet_selector(&self) -> &SheetSelector {
        &self.sheet_selector
    }

    /// 入力ファイルの最大サイズ（バイト）
    pub fn max_input_file_size(&self) -> u64 {
        self.security.max_input_file_size
    }
}

/// Fluent Builder APIを提供する構造体
///
/// 入力ディレクトリ以外のすべての設定項目にデフォルト値があり、
/// 必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmerge::{MergerBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxmerge::XlsxMergeError> {
/// let merger = MergerBuilder::new("/data/monthly")
///     .with_output("/data/all.xlsx")
///     .with_pattern("*.xlsx")
///     .with_sheet_selector(SheetSelector::Name("Sales".to_string()))
///     .build()?;
/// let summary = merger.run_with_stdio()?;
/// println!("{} rows", summary.rows);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MergerBuilder {
    source_dir: PathBuf,
    output: PathBuf,
    pattern: String,
    sheet_selector: SheetSelector,
    security: SecurityConfig,
}

impl MergerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力: `merged.xlsx`
    /// - パターン: `*.xlsx`
    /// - シート選択: 最初のシート（インデックス0）
    /// - 入力ファイルの最大サイズ: 2GB
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            pattern: DEFAULT_PATTERN.to_string(),
            sheet_selector: SheetSelector::default(),
            security: SecurityConfig::default(),
        }
    }

    /// 出力ファイルのパスを指定する
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// 入力ファイルのglobパターンを指定する（例: `*.xls`）
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// 各ワークブックから読み込むシートを指定する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.sheet_selector = selector;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    ///
    /// 上限を超えるファイルは読み込み失敗としてスキップされます。
    pub fn with_max_input_file_size(mut self, bytes: u64) -> Self {
        self.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Merger`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxMergeError::Pattern` - globパターンが不正
    /// * `XlsxMergeError::Config` - パターンまたはシート名が空
    pub fn build(self) -> Result<Merger, XlsxMergeError> {
        // 1. パターンの検証
        if self.pattern.is_empty() {
            return Err(XlsxMergeError::Config(
                "File pattern must not be empty".to_string(),
            ));
        }
        let pattern = Pattern::new(&self.pattern)?;

        // 2. シート名の検証
        if let SheetSelector::Name(ref name) | SheetSelector::NameOrIndex(ref name) =
            self.sheet_selector
        {
            if name.is_empty() {
                return Err(XlsxMergeError::Config(
                    "Sheet name must not be empty".to_string(),
                ));
            }
        }

        Ok(Merger {
            config: MergeConfig {
                source_dir: self.source_dir,
                output: self.output,
                pattern,
                sheet_selector: self.sheet_selector,
                security: self.security,
            },
        })
    }
}

/// 結合処理のファサード
///
/// ファイル列挙 → ファイルごとの抽出 → 結合 → 書き出しを順に実行します。
/// 処理は単一スレッドで、ファイルは1件ずつパス順に読み込まれます。
#[derive(Debug, Clone)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    /// 設定を参照
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// 結合処理を実行する
    ///
    /// 進捗（`✔ Read <name>`）と最終サマリーは`out`に、
    /// ファイル単位の失敗（`✘ Skipped <name>: <error>`）は`err`に書き込みます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(MergeSummary)` - 1件以上のファイルを結合して書き出した場合
    /// * `Err(XlsxMergeError::NoMatchingFiles)` - 一致するファイルがない場合（出力には触れない）
    /// * `Err(XlsxMergeError::NothingToMerge)` - すべてのファイルが失敗した場合（出力には触れない）
    /// * `Err(XlsxMergeError)` - 書き出しに失敗した場合
    pub fn run<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
    ) -> Result<MergeSummary, XlsxMergeError> {
        let config = &self.config;

        // 1. ファイルの列挙
        let files = discover_with(&config.source_dir, &config.pattern)?;

        // 2. ファイルごとの抽出（失敗しても続行）
        let mut tables = Vec::with_capacity(files.len());
        let mut merged_files = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file in &files {
            match extract_with(file, &config.sheet_selector, &config.security) {
                Ok(table) => {
                    writeln!(out, "✔ Read {}", file.name())?;
                    merged_files.push(file.name().to_string());
                    tables.push(table);
                }
                Err(e) => {
                    debug!(file = file.name(), error = %e, "skipping file");
                    writeln!(err, "✘ Skipped {}: {}", file.name(), e)?;
                    skipped.push(SkippedFile {
                        name: file.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // 3. 結合
        if tables.is_empty() {
            return Err(XlsxMergeError::NothingToMerge {
                attempted: files.len(),
            });
        }
        let merged = merge(tables)?;

        // 4. 書き出し
        write(&merged, &config.output)?;

        let summary = MergeSummary {
            discovered: files.len(),
            merged_files,
            skipped,
            output: config.output.clone(),
            rows: merged.row_count(),
        };
        writeln!(out, "\n{}", summary)?;
        out.flush()?;

        info!(
            merged = summary.merged_count(),
            skipped = summary.skipped.len(),
            rows = summary.rows,
            "merge completed"
        );
        Ok(summary)
    }

    /// 標準出力・標準エラー出力を使って結合処理を実行する
    pub fn run_with_stdio(&self) -> Result<MergeSummary, XlsxMergeError> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run(&mut stdout.lock(), &mut stderr.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = MergerBuilder::new("/data");
        assert_eq!(builder.source_dir, PathBuf::from("/data"));
        assert_eq!(builder.output, PathBuf::from("merged.xlsx"));
        assert_eq!(builder.pattern, "*.xlsx");
        assert_eq!(builder.sheet_selector, SheetSelector::Index(0));
        assert_eq!(builder.security, SecurityConfig::default());
    }

    #[test]
    fn test_builder_method_chaining() {
        let merger = MergerBuilder::new("/data")
            .with_output("/out/all.xlsx")
            .with_pattern("*.xls")
            .with_sheet_selector(SheetSelector::Name("Sheet2".to_string()))
            .with_max_input_file_size(1024)
            .build()
            .unwrap();

        let config = merger.config();
        assert_eq!(config.source_dir(), Path::new("/data"));
        assert_eq!(config.output(), Path::new("/out/all.xlsx"));
        assert_eq!(config.pattern(), "*.xls");
        assert_eq!(
            config.sheet_selector(),
            &SheetSelector::Name("Sheet2".to_string())
        );
        assert_eq!(config.max_input_file_size(), 1024);
    }

    #[test]
    fn test_build_with_invalid_pattern() {
        let result = MergerBuilder::new("/data").with_pattern("[").build();
        assert!(matches!(result, Err(XlsxMergeError::Pattern(_))));
    }

    #[test]
    fn test_build_with_empty_pattern() {
        match MergerBuilder::new("/data").with_pattern("").build() {
            Err(XlsxMergeError::Config(msg)) => assert!(msg.contains("pattern")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_with_empty_sheet_name() {
        let result = MergerBuilder::new("/data")
            .with_sheet_selector(SheetSelector::Name(String::new()))
            .build();
        assert!(matches!(result, Err(XlsxMergeError::Config(_))));
    }

    #[test]
    fn test_build_with_empty_digit_selector() {
        let result = MergerBuilder::new("/data")
            .with_sheet_selector(SheetSelector::NameOrIndex(String::new()))
            .build();
        assert!(matches!(result, Err(XlsxMergeError::Config(_))));
    }

    #[test]
    fn test_run_without_matches_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("merged.xlsx");

        let merger = MergerBuilder::new(dir.path())
            .with_output(&output)
            .build()
            .unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = merger.run(&mut out, &mut err);

        assert!(matches!(result, Err(XlsxMergeError::NoMatchingFiles { .. })));
        assert!(!output.exists());
        assert!(out.is_empty());
        assert!(err.is_empty());
    }
}
