//! Command Line Module
//!
//! コマンドライン引数の定義と、`Merger`への変換を提供するモジュール。

use std::path::{Component, Path, PathBuf};

use clap::Parser;

use crate::api::{SheetSelector, DEFAULT_OUTPUT, DEFAULT_PATTERN};
use crate::builder::{Merger, MergerBuilder};
use crate::error::XlsxMergeError;

/// Merge Excel workbooks found in a folder.
#[derive(Parser, Debug, Clone)]
#[command(name = "xlsxmerge", version, about)]
pub struct CliArgs {
    /// Directory containing Excel files
    pub src_dir: PathBuf,

    /// Output workbook path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Glob pattern to match
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Sheet name or index (0-based) to merge; a sheet named like the number wins
    #[arg(short, long, default_value = "0", value_parser = parse_sheet)]
    pub sheet: SheetSelector,
}

fn parse_sheet(value: &str) -> Result<SheetSelector, String> {
    value.parse().map_err(|e: XlsxMergeError| e.to_string())
}

impl CliArgs {
    /// 引数を検証済みの`Merger`に変換
    ///
    /// パスは`~`を展開し、絶対パスにしてから使用します。
    pub fn into_merger(self) -> Result<Merger, XlsxMergeError> {
        MergerBuilder::new(resolve_path(&self.src_dir)?)
            .with_output(resolve_path(&self.output)?)
            .with_pattern(self.pattern)
            .with_sheet_selector(self.sheet)
            .build()
    }
}

/// `~`を展開し、絶対パスに変換
///
/// ファイルの存在は確認しません。
pub fn resolve_path(path: &Path) -> Result<PathBuf, XlsxMergeError> {
    let expanded = expand_home(path, dirs::home_dir().as_deref())?;
    Ok(std::path::absolute(expanded)?)
}

fn expand_home(path: &Path, home: Option<&Path>) -> Result<PathBuf, XlsxMergeError> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home.ok_or_else(|| {
                XlsxMergeError::Config(format!(
                    "Cannot expand '{}': home directory is unknown",
                    path.display()
                ))
            })?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}
