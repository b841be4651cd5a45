//! File Discovery Module
//!
//! 対象ディレクトリ直下からglobパターンに一致する入力ファイルを列挙するモジュール。

use std::fs;
use std::io;
use std::path::Path;

use glob::Pattern;
use tracing::{debug, info};

use crate::error::XlsxMergeError;
use crate::types::SourceFile;

/// パターンに一致する入力ファイルを列挙
///
/// サブディレクトリは走査しません。結果はパスの昇順に並びます。
/// 存在しないディレクトリは空のディレクトリとして扱います。
///
/// # 戻り値
///
/// * `Ok(Vec<SourceFile>)` - 1件以上見つかった場合
/// * `Err(XlsxMergeError::NoMatchingFiles)` - 1件も一致しなかった場合
/// * `Err(XlsxMergeError::Pattern)` - パターンが不正な場合
/// * `Err(XlsxMergeError::Io)` - ディレクトリの読み取りに失敗した場合
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<SourceFile>, XlsxMergeError> {
    let compiled = Pattern::new(pattern)?;
    discover_with(dir, &compiled)
}

pub(crate) fn discover_with(
    dir: &Path,
    pattern: &Pattern,
) -> Result<Vec<SourceFile>, XlsxMergeError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => Some(entries),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "source directory does not exist");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries.into_iter().flatten() {
        let entry = entry?;
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(SourceFile::new(entry.path()));
        }
    }

    if files.is_empty() {
        return Err(XlsxMergeError::NoMatchingFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        });
    }

    files.sort();
    info!(
        dir = %dir.display(),
        pattern = pattern.as_str(),
        count = files.len(),
        "discovered input files"
    );
    Ok(files)
}
