//! xlsxmerge - Merge one sheet from every Excel workbook in a folder
//!
//! This crate reads every workbook in a directory that matches a glob pattern,
//! extracts one sheet (by index or by name) from each, stacks the rows, tags
//! every row with its source file in a `__source_file` column, and writes the
//! combined table to a single new workbook.
//!
//! Files that cannot be read are reported and skipped; the run only fails when
//! no file matches the pattern or when none of the matching files could be read.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxmerge::MergerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let merger = MergerBuilder::new("/data/monthly")
//!         .with_output("merged.xlsx")
//!         .build()?;
//!
//!     // Progress goes to stdout, skipped files to stderr
//!     let summary = merger.run_with_stdio()?;
//!     println!("{} of {} files merged", summary.merged_count(), summary.discovered);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Step by Step
//!
//! Each stage of the pipeline is also available on its own:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xlsxmerge::{discover, extract, merge, write, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = discover(Path::new("/data/monthly"), "*.xlsx")?;
//!
//!     let tables = files
//!         .iter()
//!         .filter_map(|f| extract(f, &SheetSelector::Name("Sales".to_string())).ok())
//!         .collect();
//!
//!     let merged = merge(tables)?;
//!     write(&merged, Path::new("sales.xlsx"))?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod cli;
mod discover;
mod error;
mod logging;
mod merge;
mod output;
mod parser;
mod security;
mod summary;
mod types;

// 公開API
pub use api::{SheetSelector, DEFAULT_OUTPUT, DEFAULT_PATTERN, SOURCE_COLUMN};
pub use builder::{MergeConfig, Merger, MergerBuilder};
pub use cli::{resolve_path, CliArgs};
pub use discover::discover;
pub use error::XlsxMergeError;
pub use logging::init_tracing;
pub use merge::merge;
pub use output::{write, write_to_buffer, MAX_COLUMNS, MAX_ROWS};
pub use parser::extract;
pub use summary::{format_thousands, MergeSummary, SkippedFile};
pub use types::{CellValue, MergedTable, RowTable, SourceFile};
