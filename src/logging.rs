//! Logging Module
//!
//! `tracing`のサブスクライバーを初期化するモジュール。
//! 進捗表示は標準出力に直接書くため、ログは標準エラー出力に流します。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// 既定のログレベル（`RUST_LOG`未設定時）
const DEFAULT_FILTER: &str = "warn";

/// グローバルなサブスクライバーを設定する
///
/// `RUST_LOG`環境変数でレベルを変更できます（例: `RUST_LOG=xlsxmerge=debug`）。
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}
