//! ロギングの初期化
//!
//! - `logging.directory` 未設定: stderr へ出力（stdout の対話プロンプトと混ざらない）
//! - `logging.directory` 設定あり: `flowcraft-<timestamp>.log` へノンブロッキングで出力
//!
//! `RUST_LOG` が設定されていれば `logging.level` より優先します。

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::LoggingError;

/// ロギング初期化の結果
///
/// プログラム終了まで保持する必要があります。ドロップ時にバッファがフラッシュされます。
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,

    /// ファイル出力時のログファイルパス
    pub log_file_path: Option<PathBuf>,
}

/// 設定に従ってグローバルなサブスクライバーを登録する
///
/// # 引数
///
/// * `config` - ロギング設定
/// * `debug_override` - `--debug` 指定時は `debug` レベルを強制
pub fn init_logging(
    config: &LoggingConfig,
    debug_override: bool,
) -> Result<LoggingHandle, LoggingError> {
    let filter = build_filter(config, debug_override, std::env::var("RUST_LOG").ok());

    let (writer, handle, ansi) = match config.directory() {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_name = log_file_name(chrono::Utc::now());
            let log_file_path = dir.join(&file_name);

            let appender = tracing_appender::rolling::never(dir, &file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            (
                BoxMakeWriter::new(non_blocking),
                LoggingHandle {
                    _guard: Some(guard),
                    log_file_path: Some(log_file_path),
                },
                false,
            )
        }
        None => (
            BoxMakeWriter::new(std::io::stderr),
            LoggingHandle {
                _guard: None,
                log_file_path: None,
            },
            true,
        ),
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format() {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(handle)
}

fn build_filter(config: &LoggingConfig, debug_override: bool, rust_log: Option<String>) -> EnvFilter {
    if debug_override {
        return EnvFilter::new("debug");
    }

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(config.level()))
}

fn log_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("flowcraft-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}
