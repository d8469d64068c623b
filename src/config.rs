//! クライアント設定の読み込みと検証
//!
//! # 責務
//!
//! - `flowcraft.toml` を読み込み、検証済みの [`AppConfig`] を構築
//! - 環境変数 `API_BASE_URL` による Session Service の接続先上書き
//!
//! ## 変換フロー
//!
//! ```text
//! TOML ファイル
//!   ↓ (デシリアライズ)
//! AppConfigDto
//!   ↓ (TryFrom でバリデーション)
//! AppConfig (ドメインモデル)
//!   ↓ (環境変数 / CLI 引数で上書き)
//! 実行時設定
//! ```
//!
//! ## 設定例
//!
//! ```toml
//! [service]
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 30
//!
//! [logging]
//! level = "warn"
//! format = "text"
//! ```

mod dto;
pub mod app;
pub mod section;

pub use app::AppConfig;
pub use section::{LogFormat, LoggingConfig, ServiceConfig};

/// Session Service のデフォルト接続先
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// リクエストタイムアウトのデフォルト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// デフォルトのログレベル（EnvFilter ディレクティブ）
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// 接続先を上書きする環境変数名
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// `--config` 未指定時に探索する設定ファイル名
pub const DEFAULT_CONFIG_FILE: &str = "flowcraft.toml";
