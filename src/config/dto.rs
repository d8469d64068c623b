//! TOML デシリアライズ用の DTO (Data Transfer Object)
//!
//! DTO はバリデーション前の「生データ」を表現し、ドメインモデルとは分離されています。
//! すべてのキーは省略可能で、省略時の値はドメインモデル側で補完します。

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::section::LogFormat;

/// 設定ファイル全体の DTO
///
/// **注**: この構造体は config モジュール内部の実装詳細です。
/// 外部からは [`AppConfig`](super::app::AppConfig) を使用してください。
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct AppConfigDto {
    #[serde(default)]
    pub(super) service: ServiceDto,
    #[serde(default)]
    pub(super) logging: LoggingDto,
}

/// `[service]` セクション
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct ServiceDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) timeout_secs: Option<u64>,
}

/// `[logging]` セクション
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct LoggingDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) format: Option<LogFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) directory: Option<PathBuf>,
}
