//! 設定セクションのドメインモデル
//!
//! [`ServiceConfig`]（`[service]`）と [`LoggingConfig`]（`[logging]`）を提供します。
//! どちらも DTO からの変換時にバリデーションを行い、構築後は常に有効な値を保持します。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::dto::{LoggingDto, ServiceDto};
use super::{DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT_SECS};
use crate::error::ConfigError;

/// Session Service への接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// 末尾の `/` を除いたベース URL
    base_url: String,
    timeout: Duration,
}

impl ServiceConfig {
    /// ベース URL とタイムアウト秒数から設定を構築
    ///
    /// # エラー
    ///
    /// - URL として解釈できない、または http/https 以外のスキーム
    /// - `timeout_secs` が 0
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        if timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "service.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// エンドポイントパス（`/start-session/` など）を完全な URL に変換
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn set_base_url(&mut self, base_url: &str) -> Result<(), ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| {
        ConfigError::Validation(format!("service.base_url `{}` is not a valid URL: {}", trimmed, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(ConfigError::Validation(format!(
            "service.base_url must use http or https, got `{}`",
            other
        ))),
    }
}

/// ログの出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 人間向けのテキスト形式
    #[default]
    Text,
    /// 1 行 1 イベントの JSON 形式
    Json,
}

/// ロギング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: String,
    format: LogFormat,
    /// 設定されている場合はファイルへ、未設定なら stderr へ出力
    directory: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
            directory: None,
        }
    }
}

/// DTO からドメインモデルへの変換（読み込み方向）
impl TryFrom<ServiceDto> for ServiceConfig {
    type Error = ConfigError;

    fn try_from(dto: ServiceDto) -> Result<Self, Self::Error> {
        Self::new(
            dto.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            dto.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// ドメインモデルから DTO への変換（書き込み方向）
impl From<ServiceConfig> for ServiceDto {
    fn from(config: ServiceConfig) -> Self {
        Self {
            base_url: Some(config.base_url),
            timeout_secs: Some(config.timeout.as_secs()),
        }
    }
}

impl TryFrom<LoggingDto> for LoggingConfig {
    type Error = ConfigError;

    fn try_from(dto: LoggingDto) -> Result<Self, Self::Error> {
        let level = dto
            .level
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        if level.is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        tracing_subscriber::EnvFilter::try_new(&level).map_err(|e| {
            ConfigError::Validation(format!("logging.level `{}` is invalid: {}", level, e))
        })?;

        Ok(Self {
            level,
            format: dto.format.unwrap_or_default(),
            directory: dto.directory,
        })
    }
}

impl From<LoggingConfig> for LoggingDto {
    fn from(config: LoggingConfig) -> Self {
        Self {
            level: Some(config.level),
            format: Some(config.format),
            directory: config.directory,
        }
    }
}
