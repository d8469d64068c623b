//! アプリケーション設定（ドメインモデル）
//!
//! # 処理フロー
//!
//! 1. `--config` で指定されたファイル、なければカレントディレクトリの `flowcraft.toml`
//! 2. どちらもなければデフォルト値
//! 3. 環境変数 `API_BASE_URL` で `service.base_url` を上書き
//! 4. CLI の `--base-url` で最終的に上書き（[`AppConfig::with_base_url`]）

use std::path::Path;

use super::dto::AppConfigDto;
use super::section::{LoggingConfig, ServiceConfig};
use super::{BASE_URL_ENV, DEFAULT_CONFIG_FILE};
use crate::error::ConfigError;

/// 検証済みのアプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    service: ServiceConfig,
    logging: LoggingConfig,
}

impl AppConfig {
    /// 設定を探索・読み込みし、環境変数による上書きまで適用する
    ///
    /// # 引数
    ///
    /// * `path` - 明示的な設定ファイルのパス。`None` の場合は [`DEFAULT_CONFIG_FILE`] を探索
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.with_env_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// TOML ファイルから設定を読み込む
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// TOML 文字列から設定を読み込む
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let dto: AppConfigDto = toml::from_str(toml)?;
        Self::try_from(dto)
    }

    /// 設定を TOML 文字列に変換
    pub fn to_string(&self) -> Result<String, ConfigError> {
        let dto: AppConfigDto = self.clone().into();
        Ok(toml::to_string(&dto)?)
    }

    /// 設定を TOML ファイルに保存
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_string()?)?;
        Ok(())
    }

    /// 環境変数の値で接続先を上書きする
    ///
    /// 値が `None` または空白のみの場合は何もしません。
    pub fn with_env_override(mut self, base_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.service.set_base_url(&url)?;
        }
        Ok(self)
    }

    /// 接続先を明示的に上書きする（CLI 引数用）
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.service.set_base_url(base_url)?;
        Ok(self)
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

impl TryFrom<AppConfigDto> for AppConfig {
    type Error = ConfigError;

    fn try_from(dto: AppConfigDto) -> Result<Self, Self::Error> {
        Ok(Self {
            service: ServiceConfig::try_from(dto.service)?,
            logging: LoggingConfig::try_from(dto.logging)?,
        })
    }
}

impl From<AppConfig> for AppConfigDto {
    fn from(config: AppConfig) -> Self {
        Self {
            service: config.service.into(),
            logging: config.logging.into(),
        }
    }
}
