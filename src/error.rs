//! エラー型の定義
//!
//! このモジュールは、FlowCraft クライアント全体で使用されるエラー型を定義します。
//!
//! - [`ConfigError`]: 設定ファイルの読み込み・検証
//! - [`ServiceError`]: Session Service との HTTP 通信
//! - [`WizardError`]: ウィザードの状態遷移
//! - [`LoggingError`] / [`CliError`]: バイナリ側の初期化と実行
//!
//! `Display` の出力は端末にそのまま表示されるため、メッセージはすべて英語で統一しています。

use thiserror::Error;

use crate::wizard::WizardPhase;

/// 設定関連のエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ファイルの読み込みに失敗
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// TOML のデシリアライズに失敗
    #[error("failed to parse config TOML: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// TOML のシリアライズに失敗
    #[error("failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// バリデーションエラー
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Session Service 呼び出しのエラー
///
/// `Display` の出力はそのまま [`WizardObserver::on_error`](crate::wizard::WizardObserver::on_error)
/// に渡されるユーザー向けメッセージになります。
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 接続失敗などのトランスポートエラー
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// 設定されたタイムアウト内に応答がなかった
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: &'static str },

    /// 2xx 以外のステータス
    #[error("API error: {status} {reason}")]
    Status {
        endpoint: &'static str,
        status: u16,
        reason: String,
    },

    /// レスポンスボディを解釈できなかった
    #[error("invalid response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    /// セッション開始レスポンスに質問が含まれていなかった
    #[error("no question returned by {endpoint}")]
    MissingQuestion { endpoint: &'static str },

    /// HTTP クライアントの構築に失敗
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// ウィザード操作のエラー
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("idea must not be empty")]
    EmptyIdea,

    /// 空の回答（ネットワークには送信されない）
    #[error("Please provide an answer before proceeding.")]
    EmptyAnswer,

    #[error("`{operation}` is not allowed while the wizard is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: WizardPhase,
    },

    /// 別のリクエストが処理中
    #[error("another request is still in flight")]
    RequestInFlight,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// ロギング初期化のエラー
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// CLI 実行時のエラー
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Wizard(#[from] WizardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// 入力が途中で終了した
    #[error("input closed before the session finished")]
    InputClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display_through_cli_error() {
        let error = CliError::from(ConfigError::Validation(
            "service.timeout_secs must be greater than 0".to_string(),
        ));
        assert_eq!(
            error.to_string(),
            "configuration error: invalid configuration: service.timeout_secs must be greater than 0"
        );
    }

    #[test]
    fn test_service_error_passes_through_cli_error() {
        let error = CliError::from(WizardError::from(ServiceError::Timeout {
            endpoint: "/answer-question/",
        }));
        assert_eq!(error.to_string(), "request to /answer-question/ timed out");
    }
}
