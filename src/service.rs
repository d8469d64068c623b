//! Session Service クライアント抽象化レイヤー
//!
//! # 責務
//!
//! - リモートの Session Service（質問生成・セッション管理）を統一的に扱う
//!   インターフェース [`SessionService`] を提供
//! - HTTP/JSON 実装 [`HttpSessionService`] を設定から生成するファクトリー機能
//!
//! # エンドポイント
//!
//! | メソッド | パス                | 用途                         |
//! |----------|---------------------|------------------------------|
//! | POST     | `/start-session/`   | アイデアを送りセッション開始 |
//! | POST     | `/answer-question/` | 回答を送り次の質問を取得     |
//! | GET      | `/get-workflows/`   | 保存済みワークフロー一覧     |
//! | GET      | `/`                 | ウェルカムメッセージ         |
//!
//! # モジュール構成
//!
//! - `traits` - 共通インターフェース（[`SessionService`]トレイト）
//! - `types` - リクエスト/レスポンスの JSON 型
//! - `http` - `reqwest` による実装
//!
//! # 使用例
//!
//! ```rust,no_run
//! use flowcraft::config::ServiceConfig;
//! use flowcraft::service::{create_service, SessionService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = create_service(&ServiceConfig::default())?;
//!     let started = service.start_session("build a todo app").await?;
//!     println!("{}: {}", started.session_id, started.question);
//!     Ok(())
//! }
//! ```

pub mod traits;
pub mod types;
pub mod http;

use std::sync::Arc;

// 公開APIの再エクスポート
pub use http::HttpSessionService;
pub use traits::SessionService;
pub use types::{AnswerResponse, StartSessionResponse, Timestamp, WorkflowRecord};

use crate::config::ServiceConfig;
use crate::error::ServiceError;

pub const START_SESSION_PATH: &str = "/start-session/";
pub const ANSWER_QUESTION_PATH: &str = "/answer-question/";
pub const LIST_WORKFLOWS_PATH: &str = "/get-workflows/";
pub const WELCOME_PATH: &str = "/";

/// 設定から Session Service クライアントを生成するファクトリー関数
///
/// コントローラーと履歴ビューアで同じクライアントを共有できるよう `Arc` で返します。
///
/// # エラー
///
/// - [`ServiceError::ClientBuild`] - HTTP クライアントの構築に失敗
pub fn create_service(config: &ServiceConfig) -> Result<Arc<dyn SessionService>, ServiceError> {
    Ok(Arc::new(HttpSessionService::new(config)?))
}
