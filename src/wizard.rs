//! アイデア受付ウィザード
//!
//! # 責務
//!
//! - アイデア送信 → 質問への回答の繰り返し → 完了、という直線的なセッションを管理
//! - 完了時・失敗時の通知を [`WizardObserver`] 経由で呼び出し元へ届ける
//!
//! # 状態遷移
//!
//! ```text
//! Unstarted ──start──▶ AwaitingAnswer ──submit_answer（次の質問あり）──▶ AwaitingAnswer
//!                                    └──submit_answer（質問なし）──────▶ Completed
//! ```
//!
//! `Completed` から抜ける遷移はありません。新しいセッションには新しいコントローラーを生成します。
//!
//! # モジュール構成
//!
//! - [`state`][]: 状態値オブジェクト（[`WizardState`], [`Session`], [`AnswerLog`]）
//! - [`observer`][]: 通知インターフェース
//! - [`controller`][]: 状態遷移とリクエスト制御の本体
//!
//! # 使用例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use flowcraft::config::ServiceConfig;
//! use flowcraft::service::create_service;
//! use flowcraft::wizard::{LoggingObserver, Progress, WizardController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = create_service(&ServiceConfig::default())?;
//!     let wizard = WizardController::new(service, Arc::new(LoggingObserver));
//!
//!     let mut question = wizard.start("build a todo app").await?;
//!     loop {
//!         println!("{}", question);
//!         match wizard.submit_answer("...".to_string()).await? {
//!             Progress::Next(next) => question = next,
//!             Progress::Completed(done) => {
//!                 println!("{} answers", done.answers.len());
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod state;
pub mod observer;
pub mod controller;

// 公開APIの再エクスポート
pub use controller::{Progress, WizardController};
pub use observer::{LoggingObserver, WizardObserver};
pub use state::{AnswerLog, Completion, Session, WizardPhase, WizardState};
