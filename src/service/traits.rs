//! Session Service の共通インターフェース定義

use async_trait::async_trait;

use super::types::{AnswerResponse, StartSessionResponse, WorkflowRecord};
use crate::error::ServiceError;

/// Session Service の共通インターフェース
///
/// HTTP 実装のほか、テストでは決められた応答を返すモックを差し込みます。
///
/// # 実装要件
///
/// - `Send + Sync`: コントローラーを `Arc` で共有するため
/// - 2xx 以外の応答・通信失敗・不正なボディはすべて [`ServiceError`] として返す
#[async_trait]
pub trait SessionService: Send + Sync {
    /// アイデアを送信してセッションを開始し、最初の質問を受け取る
    async fn start_session(&self, idea: &str) -> Result<StartSessionResponse, ServiceError>;

    /// 現在の質問への回答を送信する
    ///
    /// レスポンスに質問が含まれない場合はセッション完了を意味します。
    async fn submit_answer(
        &self,
        session_id: &str,
        answer: &str,
    ) -> Result<AnswerResponse, ServiceError>;

    /// 保存済みワークフローをサーバーの順序のまま取得する
    async fn list_workflows(&self) -> Result<Vec<WorkflowRecord>, ServiceError>;

    /// `GET /` のウェルカムメッセージ
    async fn welcome(&self) -> Result<String, ServiceError>;
}
