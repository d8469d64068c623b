//! `reqwest` による Session Service クライアント
//!
//! # 責務
//!
//! - Session Service の HTTP/JSON エンドポイントとの通信を担当
//! - [`SessionService`] トレイトを実装し、統一インターフェースを提供
//! - 通信失敗・タイムアウト・2xx 以外のステータス・不正な JSON を [`ServiceError`] に正規化
//!
//! リトライは行いません。タイムアウトは [`ServiceConfig::timeout`] をクライアント全体に適用します。

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::traits::SessionService;
use super::types::{
    AnswerRequest, AnswerResponse, StartSessionRequest, StartSessionResponse, WelcomeResponse,
    WorkflowListResponse, WorkflowRecord,
};
use super::{ANSWER_QUESTION_PATH, LIST_WORKFLOWS_PATH, START_SESSION_PATH, WELCOME_PATH};
use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// HTTP 版 Session Service クライアント
#[derive(Debug, Clone)]
pub struct HttpSessionService {
    client: Client,
    config: ServiceConfig,
}

impl HttpSessionService {
    /// 設定からクライアントを生成
    ///
    /// # エラー
    ///
    /// - [`ServiceError::ClientBuild`] - TLS バックエンドの初期化失敗など
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ServiceError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    async fn post_json<B, R>(&self, endpoint: &'static str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        decode(endpoint, response).await
    }

    async fn get_json<R>(&self, endpoint: &'static str) -> Result<R, ServiceError>
    where
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        decode(endpoint, response).await
    }
}

#[async_trait]
impl SessionService for HttpSessionService {
    async fn start_session(&self, idea: &str) -> Result<StartSessionResponse, ServiceError> {
        self.post_json(START_SESSION_PATH, &StartSessionRequest { idea })
            .await
    }

    async fn submit_answer(
        &self,
        session_id: &str,
        answer: &str,
    ) -> Result<AnswerResponse, ServiceError> {
        self.post_json(ANSWER_QUESTION_PATH, &AnswerRequest { session_id, answer })
            .await
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowRecord>, ServiceError> {
        let list: WorkflowListResponse = self.get_json(LIST_WORKFLOWS_PATH).await?;
        Ok(list.workflows.unwrap_or_default())
    }

    async fn welcome(&self) -> Result<String, ServiceError> {
        let welcome: WelcomeResponse = self.get_json(WELCOME_PATH).await?;
        Ok(welcome.message)
    }
}

fn transport_error(endpoint: &'static str, error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::Timeout { endpoint }
    } else {
        ServiceError::Transport {
            endpoint,
            message: error.to_string(),
        }
    }
}

/// ステータスを確認してからボディを JSON として解釈する
async fn decode<R>(endpoint: &'static str, response: Response) -> Result<R, ServiceError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            endpoint,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(endpoint, e))?;

    serde_json::from_str(&body).map_err(|e| ServiceError::Decode {
        endpoint,
        message: e.to_string(),
    })
}
