//! 保存済みワークフロー一覧ビューア
//!
//! # 責務
//!
//! - `GET /get-workflows/` から保存済みワークフローを一括取得
//! - サーバーから返された順序のまま保持・表示（クライアント側で並べ替えない）
//!
//! 取得失敗はユーザーには通知せず、`tracing` の error ログとして記録します。
//! その場合一覧は空のままです。直近の失敗内容は [`HistoryViewer::last_error`] で参照できます。

use std::sync::Arc;

use crate::service::{SessionService, WorkflowRecord};

/// 保存済みワークフロー一覧ビューア
pub struct HistoryViewer {
    service: Arc<dyn SessionService>,
    workflows: Vec<WorkflowRecord>,
    last_error: Option<String>,
}

impl HistoryViewer {
    pub fn new(service: Arc<dyn SessionService>) -> Self {
        Self {
            service,
            workflows: Vec::new(),
            last_error: None,
        }
    }

    /// 一覧を取得する
    ///
    /// 呼ぶたびに一覧全体を取り直して置き換えます。失敗時は一覧を空にします。
    pub async fn load(&mut self) -> &[WorkflowRecord] {
        match self.service.list_workflows().await {
            Ok(workflows) => {
                tracing::debug!(count = workflows.len(), "workflows loaded");
                self.workflows = workflows;
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch workflows");
                self.workflows.clear();
                self.last_error = Some(e.to_string());
            }
        }

        &self.workflows
    }

    pub fn workflows(&self) -> &[WorkflowRecord] {
        &self.workflows
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 一覧をテキストとして描画する
    ///
    /// タイムスタンプは解釈できればローカル時刻、できなければサーバーの値をそのまま表示します。
    pub fn render(&self) -> String {
        let mut out = String::from("Saved Workflows\n");

        if self.workflows.is_empty() {
            out.push_str("(no saved workflows)\n");
            return out;
        }

        for record in &self.workflows {
            out.push_str(&format!(
                "\n[{}]\nPrompt: {}\nResponse: {}\nTimestamp: {}\n",
                record.workflow_id, record.prompt, record.response, record.timestamp
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::{AnswerResponse, StartSessionResponse, Timestamp};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    struct ScriptedHistory {
        responses: Mutex<Vec<Result<Vec<WorkflowRecord>, ServiceError>>>,
    }

    impl ScriptedHistory {
        fn new(responses: Vec<Result<Vec<WorkflowRecord>, ServiceError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
            })
        }
    }

    #[async_trait]
    impl SessionService for ScriptedHistory {
        async fn start_session(&self, _idea: &str) -> Result<StartSessionResponse, ServiceError> {
            unreachable!("history viewer never starts sessions")
        }

        async fn submit_answer(
            &self,
            _session_id: &str,
            _answer: &str,
        ) -> Result<AnswerResponse, ServiceError> {
            unreachable!("history viewer never submits answers")
        }

        async fn list_workflows(&self) -> Result<Vec<WorkflowRecord>, ServiceError> {
            self.responses.lock().unwrap().remove(0)
        }

        async fn welcome(&self) -> Result<String, ServiceError> {
            Ok(String::new())
        }
    }

    fn record(id: &str, day: u32) -> WorkflowRecord {
        WorkflowRecord {
            workflow_id: id.to_string(),
            prompt: format!("prompt {}", id),
            response: format!("response {}", id),
            timestamp: Utc.with_ymd_and_hms(2024, 12, day, 12, 0, 0).unwrap().into(),
        }
    }

    #[tokio::test]
    async fn test_empty_list_renders_without_error() {
        let mut viewer = HistoryViewer::new(ScriptedHistory::new(vec![Ok(Vec::new())]));

        assert!(viewer.load().await.is_empty());
        assert!(viewer.last_error().is_none());
        assert!(viewer.render().contains("(no saved workflows)"));
    }

    #[tokio::test]
    async fn test_server_order_is_preserved() {
        // 古い順・新しい順が混在していても並べ替えない
        let records = vec![record("b", 2), record("a", 1), record("c", 3)];
        let mut viewer = HistoryViewer::new(ScriptedHistory::new(vec![Ok(records.clone())]));

        assert_eq!(viewer.load().await, records.as_slice());

        let rendered = viewer.render();
        let b = rendered.find("[b]").unwrap();
        let a = rendered.find("[a]").unwrap();
        let c = rendered.find("[c]").unwrap();
        assert!(b < a && a < c);
        assert!(rendered.contains("Prompt: prompt a"));
        assert!(rendered.contains("Response: response c"));
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_is_rendered_verbatim() {
        let mut odd = record("b", 2);
        odd.timestamp = Timestamp::parse("sometime last week");
        let mut viewer =
            HistoryViewer::new(ScriptedHistory::new(vec![Ok(vec![record("a", 1), odd])]));

        assert_eq!(viewer.load().await.len(), 2);

        let rendered = viewer.render();
        assert!(rendered.contains("[a]"));
        assert!(rendered.contains("Timestamp: sometime last week\n"));
    }

    #[tokio::test]
    async fn test_failure_leaves_list_empty() {
        let mut viewer = HistoryViewer::new(ScriptedHistory::new(vec![
            Ok(vec![record("a", 1)]),
            Err(ServiceError::Status {
                endpoint: "/get-workflows/",
                status: 503,
                reason: "Service Unavailable".to_string(),
            }),
            Ok(vec![record("z", 9)]),
        ]));

        assert_eq!(viewer.load().await.len(), 1);

        assert!(viewer.load().await.is_empty());
        assert_eq!(
            viewer.last_error(),
            Some("API error: 503 Service Unavailable")
        );

        // 次の load で回復する
        assert_eq!(viewer.load().await[0].workflow_id, "z");
        assert!(viewer.last_error().is_none());
    }
}
