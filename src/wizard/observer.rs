//! ウィザードの通知インターフェース

use super::state::Completion;

/// ウィザードから呼び出し元への通知
///
/// - `on_complete`: セッション完了時に 1 回だけ呼ばれる
/// - `on_error`: Session Service 呼び出しが失敗するたびに呼ばれる
///
/// ローカルのバリデーション失敗（空の回答など）では呼ばれません。
pub trait WizardObserver: Send + Sync {
    fn on_complete(&self, completion: &Completion);

    fn on_error(&self, message: &str);
}

/// 通知を `tracing` に流すだけのオブザーバー
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl WizardObserver for LoggingObserver {
    fn on_complete(&self, completion: &Completion) {
        tracing::info!(
            idea = %completion.idea,
            answers = completion.answers.len(),
            "workflow completed"
        );
    }

    fn on_error(&self, message: &str) {
        tracing::warn!(%message, "wizard request failed");
    }
}
