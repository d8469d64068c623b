//! ウィザードコントローラー
//!
//! # 責務
//!
//! - [`WizardState`] を所有し、Session Service の応答に応じて状態を置き換える
//! - 同時に 1 件のリクエストしか発行しない（[`InFlightGuard`] による明示的な制御）
//! - 成功・失敗を [`WizardObserver`] に通知する
//!
//! # 並行性
//!
//! 状態は `std::sync::Mutex` で保護しますが、ロックは `.await` をまたいで保持しません。
//! 応答が確定するまで状態は変更されないため、途中でキャンセルされても状態は一貫したままです。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::observer::WizardObserver;
use super::state::{Completion, Session, WizardPhase, WizardState};
use crate::error::{ServiceError, WizardError};
use crate::service::{SessionService, START_SESSION_PATH};

/// 回答送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// 次の質問
    Next(String),
    /// セッション完了
    Completed(Completion),
}

/// ウィザードコントローラー
///
/// `Send + Sync` なので `Arc` で共有できます。
/// 処理中に別の操作を呼ぶと [`WizardError::RequestInFlight`] が返ります。
pub struct WizardController {
    service: Arc<dyn SessionService>,
    observer: Arc<dyn WizardObserver>,
    state: Mutex<WizardState>,
    in_flight: AtomicBool,
}

impl WizardController {
    pub fn new(service: Arc<dyn SessionService>, observer: Arc<dyn WizardObserver>) -> Self {
        Self {
            service,
            observer,
            state: Mutex::new(WizardState::Unstarted),
            in_flight: AtomicBool::new(false),
        }
    }

    /// アイデアを送信してセッションを開始する
    ///
    /// # 戻り値
    ///
    /// - `Ok(String)`: 最初の質問
    ///
    /// # エラー
    ///
    /// - [`WizardError::EmptyIdea`] - 空白のみのアイデア（送信しない）
    /// - [`WizardError::InvalidState`] - `Unstarted` 以外で呼ばれた
    /// - [`WizardError::RequestInFlight`] - 別のリクエストが処理中
    /// - [`WizardError::Service`] - 通信失敗。`on_error` 通知済みで、状態は `Unstarted` のまま
    pub async fn start(&self, idea: &str) -> Result<String, WizardError> {
        if idea.trim().is_empty() {
            return Err(WizardError::EmptyIdea);
        }

        let _guard = self.acquire()?;
        self.expect_phase("start", WizardPhase::Unstarted)?;

        let response = match self.service.start_session(idea).await {
            Ok(response) if !response.question.trim().is_empty() => response,
            Ok(_) => {
                return Err(self.fail(ServiceError::MissingQuestion {
                    endpoint: START_SESSION_PATH,
                }));
            }
            Err(e) => return Err(self.fail(e)),
        };

        tracing::info!(session_id = %response.session_id, "session started");

        let question = response.question.clone();
        self.replace_state(WizardState::started(Session::new(
            response.session_id,
            idea,
            response.question,
        )));

        Ok(question)
    }

    /// 現在の質問への回答を送信する
    ///
    /// 回答は値で受け取り、失敗時は破棄されます（入力欄のクリアに相当）。
    ///
    /// # エラー
    ///
    /// - [`WizardError::InvalidState`] - `AwaitingAnswer` 以外で呼ばれた（送信しない）
    /// - [`WizardError::EmptyAnswer`] - 空白のみの回答（送信しない、`on_error` も呼ばない）
    /// - [`WizardError::RequestInFlight`] - 別のリクエストが処理中
    /// - [`WizardError::Service`] - 通信失敗。質問と回答ログは変更されない
    pub async fn submit_answer(&self, answer: String) -> Result<Progress, WizardError> {
        let _guard = self.acquire()?;

        let session_id = {
            let state = self.lock_state();
            match state.session() {
                Some(session) => session.session_id().to_string(),
                None => {
                    return Err(WizardError::InvalidState {
                        operation: "submit_answer",
                        phase: state.phase(),
                    });
                }
            }
        };

        if answer.trim().is_empty() {
            return Err(WizardError::EmptyAnswer);
        }

        let response = match self.service.submit_answer(&session_id, &answer).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e)),
        };

        let next_question = response.next_question().map(str::to_string);
        let next_state = {
            let mut state = self.lock_state();
            let current = std::mem::take(&mut *state);
            *state = current.advance(answer, next_question.as_deref());
            state.clone()
        };

        match (next_question, next_state) {
            (Some(question), _) => {
                tracing::debug!(%session_id, "next question received");
                Ok(Progress::Next(question))
            }
            (None, WizardState::Completed(completion)) => {
                tracing::info!(%session_id, answers = completion.answers.len(), "session completed");
                self.observer.on_complete(&completion);
                Ok(Progress::Completed(completion))
            }
            (None, other) => Err(WizardError::InvalidState {
                operation: "submit_answer",
                phase: other.phase(),
            }),
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.lock_state().phase()
    }

    pub fn current_question(&self) -> Option<String> {
        self.lock_state().current_question().map(str::to_string)
    }

    pub fn session_id(&self) -> Option<String> {
        self.lock_state()
            .session()
            .map(|s| s.session_id().to_string())
    }

    /// これまでに受理された回答（挿入順）
    pub fn answers(&self) -> Vec<String> {
        self.lock_state().answers().to_vec()
    }

    /// リクエスト処理中かどうか（入力欄の無効化に使う）
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>, WizardError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
            .map_err(|_| WizardError::RequestInFlight)
    }

    fn expect_phase(&self, operation: &'static str, expected: WizardPhase) -> Result<(), WizardError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidState { operation, phase })
        }
    }

    fn replace_state(&self, next: WizardState) {
        *self.lock_state() = next;
    }

    /// 失敗を通知し、呼び出し元へ返すエラーに変換する
    fn fail(&self, error: ServiceError) -> WizardError {
        let message = error.to_string();
        tracing::debug!(%message, "session service call failed");
        self.observer.on_error(&message);
        WizardError::Service(error)
    }

    fn lock_state(&self) -> MutexGuard<'_, WizardState> {
        // 状態の置き換えはパニックしない操作だけなので、ポイズンされても値は一貫している
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 処理中フラグを保持する RAII ガード
///
/// ドロップ時（成功・失敗・キャンセル）にフラグを解放します。
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
