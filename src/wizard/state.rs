//! ウィザードの状態値オブジェクト
//!
//! 状態は [`WizardState`] の値として丸ごと置き換えます。
//! フィールド単位で部分的に更新することはありません。

use std::fmt;

use serde::Serialize;

/// 進行中のセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: String,
    idea: String,
    current_question: String,
}

impl Session {
    pub fn new(
        session_id: impl Into<String>,
        idea: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            idea: idea.into(),
            current_question: question.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    fn with_question(self, question: &str) -> Self {
        Self {
            current_question: question.to_string(),
            ..self
        }
    }
}

/// 回答ログ（追記専用、挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLog(Vec<String>);

impl AnswerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, answer: String) {
        self.0.push(answer);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// 完了時に [`on_complete`](super::WizardObserver::on_complete) へ渡される内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub idea: String,
    /// 回答順。最後の回答も含む
    pub answers: Vec<String>,
}

/// 状態の種類（エラー表示・問い合わせ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Unstarted,
    AwaitingAnswer,
    Completed,
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WizardPhase::Unstarted => "unstarted",
            WizardPhase::AwaitingAnswer => "awaiting an answer",
            WizardPhase::Completed => "completed",
        };
        f.write_str(text)
    }
}

/// ウィザードの状態
///
/// `current_question()` が `None` になるのは `Unstarted` と `Completed` のときだけです。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WizardState {
    #[default]
    Unstarted,
    AwaitingAnswer {
        session: Session,
        answers: AnswerLog,
    },
    Completed(Completion),
}

impl WizardState {
    /// セッション開始直後の状態
    pub fn started(session: Session) -> Self {
        WizardState::AwaitingAnswer {
            session,
            answers: AnswerLog::new(),
        }
    }

    pub fn phase(&self) -> WizardPhase {
        match self {
            WizardState::Unstarted => WizardPhase::Unstarted,
            WizardState::AwaitingAnswer { .. } => WizardPhase::AwaitingAnswer,
            WizardState::Completed(_) => WizardPhase::Completed,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            WizardState::AwaitingAnswer { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        self.session().map(Session::current_question)
    }

    pub fn answers(&self) -> &[String] {
        match self {
            WizardState::Unstarted => &[],
            WizardState::AwaitingAnswer { answers, .. } => answers.as_slice(),
            WizardState::Completed(completion) => &completion.answers,
        }
    }

    /// 受理された回答を反映した次の状態を返す
    ///
    /// `next_question` が `None` なら `Completed` へ遷移します。
    /// `AwaitingAnswer` 以外で呼ばれた場合は状態を変えずに返します。
    pub fn advance(self, answer: String, next_question: Option<&str>) -> Self {
        match self {
            WizardState::AwaitingAnswer {
                session,
                mut answers,
            } => {
                answers.push(answer);
                match next_question {
                    Some(question) => WizardState::AwaitingAnswer {
                        session: session.with_question(question),
                        answers,
                    },
                    None => WizardState::Completed(Completion {
                        idea: session.idea,
                        answers: answers.into_vec(),
                    }),
                }
            }
            other => other,
        }
    }
}
