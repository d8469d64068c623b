//! Session Service の JSON 型
//!
//! リクエスト型は借用で組み立て、レスポンス型は所有権を持つ値として受け取ります。

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `POST /start-session/` のリクエストボディ
#[derive(Debug, Serialize)]
pub(crate) struct StartSessionRequest<'a> {
    pub(crate) idea: &'a str,
}

/// `POST /start-session/` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    /// 最初の質問
    pub question: String,
}

/// `POST /answer-question/` のリクエストボディ
#[derive(Debug, Serialize)]
pub(crate) struct AnswerRequest<'a> {
    pub(crate) session_id: &'a str,
    pub(crate) answer: &'a str,
}

/// `POST /answer-question/` のレスポンス
///
/// 全質問に回答済みの場合、サーバーは `question` を含めず `message` だけを返します。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnswerResponse {
    /// 次の質問を持つレスポンス
    pub fn next(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            message: None,
        }
    }

    /// 完了を示すレスポンス
    pub fn completed() -> Self {
        Self::default()
    }

    /// 次の質問。欠落または空白のみなら `None`（= 完了）
    pub fn next_question(&self) -> Option<&str> {
        self.question.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// `GET /get-workflows/` のレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct WorkflowListResponse {
    #[serde(default)]
    pub(crate) workflows: Option<Vec<WorkflowRecord>>,
}

/// `GET /` のレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct WelcomeResponse {
    pub(crate) message: String,
}

/// 保存済みワークフロー（サーバー所有、読み取り専用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub workflow_id: String,
    pub prompt: String,
    pub response: String,
    /// 欠落・null でも一覧全体の読み込みは失敗させない
    #[serde(default)]
    pub timestamp: Timestamp,
}

/// サーバーから受け取ったタイムスタンプ
///
/// 受け取った値は `raw` にそのまま残し、日時として解釈できた場合のみ `parsed` を持ちます。
/// 受け付ける形式:
///
/// - RFC 3339（`2024-12-01T09:30:00Z`, `2024-12-01T18:30:00+09:00`）
/// - オフセットなしの ISO 8601（UTC とみなす）
/// - 日付のみ（`2024-12-01`、UTC の 0 時）
/// - UNIX エポック秒、またはミリ秒（数値・文字列どちらでも）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

/// これ以上の絶対値を持つエポック値はミリ秒とみなす（秒なら西暦 5138 年以降）
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

impl Timestamp {
    /// 文字列を解釈する。解釈できなくても値は保持する
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_timestamp(raw.trim());
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 日時として解釈できた場合のみ `Some`
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }

    fn from_epoch(raw: String, value: f64) -> Self {
        Self {
            raw,
            parsed: epoch_to_datetime(value),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            raw: value.to_rfc3339(),
            parsed: Some(value),
        }
    }
}

/// 解釈できればローカル時刻、できなければ受け取った値そのまま
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parsed {
            Some(dt) => write!(f, "{}", dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")),
            None if self.raw.trim().is_empty() => f.write_str("unknown"),
            None => f.write_str(&self.raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.raw.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.raw)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Self::default(),
            serde_json::Value::String(raw) => Self::parse(raw),
            serde_json::Value::Number(n) => {
                Self::from_epoch(n.to_string(), n.as_f64().unwrap_or(f64::NAN))
            }
            other => Self {
                raw: other.to_string(),
                parsed: None,
            },
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    raw.parse::<f64>().ok().and_then(epoch_to_datetime)
}

fn epoch_to_datetime(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
        value
    } else {
        value * 1000.0
    };
    DateTime::from_timestamp_millis(millis.round() as i64)
}
