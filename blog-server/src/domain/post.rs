use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const DEFAULT_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct PostId(String);

impl PostId {
    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Комментарии хранятся как есть: ни один сценарий их не создаёт.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Comment(Value);

impl Comment {
    pub(crate) fn into_value(self) -> Value {
        self.0
    }
}

/// Документ поста в том виде, в каком он лежит в таблице.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Post {
    #[serde(rename = "PostID")]
    pub(crate) post_id: PostId,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) author: String,
    #[serde(rename = "dateCreated", with = "iso_millis")]
    pub(crate) date_created: DateTime<Utc>,
    #[serde(default)]
    pub(crate) comments: Vec<Comment>,
}

/// Поля запроса на создание; `None` и пустая строка заменяются значениями по умолчанию.
#[derive(Debug, Clone, Default)]
pub(crate) struct NewPost {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
}

impl Post {
    pub(crate) fn create(input: NewPost, post_id: PostId, date_created: DateTime<Utc>) -> Self {
        Self {
            post_id,
            title: or_default(input.title, ""),
            content: or_default(input.content, ""),
            author: or_default(input.author, DEFAULT_AUTHOR),
            date_created,
            comments: Vec::new(),
        }
    }

    pub(crate) fn date_created_iso(&self) -> String {
        format_iso_millis(&self.date_created)
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Сначала новые. При равных датах выше пост с большим числовым id.
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.date_created
            .cmp(&a.date_created)
            .then_with(|| compare_ids(&b.post_id, &a.post_id))
    });
}

fn compare_ids(a: &PostId, b: &PostId) -> Ordering {
    match (a.millis(), b.millis()) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.as_str().cmp(b.as_str()),
    }
}

/// Выдаёт строго возрастающие id на основе миллисекунд, даже если часы
/// вернули одно и то же значение дважды.
#[derive(Debug, Default)]
pub(crate) struct PostIdGenerator {
    last: AtomicI64,
}

impl PostIdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&self, now: DateTime<Utc>) -> PostId {
        let candidate = now.timestamp_millis();
        let mut last = self.last.load(AtomicOrdering::Relaxed);
        loop {
            let next = candidate.max(last.saturating_add(1));
            match self.last.compare_exchange_weak(
                last,
                next,
                AtomicOrdering::AcqRel,
                AtomicOrdering::Relaxed,
            ) {
                Ok(_) => return PostId::from_millis(next),
                Err(actual) => last = actual,
            }
        }
    }
}

pub(crate) fn format_iso_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::format_iso_millis;

    pub(super) fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso_millis(value))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
