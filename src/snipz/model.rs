use crate::error::{Result, SnipzError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored snippet. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Snippet {
    /// Builds a brand new record with a fresh id and `created_at == updated_at`.
    pub fn new(payload: SnippetPayload) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            code: payload.code,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields and refreshes `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, payload: SnippetPayload) {
        self.title = payload.title;
        self.description = payload.description;
        self.code = payload.code;
        self.updated_at = now_millis().max(self.updated_at);
    }
}

/// The editable part of a snippet, as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
}

impl SnippetPayload {
    pub fn new(title: impl Into<String>, description: Option<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.unwrap_or_default(),
            code: code.into(),
        }
    }
}

/// Raw form input, before the caller has validated it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub title: String,
    pub description: String,
    pub code: String,
}

impl SnippetDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            code: code.into(),
        }
    }

    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self::new(
            snippet.title.clone(),
            snippet.description.clone(),
            snippet.code.clone(),
        )
    }

    /// Turns the draft into a payload.
    ///
    /// Title and description are trimmed; code is kept verbatim but must not be
    /// blank. The title must fit on one line. Every failing field is reported at once.
    pub fn validate(&self) -> Result<SnippetPayload> {
        let title = self.title.trim();
        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        } else if title.contains(['\n', '\r']) {
            errors.push("Title must be a single line".to_string());
        }
        if self.code.trim().is_empty() {
            errors.push("Code is required".to_string());
        }
        if !errors.is_empty() {
            return Err(SnipzError::Validation(errors));
        }

        Ok(SnippetPayload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            code: self.code.clone(),
        })
    }
}

/// Orders snippets most recently touched first.
pub fn sort_by_recency(snippets: &mut [Snippet]) {
    snippets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
