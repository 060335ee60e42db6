//! Chat transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Retrieved from the uploaded document
    Pdf,
    /// Retrieved from a web search
    Web,
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerSource::Pdf => write!(f, "pdf"),
            AnswerSource::Web => write!(f, "web"),
        }
    }
}

/// A web citation: title, url and the snippet that supported the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// A single entry in a chat transcript.
///
/// Assistant content is markdown. Error replies are assistant messages whose
/// content starts with `Error: ` and which carry no source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AnswerSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_sources: Vec<WebSource>,
}

fn message_id(suffix: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), suffix)
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: message_id("user"),
            kind: MessageKind::User,
            content: content.into(),
            timestamp: Utc::now(),
            source: None,
            web_sources: Vec::new(),
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        source: AnswerSource,
        web_sources: Vec<WebSource>,
    ) -> Self {
        Self {
            id: message_id("assistant"),
            kind: MessageKind::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            source: Some(source),
            web_sources,
        }
    }

    /// An assistant-authored message reporting a failed query.
    pub fn error(error: impl fmt::Display) -> Self {
        Self {
            id: message_id("error"),
            kind: MessageKind::Assistant,
            content: format!("Error: {}", error),
            timestamp: Utc::now(),
            source: None,
            web_sources: Vec::new(),
        }
    }
}
