//! Event types emitted by an execution service during a run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A discrete notification that a stage produced (partial or final) output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Name of the stage that produced this event
    pub author: String,

    /// Marks the stage's terminal emission
    pub is_final: bool,

    /// The event payload
    pub content: Content,

    /// When the event was produced
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// A final event carrying a single text part
    pub fn final_text(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_final: true,
            content: Content::from_text(text),
            timestamp: Utc::now(),
        }
    }

    /// A partial (non-final) event carrying a single text part
    pub fn partial_text(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_final: false,
            content: Content::from_text(text),
            timestamp: Utc::now(),
        }
    }
}

/// Event payload: an ordered list of parts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    /// Content holding a single text part
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// First text payload, if any part carries text
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { text } => Some(text.as_str()),
            Part::Data { .. } => None,
        })
    }

    /// Consume the content, returning the first text payload
    pub fn into_first_text(self) -> Option<String> {
        self.parts.into_iter().find_map(|part| match part {
            Part::Text { text } => Some(text),
            Part::Data { .. } => None,
        })
    }
}

/// One piece of an event payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Plain text
    Text { text: String },

    /// Structured data
    Data { data: Value },
}

/// A message submitted to the execution service to start a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: Content,
}

impl Message {
    /// A user message carrying a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Content::from_text(text),
        }
    }
}
