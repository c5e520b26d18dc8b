//! # Command Layer
//!
//! Each module here implements one user action on top of a
//! [`SnippetGateway`](crate::store::SnippetGateway) and the [`Board`](crate::board::Board)
//! working set.
//!
//! Gateway failures never escape a command: they are turned into
//! [`CmdMessage`]s at `Error` level and the board is left untouched. Only misuse
//! of the command itself (unknown selector, update without an edit target)
//! comes back as `Err`.

use crate::error::SnipzError;
use crate::index::DisplaySnippet;
use crate::model::Snippet;

pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod load;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_snippets: Vec<Snippet>,
    pub listed_snippets: Vec<DisplaySnippet>,
    pub messages: Vec<CmdMessage>,
    /// The gateway or validation failure behind an `Error` message, if any.
    pub failure: Option<SnipzError>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.affected_snippets = snippets;
        self
    }

    pub fn with_listed_snippets(mut self, snippets: Vec<DisplaySnippet>) -> Self {
        self.listed_snippets = snippets;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
