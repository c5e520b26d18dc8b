//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every snipz operation, whatever the UI.
//!
//! `SnipzApi` owns two things:
//! - the gateway, chosen once at startup and never swapped
//! - the [`Board`], i.e. what the UI currently shows and which snippet is being edited
//!
//! It parses user selectors into ids and dispatches to `commands/*.rs`. It does
//! not print, prompt or format; that is the client's job.
//!
//! ## Generic Over SnippetGateway
//!
//! - Production: `SnipzApi<Backend>`
//! - Testing: `SnipzApi<LocalStore<MemStorage>>`

use crate::board::Board;
use crate::commands;
use crate::error::{Result, SnipzError};
use crate::index::{resolve, DisplaySnippet, SnippetSelector};
use crate::model::{Snippet, SnippetDraft};
use crate::store::SnippetGateway;
use std::str::FromStr;

pub struct SnipzApi<G: SnippetGateway> {
    gateway: G,
    board: Board,
}

impl<G: SnippetGateway> SnipzApi<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            board: Board::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Loads the working set. Meant to be called once, at startup.
    pub async fn load(&mut self) -> Result<commands::CmdResult> {
        commands::load::run(&self.gateway, &mut self.board).await
    }

    pub fn list_snippets(&self) -> commands::CmdResult {
        commands::list::run(&self.board)
    }

    pub fn view_snippets<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::view::run(&self.board, &selectors)
    }

    pub fn find(&self, input: &str) -> Result<DisplaySnippet> {
        resolve(&self.board, &parse_selector(input)?)
    }

    /// Makes the selected snippet the edit target, replacing any earlier one.
    pub fn begin_edit(&mut self, input: &str) -> Result<Snippet> {
        let found = self.find(input)?;
        self.board.begin_edit(&found.snippet.id);
        Ok(found.snippet)
    }

    pub fn cancel_edit(&mut self) {
        self.board.cancel_edit();
    }

    /// Saves a form: updates the edit target if there is one, creates otherwise.
    pub async fn submit(&mut self, draft: &SnippetDraft) -> Result<commands::CmdResult> {
        if self.board.editing_id().is_some() {
            self.update_snippet(draft).await
        } else {
            self.create_snippet(draft).await
        }
    }

    pub async fn create_snippet(&mut self, draft: &SnippetDraft) -> Result<commands::CmdResult> {
        commands::create::run(&self.gateway, &mut self.board, draft).await
    }

    pub async fn update_snippet(&mut self, draft: &SnippetDraft) -> Result<commands::CmdResult> {
        commands::update::run(&self.gateway, &mut self.board, draft).await
    }

    pub async fn delete_snippet(&mut self, input: &str) -> Result<commands::CmdResult> {
        let found = self.find(input)?;
        self.delete_by_id(&found.snippet.id).await
    }

    /// Deletes by exact id, whether or not the board knows the snippet.
    pub async fn delete_by_id(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&self.gateway, &mut self.board, id).await
    }
}

fn parse_selector(input: &str) -> Result<SnippetSelector> {
    SnippetSelector::from_str(input).map_err(SnipzError::Api)
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<SnippetSelector>> {
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
