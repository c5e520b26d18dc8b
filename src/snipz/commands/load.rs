use crate::board::Board;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::SnippetGateway;

pub const LOAD_FAILED: &str = "Failed to load items. Using empty list.";

/// Fills the board from storage. A failing backend leaves an empty board and
/// a warning; it is never fatal.
pub async fn run<G: SnippetGateway + ?Sized>(gateway: &G, board: &mut Board) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match gateway.list().await {
        Ok(snippets) => board.replace_all(snippets),
        Err(e) => {
            tracing::debug!(error = %e, "initial load failed");
            board.replace_all(Vec::new());
            result.add_message(CmdMessage::warning(LOAD_FAILED));
            result.failure = Some(e);
        }
    }
    Ok(result)
}
