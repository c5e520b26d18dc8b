use crate::board::Board;
use crate::commands::helpers::{failed, rejected};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipzError};
use crate::model::SnippetDraft;
use crate::store::SnippetGateway;

/// Saves the draft over the snippet currently being edited.
///
/// On success the record is swapped in place and the edit ends. On failure
/// the edit target stays so the user can retry.
pub async fn run<G: SnippetGateway + ?Sized>(
    gateway: &G,
    board: &mut Board,
    draft: &SnippetDraft,
) -> Result<CmdResult> {
    let id = board
        .editing_id()
        .map(str::to_string)
        .ok_or_else(|| SnipzError::Api("No snippet is being edited".to_string()))?;

    let payload = match draft.validate() {
        Ok(payload) => payload,
        Err(e) => return Ok(rejected(e)),
    };

    match gateway.update(&id, payload).await {
        Ok(snippet) => {
            board.replace(snippet.clone());
            board.cancel_edit();
            let mut result = CmdResult::default().with_affected_snippets(vec![snippet]);
            result.add_message(CmdMessage::success("Snippet updated."));
            Ok(result)
        }
        Err(e) => Ok(failed("Unable to save snippet.", e)),
    }
}
