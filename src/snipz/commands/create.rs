use crate::board::Board;
use crate::commands::helpers::{failed, rejected};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SnippetDraft;
use crate::store::SnippetGateway;

pub async fn run<G: SnippetGateway + ?Sized>(
    gateway: &G,
    board: &mut Board,
    draft: &SnippetDraft,
) -> Result<CmdResult> {
    let payload = match draft.validate() {
        Ok(payload) => payload,
        Err(e) => return Ok(rejected(e)),
    };

    match gateway.create(payload).await {
        Ok(snippet) => {
            board.prepend(snippet.clone());
            let mut result = CmdResult::default().with_affected_snippets(vec![snippet]);
            result.add_message(CmdMessage::success("Snippet added."));
            Ok(result)
        }
        Err(e) => Ok(failed("Unable to save snippet.", e)),
    }
}
