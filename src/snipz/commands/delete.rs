use crate::board::Board;
use crate::commands::helpers::failed;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::SnippetGateway;

pub async fn run<G: SnippetGateway + ?Sized>(
    gateway: &G,
    board: &mut Board,
    id: &str,
) -> Result<CmdResult> {
    match gateway.delete(id).await {
        Ok(_) => {
            let mut result = CmdResult::default();
            if let Some(removed) = board.remove(id) {
                result.affected_snippets.push(removed);
            }
            result.add_message(CmdMessage::success("Snippet deleted."));
            Ok(result)
        }
        Err(e) => Ok(failed("Unable to delete snippet.", e)),
    }
}
