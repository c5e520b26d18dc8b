use crate::board::Board;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{resolve, SnippetSelector};

pub fn run(board: &Board, selectors: &[SnippetSelector]) -> Result<CmdResult> {
    let listed = selectors
        .iter()
        .map(|selector| resolve(board, selector))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_snippets(listed))
}
