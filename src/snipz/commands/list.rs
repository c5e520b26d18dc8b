use crate::board::Board;
use crate::commands::CmdResult;
use crate::index::index_snippets;

pub fn run(board: &Board) -> CmdResult {
    CmdResult::default().with_listed_snippets(index_snippets(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local::fixtures::snippet;

    #[test]
    fn numbers_board_items() {
        let mut board = Board::new();
        board.replace_all(vec![snippet("a", "A", 2), snippet("b", "B", 1)]);
        let result = run(&board);
        assert_eq!(result.listed_snippets.len(), 2);
        assert_eq!(result.listed_snippets[1].index, 2);
        assert_eq!(result.listed_snippets[1].snippet.id, "b");
    }

    #[test]
    fn empty_board_lists_nothing() {
        assert!(run(&Board::new()).listed_snippets.is_empty());
    }
}
