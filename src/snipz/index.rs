//! # Snippet selection
//!
//! Snippet ids are UUIDs, which nobody wants to type. Listings therefore number
//! snippets by their position on the board (`1` is the most recent), and
//! commands accept either that number or an id (a unique prefix is enough).
//!
//! Positions are only meaningful for the listing they came from: updating a
//! snippet moves it to the top on the next load.

use crate::board::Board;
use crate::error::{Result, SnipzError};
use crate::model::Snippet;
use std::fmt;
use std::str::FromStr;

/// A user input that points at one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSelector {
    /// 1-based position in the current listing.
    Index(usize),
    /// Full id or an unambiguous prefix of one.
    Id(String),
}

impl fmt::Display for SnippetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetSelector::Index(i) => write!(f, "{}", i),
            SnippetSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for SnippetSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty snippet selector".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Snippet numbers start at 1".to_string()),
            Ok(n) => Ok(SnippetSelector::Index(n)),
            Err(_) => Ok(SnippetSelector::Id(s.to_string())),
        }
    }
}

/// A snippet together with the number it is listed under.
#[derive(Debug, Clone)]
pub struct DisplaySnippet {
    pub index: usize,
    pub snippet: Snippet,
}

/// Numbers the board's snippets in display order, starting at 1.
pub fn index_snippets(board: &Board) -> Vec<DisplaySnippet> {
    board
        .items()
        .iter()
        .enumerate()
        .map(|(i, snippet)| DisplaySnippet {
            index: i + 1,
            snippet: snippet.clone(),
        })
        .collect()
}

/// Finds the snippet a selector points at.
pub fn resolve(board: &Board, selector: &SnippetSelector) -> Result<DisplaySnippet> {
    let found: Option<(usize, &Snippet)> = match selector {
        SnippetSelector::Index(n) => n
            .checked_sub(1)
            .and_then(|i| board.items().get(i))
            .map(|s| (*n, s)),
        SnippetSelector::Id(prefix) => {
            if let Some(pos) = board.items().iter().position(|s| &s.id == prefix) {
                Some((pos + 1, &board.items()[pos]))
            } else {
                let mut matches = board
                    .items()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.id.starts_with(prefix.as_str()));
                match (matches.next(), matches.next()) {
                    (Some((pos, s)), None) => Some((pos + 1, s)),
                    (Some(_), Some(_)) => {
                        return Err(SnipzError::Api(format!(
                            "Id prefix '{}' matches more than one snippet",
                            prefix
                        )))
                    }
                    _ => None,
                }
            }
        }
    };

    found
        .map(|(index, snippet)| DisplaySnippet {
            index,
            snippet: snippet.clone(),
        })
        .ok_or_else(|| SnipzError::Api(format!("No snippet matches '{}'", selector)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local::fixtures::snippet;

    fn board() -> Board {
        let mut board = Board::new();
        board.replace_all(vec![
            snippet("abc-1", "First", 30),
            snippet("abd-2", "Second", 20),
            snippet("xyz-3", "Third", 10),
        ]);
        board
    }

    #[test]
    fn parses_numbers_and_ids() {
        assert_eq!("2".parse::<SnippetSelector>(), Ok(SnippetSelector::Index(2)));
        assert_eq!(
            "abc".parse::<SnippetSelector>(),
            Ok(SnippetSelector::Id("abc".to_string()))
        );
        assert!("0".parse::<SnippetSelector>().is_err());
        assert!("  ".parse::<SnippetSelector>().is_err());
    }

    #[test]
    fn indexes_in_board_order() {
        let listed = index_snippets(&board());
        let pairs: Vec<_> = listed
            .iter()
            .map(|d| (d.index, d.snippet.title.as_str()))
            .collect();
        assert_eq!(pairs, [(1, "First"), (2, "Second"), (3, "Third")]);
    }

    #[test]
    fn resolves_by_index() {
        let found = resolve(&board(), &SnippetSelector::Index(3)).unwrap();
        assert_eq!(found.snippet.id, "xyz-3");
        assert!(resolve(&board(), &SnippetSelector::Index(4)).is_err());
    }

    #[test]
    fn resolves_by_full_id_and_unique_prefix() {
        let board = board();
        let found = resolve(&board, &SnippetSelector::Id("abd-2".into())).unwrap();
        assert_eq!(found.index, 2);
        let found = resolve(&board, &SnippetSelector::Id("xy".into())).unwrap();
        assert_eq!(found.snippet.title, "Third");
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let err = resolve(&board(), &SnippetSelector::Id("ab".into())).unwrap_err();
        assert!(err.to_string().contains("more than one"));
    }
}
