//! The presentation layer's working set.
//!
//! A [`Board`] is what a UI shows: the snippets it currently knows about, in
//! display order, plus at most one snippet being edited. It never talks to
//! storage; the command layer applies gateway results to it.

use crate::model::Snippet;

#[derive(Debug, Default, Clone)]
pub struct Board {
    items: Vec<Snippet>,
    editing: Option<String>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Snippet] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.items.iter().find(|s| s.id == id)
    }

    /// Replaces the whole working set, e.g. after the initial load.
    pub fn replace_all(&mut self, items: Vec<Snippet>) {
        self.items = items;
        if let Some(id) = &self.editing {
            if self.get(id).is_none() {
                self.editing = None;
            }
        }
    }

    /// Newly created snippets go to the top.
    pub fn prepend(&mut self, snippet: Snippet) {
        self.items.insert(0, snippet);
    }

    /// Swaps in an updated record, keeping its position.
    /// Returns false if the board did not hold that id.
    pub fn replace(&mut self, snippet: Snippet) -> bool {
        match self.items.iter_mut().find(|s| s.id == snippet.id) {
            Some(slot) => {
                *slot = snippet;
                true
            }
            None => false,
        }
    }

    /// Drops a snippet and, if it was being edited, the edit as well.
    pub fn remove(&mut self, id: &str) -> Option<Snippet> {
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        let pos = self.items.iter().position(|s| s.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Starts editing `id`. Any previous edit target is dropped silently.
    /// Returns false if the id is not on the board.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.editing = Some(id.to_string());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn editing(&self) -> Option<&Snippet> {
        self.editing.as_deref().and_then(|id| self.get(id))
    }
}
