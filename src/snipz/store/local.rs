use super::area::StorageArea;
use super::SnippetGateway;
use crate::error::{Result, SnipzError};
use crate::model::{sort_by_recency, Snippet, SnippetPayload};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "snippet_items_v1";

/// Local backend: the whole collection is one JSON array under [`STORAGE_KEY`].
///
/// Every operation reads the full collection, mutates it and writes it back.
/// Nothing serializes concurrent callers: if two operations interleave, the
/// second write silently replaces the first (lost update). snipz issues one
/// operation per user action, so this is accepted rather than locked away.
pub struct LocalStore<A: StorageArea> {
    area: A,
}

impl<A: StorageArea> LocalStore<A> {
    pub fn new(area: A) -> Self {
        Self { area }
    }

    pub fn area(&self) -> &A {
        &self.area
    }

    /// Reads the stored collection in recency order.
    ///
    /// Content that is not a JSON array comes back as an empty collection.
    /// Array elements that do not decode are skipped but kept in
    /// `unreadable` so the next write does not drop them.
    fn load(&self) -> Result<Stored> {
        let raw = match self.area.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Stored::default()),
            Err(SnipzError::CorruptData(e)) => return Ok(discard(&e)),
            Err(e) => return Err(e),
        };
        match parse_collection(&raw) {
            Ok(mut stored) => {
                sort_by_recency(&mut stored.snippets);
                Ok(stored)
            }
            Err(e) => Ok(discard(&e.to_string())),
        }
    }

    fn save(&self, stored: &Stored) -> Result<()> {
        let mut items = Vec::with_capacity(stored.snippets.len() + stored.unreadable.len());
        for snippet in &stored.snippets {
            items.push(serde_json::to_value(snippet).map_err(SnipzError::Serialization)?);
        }
        items.extend(stored.unreadable.iter().cloned());
        let content = serde_json::to_string(&items).map_err(SnipzError::Serialization)?;
        self.area.set_item(STORAGE_KEY, &content)
    }
}

/// The collection as read from storage.
#[derive(Debug, Default)]
struct Stored {
    snippets: Vec<Snippet>,
    /// Elements that are not valid snippets, written back untouched.
    unreadable: Vec<Value>,
}

fn discard(reason: &str) -> Stored {
    tracing::warn!(error = %reason, key = STORAGE_KEY, "discarding unreadable snippet data");
    Stored::default()
}

fn parse_collection(raw: &str) -> Result<Stored> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnipzError::CorruptData(e.to_string()))?;
    let Value::Array(elements) = value else {
        return Err(SnipzError::CorruptData("stored value is not an array".into()));
    };

    let mut stored = Stored::default();
    for (position, element) in elements.into_iter().enumerate() {
        match Snippet::deserialize(&element) {
            Ok(snippet) => stored.snippets.push(snippet),
            Err(e) => {
                tracing::warn!(position, error = %e, "skipping unreadable snippet record");
                stored.unreadable.push(element);
            }
        }
    }
    Ok(stored)
}

#[async_trait]
impl<A: StorageArea> SnippetGateway for LocalStore<A> {
    async fn list(&self) -> Result<Vec<Snippet>> {
        let snippets = self.load()?.snippets;
        tracing::debug!(count = snippets.len(), "listed local snippets");
        Ok(snippets)
    }

    async fn create(&self, payload: SnippetPayload) -> Result<Snippet> {
        let snippet = Snippet::new(payload);
        let mut stored = self.load()?;
        stored.snippets.insert(0, snippet.clone());
        self.save(&stored)?;
        tracing::debug!(id = %snippet.id, "created local snippet");
        Ok(snippet)
    }

    async fn update(&self, id: &str, payload: SnippetPayload) -> Result<Snippet> {
        let mut stored = self.load()?;
        let snippet = stored
            .snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SnipzError::NotFound(id.to_string()))?;
        snippet.apply(payload);
        let updated = snippet.clone();
        self.save(&stored)?;
        tracing::debug!(id = %id, "updated local snippet");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut stored = self.load()?;
        stored.snippets.retain(|s| s.id != id);
        self.save(&stored)?;
        tracing::debug!(id = %id, "deleted local snippet");
        Ok(true)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::area::MemStorage;

    pub fn mem_store() -> LocalStore<MemStorage> {
        LocalStore::new(MemStorage::new())
    }

    /// Seeds the store with raw records, bypassing the gateway clock.
    pub fn seeded(snippets: &[Snippet]) -> LocalStore<MemStorage> {
        let store = mem_store();
        store
            .save(&Stored {
                snippets: snippets.to_vec(),
                unreadable: Vec::new(),
            })
            .expect("seed snippets");
        store
    }

    impl LocalStore<MemStorage> {
        /// Synchronous view of the stored collection, for assertions.
        pub fn list_now(&self) -> Vec<Snippet> {
            self.load().expect("load snippets").snippets
        }
    }

    pub fn snippet(id: &str, title: &str, updated_at: i64) -> Snippet {
        Snippet {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            code: format!("print({:?})", title),
            created_at: updated_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{mem_store, seeded, snippet};
    use super::*;
    use crate::store::area::FileStorage;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn payload(title: &str, code: &str) -> SnippetPayload {
        SnippetPayload::new(title, None, code)
    }

    #[tokio::test]
    async fn snippet_lifecycle() {
        let store = mem_store();

        let created = store
            .create(payload("Reverse a list", "def f(x): return x[::-1]"))
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Reverse a list");
        assert_eq!(created.description, "");
        assert_eq!(created.created_at, created.updated_at);

        let updated = store
            .update(
                &created.id,
                SnippetPayload::new("Reverse list", Some("note".into()), "..."),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.title, "Reverse list");
        assert_eq!(updated.description, "note");

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![updated]);

        assert!(store.delete(&created.id).await.unwrap());
        let listed = store.list().await.unwrap();
        assert!(listed.iter().all(|s| s.id != created.id));
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = mem_store();
        let mut ids = HashSet::new();
        for i in 0..20 {
            let s = store.create(payload(&format!("t{i}"), "c")).await.unwrap();
            assert!(ids.insert(s.id));
        }
        assert_eq!(store.list().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn list_is_sorted_by_updated_at_desc() {
        let store = seeded(&[
            snippet("a", "A", 10),
            snippet("b", "B", 30),
            snippet("c", "C", 20),
        ]);
        let listed = store.list().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert!(listed.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[tokio::test]
    async fn update_moves_snippet_to_front() {
        let store = seeded(&[snippet("a", "A", 10), snippet("b", "B", 30)]);
        store.update("a", payload("A2", "c")).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].id, "a");
        assert_eq!(listed[0].created_at, 10);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = seeded(&[snippet("a", "A", 10)]);
        let err = store.update("missing", payload("x", "y")).await.unwrap_err();
        assert!(matches!(err, SnipzError::NotFound(id) if id == "missing"));
        assert_eq!(store.list().await.unwrap()[0].title, "A");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = seeded(&[snippet("a", "A", 10), snippet("b", "B", 20)]);
        assert!(store.delete("a").await.unwrap());
        assert!(store.delete("a").await.unwrap());
        assert!(store.delete("never-existed").await.unwrap());
        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["b"]);
    }

    #[tokio::test]
    async fn unparsable_data_lists_as_empty() {
        let store = mem_store();
        store.area().set_item(STORAGE_KEY, "{not json").unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_array_data_lists_as_empty() {
        let store = mem_store();
        store.area().set_item(STORAGE_KEY, r#"{"id":"a"}"#).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_utf8_file_lists_as_empty_and_heals() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(FileStorage::new(dir.path().to_path_buf()));
        std::fs::write(
            dir.path().join("snippet_items_v1.json"),
            [0xff, 0xfe, 0x00, 0x9f],
        )
        .unwrap();

        assert!(store.list().await.unwrap().is_empty());
        let created = store.create(payload("T", "c")).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn malformed_record_does_not_hide_valid_ones() {
        let store = mem_store();
        let raw = serde_json::json!([
            {"id": "keep", "title": "Keep", "description": "", "code": "c",
             "createdAt": 1, "updatedAt": 1},
            {"id": "odd", "title": "Odd", "code": "c", "createdAt": 1, "updatedAt": 1.5}
        ]);
        store.area().set_item(STORAGE_KEY, &raw.to_string()).unwrap();

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["keep"]);

        let created = store.create(payload("New", "n")).await.unwrap();
        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, [created.id.as_str(), "keep"]);

        // the unreadable record is written back as it was
        let stored: Value =
            serde_json::from_str(&store.area().get_item(STORAGE_KEY).unwrap().unwrap()).unwrap();
        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[2]["id"], "odd");
        assert_eq!(stored[2]["updatedAt"], 1.5);
    }

    #[tokio::test]
    async fn create_over_corrupt_data_heals_storage() {
        let store = mem_store();
        store.area().set_item(STORAGE_KEY, "garbage").unwrap();
        let created = store.create(payload("T", "c")).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let store = mem_store();
        store.area().set_simulate_write_error(true);
        let err = store.create(payload("T", "c")).await.unwrap_err();
        assert!(matches!(err, SnipzError::Io(_)));
    }

    #[tokio::test]
    async fn file_backed_store_persists_between_instances() {
        let dir = TempDir::new().unwrap();
        let created = {
            let store = LocalStore::new(FileStorage::new(dir.path().to_path_buf()));
            store.create(payload("T", "c")).await.unwrap()
        };

        let store = LocalStore::new(FileStorage::new(dir.path().to_path_buf()));
        assert_eq!(store.list().await.unwrap(), vec![created]);

        let raw = std::fs::read_to_string(dir.path().join("snippet_items_v1.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.is_array());
        assert!(json[0].get("createdAt").is_some());
    }
}
