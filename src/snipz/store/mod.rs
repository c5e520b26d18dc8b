//! # Storage Layer
//!
//! This module defines the persistence gateway for snipz. The [`SnippetGateway`]
//! trait is the only way the rest of the crate reads or writes snippets.
//!
//! ## Implementations
//!
//! - [`local::LocalStore`]: the default. Keeps the whole collection as one JSON
//!   array under a single storage key of a [`area::StorageArea`].
//!   - [`area::FileStorage`]: one `<key>.json` file per key in the data directory
//!   - [`area::MemStorage`]: in-memory, for tests
//!
//! - [`remote::RemoteStore`]: one HTTP request per operation against a
//!   configured API base.
//!
//! ## Backend Selection
//!
//! [`Backend::from_config`] picks exactly one implementation from a resolved
//! [`SnipzConfig`](crate::config::SnipzConfig). The choice is fixed for the
//! lifetime of the value; there is no runtime switch.
//!
//! ## Storage Format
//!
//! For `LocalStore<FileStorage>`:
//! ```text
//! $SNIPZ_HOME/
//! └── snippet_items_v1.json   # JSON array of snippets, no version field
//! ```

use crate::config::{BackendChoice, SnipzConfig};
use crate::error::Result;
use crate::model::{Snippet, SnippetPayload};
use async_trait::async_trait;

pub mod area;
pub mod local;
pub mod remote;

use area::FileStorage;
use local::LocalStore;
use remote::RemoteStore;

/// Uniform CRUD interface over snippet storage.
///
/// Implementations trust their caller: payloads are never re-validated here.
#[async_trait]
pub trait SnippetGateway: Send + Sync {
    /// Every snippet, most recently updated first.
    async fn list(&self) -> Result<Vec<Snippet>>;

    /// Stores a new snippet with a fresh id and `created_at == updated_at`.
    async fn create(&self, payload: SnippetPayload) -> Result<Snippet>;

    /// Replaces the editable fields of an existing snippet.
    ///
    /// Fails with `NotFound` when no snippet has this id.
    async fn update(&self, id: &str, payload: SnippetPayload) -> Result<Snippet>;

    /// Removes a snippet. Deleting an unknown id still succeeds.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// The backend chosen at startup.
pub enum Backend {
    Local(LocalStore<FileStorage>),
    Remote(RemoteStore),
}

impl Backend {
    pub fn from_config(config: &SnipzConfig) -> Result<Self> {
        let backend = match &config.backend {
            BackendChoice::Remote { base_url } => {
                tracing::info!(base_url = %base_url, "using remote snippet backend");
                Backend::Remote(RemoteStore::new(base_url)?)
            }
            BackendChoice::Local { data_dir } => {
                tracing::info!(data_dir = %data_dir.display(), "using local snippet backend");
                Backend::Local(LocalStore::new(FileStorage::new(data_dir.clone())))
            }
        };
        Ok(backend)
    }

    /// Short human readable description, e.g. for `snipz backend`.
    pub fn describe(&self) -> String {
        match self {
            Backend::Local(store) => format!("local ({})", store.area().root().display()),
            Backend::Remote(store) => format!("remote ({})", store.base_url()),
        }
    }
}

#[async_trait]
impl SnippetGateway for Backend {
    async fn list(&self) -> Result<Vec<Snippet>> {
        match self {
            Backend::Local(store) => store.list().await,
            Backend::Remote(store) => store.list().await,
        }
    }

    async fn create(&self, payload: SnippetPayload) -> Result<Snippet> {
        match self {
            Backend::Local(store) => store.create(payload).await,
            Backend::Remote(store) => store.create(payload).await,
        }
    }

    async fn update(&self, id: &str, payload: SnippetPayload) -> Result<Snippet> {
        match self {
            Backend::Local(store) => store.update(id, payload).await,
            Backend::Remote(store) => store.update(id, payload).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self {
            Backend::Local(store) => store.delete(id).await,
            Backend::Remote(store) => store.delete(id).await,
        }
    }
}
