//! # Snipz Architecture
//!
//! Snipz is a small notebook for code snippets: a title, an optional
//! description and the code itself. It is a library first; the `snipz` binary
//! is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, editor.rs)                          │
//! │  - Parses arguments, prompts, prints messages               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the gateway and the Board (working set + edit)      │
//! │  - Turns "2" or "3f9a" into snippet ids                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validates drafts, calls the gateway, updates the Board   │
//! │  - Converts failures into messages, never panics            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SnippetGateway trait: list / create / update / delete    │
//! │  - LocalStore (JSON under one key), RemoteStore (HTTP)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Division of Responsibility
//!
//! Validation happens on the caller's side ([`model::SnippetDraft::validate`]).
//! The gateway trusts what it is given and only reports storage problems.
//!
//! ## Configuration
//!
//! The backend is picked once from the environment (see [`config`]) and then
//! injected: `SnipzApi::new(Backend::from_config(&config)?)`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`board`]: The in-memory working set
//! - [`commands`]: One module per user action
//! - [`config`]: Backend selection from the environment
//! - [`editor`]: `$EDITOR` based snippet form
//! - [`error`]: Error types
//! - [`index`]: Selecting snippets by list number or id
//! - [`model`]: `Snippet`, `SnippetPayload`, `SnippetDraft`
//! - [`store`]: The gateway trait and its backends

pub mod api;
pub mod board;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod model;
pub mod store;
