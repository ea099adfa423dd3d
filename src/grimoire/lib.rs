//! # Grimoire Architecture
//!
//! Grimoire is a **UI-agnostic spell catalog library**. This is not a CLI
//! application that happens to have some library code; it's a library that
//! happens to have a CLI client.
//!
//! This distinction drives the entire architecture and should guide all
//! development.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the loaded collection for the invocation            │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Data Pipeline
//!
//! The collection is rebuilt wholesale on every load: the [`loader`]
//! resolves raw records (local snapshot first, paginated remote source as
//! fallback), [`normalize`] turns each raw record into exactly one
//! [`model::Spell`] without ever failing, and [`query`] derives the
//! displayed subset as a pure function of (collection, query, favorites).
//! The [`favorites`] set is the only state that outlives a collection
//! replacement.
//!
//! The [`cache`] module is orthogonal to all of the above: it intercepts
//! outgoing requests, serves manifest assets cache-first, and degrades
//! non-manifest requests to "cached-if-available".
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! This means the same core could serve a TUI, a web service, or any
//! other UI.
//!
//! ## Testing Strategy
//!
//! 1. **Core pipeline** (`normalize.rs`, `query.rs`, `loader.rs`,
//!    `cache.rs`): thorough unit tests of derivation rules, filter laws
//!    and cache lifecycle. This is where the lion's share of testing
//!    lives.
//! 2. **Commands** (`commands/*.rs`): unit tests against
//!    `InMemoryStore`.
//! 3. **CLI** (`tests/cli_integration.rs`): end-to-end runs of the
//!    binary against a seeded `--data-dir`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`cache`]: Named, versioned offline request cache
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`commands`]: Business logic for each command
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - [`favorites`]: Persisted favorites set with toggle semantics
//! - [`loader`]: Snapshot-first collection loading with remote fallback
//! - [`model`]: Core data types (`Spell`, `Components`)
//! - [`normalize`]: Raw record → `Spell` derivation pipeline
//! - [`query`]: Declarative filtering and total sort orders
//! - [`store`]: Storage abstraction and implementations

pub mod api;
pub mod cache;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod favorites;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod query;
pub mod store;
