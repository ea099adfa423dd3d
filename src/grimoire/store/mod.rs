//! # Storage Layer
//!
//! This module defines the storage abstraction for grimoire. The
//! [`DataStore`] trait allows the application to work with different
//! persistence backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (browser storage, database) without
//!   changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Collection snapshot in `spells.json`
//!   - Favorites set in `favorites.json` (serialized array of ids)
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Lifecycle Contract
//!
//! The snapshot is best-effort: a missing snapshot is `Ok(None)` (the
//! loader falls back to the remote source), and callers are expected to
//! ignore snapshot write failures by design. The favorites entry is the
//! only state that must survive a collection replacement; corruption
//! there is handled fail-open by [`crate::favorites::Favorites`].

use crate::error::Result;
use crate::model::Spell;

pub mod fs;
pub mod memory;

/// Abstract interface for the local key-value persistence: one entry
/// for the favorites set, one optional entry for a snapshot of the
/// full collection.
pub trait DataStore {
    /// Read the local snapshot, `Ok(None)` when absent.
    fn load_snapshot(&self) -> Result<Option<Vec<Spell>>>;

    /// Replace the snapshot wholesale.
    fn save_snapshot(&mut self, spells: &[Spell]) -> Result<()>;

    /// Read the persisted favorites ids; absent means empty.
    fn load_favorite_ids(&self) -> Result<Vec<String>>;

    /// Re-serialize the full favorites set (not an append log).
    fn save_favorite_ids(&mut self, ids: &[String]) -> Result<()>;
}
