//! Persisted set of spell ids with toggle semantics.
//!
//! The favorites set is independent of the collection lifecycle: it is
//! the only state that survives an import or re-fetch. Every mutation
//! re-persists the full set through the store.

use crate::error::Result;
use crate::store::DataStore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    /// Loads the persisted set, failing open: a missing or corrupt
    /// persisted value yields an empty set, never an error.
    pub fn load<S: DataStore>(store: &S) -> Self {
        let ids = match store.load_favorite_ids() {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                log::warn!("favorites unreadable, starting empty: {}", err);
                BTreeSet::new()
            }
        };
        Self { ids }
    }

    /// Flips membership for `id` and immediately persists the full
    /// resulting set. Returns the new membership state.
    pub fn toggle<S: DataStore>(&mut self, store: &mut S, id: &str) -> Result<bool> {
        let now_member = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        store.save_favorite_ids(&self.as_vec())?;
        Ok(now_member)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
