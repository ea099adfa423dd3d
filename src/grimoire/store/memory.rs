use super::DataStore;
use crate::error::Result;
use crate::model::Spell;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: Option<Vec<Spell>>,
    favorites: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(spells: Vec<Spell>) -> Self {
        Self {
            snapshot: Some(spells),
            favorites: Vec::new(),
        }
    }
}

impl DataStore for InMemoryStore {
    fn load_snapshot(&self) -> Result<Option<Vec<Spell>>> {
        Ok(self.snapshot.clone())
    }

    fn save_snapshot(&mut self, spells: &[Spell]) -> Result<()> {
        self.snapshot = Some(spells.to_vec());
        Ok(())
    }

    fn load_favorite_ids(&self) -> Result<Vec<String>> {
        Ok(self.favorites.clone())
    }

    fn save_favorite_ids(&mut self, ids: &[String]) -> Result<()> {
        self.favorites = ids.to_vec();
        Ok(())
    }
}
