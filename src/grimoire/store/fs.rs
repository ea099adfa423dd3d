use super::DataStore;
use crate::error::{GrimoireError, Result};
use crate::model::Spell;
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILENAME: &str = "spells.json";
const FAVORITES_FILENAME: &str = "favorites.json";

/// File-backed store rooted at the application data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILENAME)
    }

    fn favorites_path(&self) -> PathBuf {
        self.root.join(FAVORITES_FILENAME)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GrimoireError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_snapshot(&self) -> Result<Option<Vec<Spell>>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(GrimoireError::Io)?;
        let spells: Vec<Spell> =
            serde_json::from_str(&content).map_err(GrimoireError::Serialization)?;
        Ok(Some(spells))
    }

    fn save_snapshot(&mut self, spells: &[Spell]) -> Result<()> {
        self.ensure_root()?;
        let content = serde_json::to_string_pretty(spells).map_err(GrimoireError::Serialization)?;
        fs::write(self.snapshot_path(), content).map_err(GrimoireError::Io)?;
        Ok(())
    }

    fn load_favorite_ids(&self) -> Result<Vec<String>> {
        let path = self.favorites_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(GrimoireError::Io)?;
        let ids: Vec<String> =
            serde_json::from_str(&content).map_err(GrimoireError::Serialization)?;
        Ok(ids)
    }

    fn save_favorite_ids(&mut self, ids: &[String]) -> Result<()> {
        self.ensure_root()?;
        let content = serde_json::to_string(ids).map_err(GrimoireError::Serialization)?;
        fs::write(self.favorites_path(), content).map_err(GrimoireError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Spell> {
        vec![Spell {
            id: "light".into(),
            name: "Light".into(),
            ..Spell::default()
        }]
    }

    #[test]
    fn missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_snapshot().unwrap().is_none());
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));
        store.save_snapshot(&sample()).unwrap();
        let loaded = store.load_snapshot().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "light");
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        fs::write(store.snapshot_path(), "{not json").unwrap();
        assert!(store.load_snapshot().is_err());
    }

    #[test]
    fn favorites_round_trip_and_default_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        assert!(store.load_favorite_ids().unwrap().is_empty());

        store
            .save_favorite_ids(&["fireball".to_string(), "shield".to_string()])
            .unwrap();
        assert_eq!(store.load_favorite_ids().unwrap().len(), 2);
    }
}
