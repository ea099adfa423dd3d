use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrimoireError, Result};
use crate::loader::retag_all;
use crate::model::Spell;
use crate::store::DataStore;
use std::fs;
use std::path::Path;

/// Replaces the collection wholesale from a user-supplied JSON
/// document. A malformed document is reported via a transient notice
/// and leaves the collection (and its snapshot) unchanged. Imported
/// tags are a seed: fresh tags are unioned in before the replacement
/// is persisted.
pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<(Option<Vec<Spell>>, CmdResult)> {
    let mut result = CmdResult::default();

    let content = fs::read_to_string(path).map_err(GrimoireError::Io)?;
    let parsed: std::result::Result<Vec<Spell>, _> = serde_json::from_str(&content);
    let spells = match parsed {
        Ok(spells) => retag_all(spells),
        Err(err) => {
            log::info!("import rejected: {}", err);
            result.add_message(CmdMessage::error(format!(
                "Could not import {}: not a valid spell document",
                path.display()
            )));
            return Ok((None, result));
        }
    };

    store.save_snapshot(&spells)?;
    result.add_message(CmdMessage::success(format!(
        "Imported {} spells from {}",
        spells.len(),
        path.display()
    )));
    Ok((Some(spells), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn valid_document_replaces_snapshot_and_retags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spells.json");
        fs::write(
            &path,
            r#"[{"id":"cure-wounds","name":"Cure Wounds","level":1,
                "description":"A creature regains hit points.",
                "effects":["heal"],"tags":["homebrew"]}]"#,
        )
        .unwrap();

        let mut store = InMemoryStore::with_snapshot(vec![Spell {
            id: "old".into(),
            name: "Old".into(),
            ..Spell::default()
        }]);
        let (spells, result) = run(&mut store, &path).unwrap();
        let spells = spells.unwrap();

        assert_eq!(spells.len(), 1);
        assert!(spells[0].tags.iter().any(|t| t == "homebrew"));
        assert!(spells[0].tags.iter().any(|t| t == "healing"));
        assert_eq!(store.load_snapshot().unwrap().unwrap()[0].id, "cure-wounds");
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Success
        ));
    }

    #[test]
    fn malformed_document_leaves_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{this is not json").unwrap();

        let mut store = InMemoryStore::with_snapshot(vec![Spell {
            id: "old".into(),
            name: "Old".into(),
            ..Spell::default()
        }]);
        let (spells, result) = run(&mut store, &path).unwrap();

        assert!(spells.is_none());
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Error
        ));
        assert_eq!(store.load_snapshot().unwrap().unwrap()[0].id, "old");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut store = InMemoryStore::new();
        assert!(run(&mut store, Path::new("/nonexistent/spells.json")).is_err());
    }
}
