use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrimoireError, Result};
use crate::model::Spell;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

/// Serializes the current collection to a JSON document, the same
/// shape the snapshot and the fetch utility produce.
pub fn run(spells: &[Spell], path: Option<PathBuf>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if spells.is_empty() {
        result.add_message(CmdMessage::info("No spells to export."));
        return Ok(result);
    }

    let path = path.unwrap_or_else(|| {
        PathBuf::from(format!(
            "spells-export-{}.json",
            Utc::now().format("%Y-%m-%d_%H-%M-%S")
        ))
    });
    let content = serde_json::to_string_pretty(spells).map_err(GrimoireError::Serialization)?;
    fs::write(&path, content).map_err(GrimoireError::Io)?;

    result.add_message(CmdMessage::success(format!(
        "Exported {} spells to {}",
        spells.len(),
        path.display()
    )));
    Ok(result.with_written_paths(vec![path]))
}
