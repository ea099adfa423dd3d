use crate::cache::{AssetFetcher, OfflineCache};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Pre-populates the current cache generation from its manifest.
pub fn install<F: AssetFetcher>(cache: &OfflineCache, fetcher: &F) -> Result<CmdResult> {
    let count = cache.install(fetcher)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cache {} installed ({} assets)",
        cache.name(),
        count
    )));
    Ok(result)
}

/// Removes every stale cache generation beside the current one.
pub fn activate(cache: &OfflineCache) -> Result<CmdResult> {
    let removed = cache.activate()?;
    let mut result = CmdResult::default();
    let message = if removed == 0 {
        CmdMessage::info(format!("Cache {} is current; nothing to remove", cache.name()))
    } else {
        CmdMessage::success(format!(
            "Cache {} activated ({} stale generation{} removed)",
            cache.name(),
            removed,
            if removed == 1 { "" } else { "s" }
        ))
    };
    result.add_message(message);
    Ok(result)
}

/// Reports the current generation name and its cached request identities.
pub fn status(cache: &OfflineCache) -> Result<CmdResult> {
    let entries = cache.entries();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Cache {}: {} entr{}",
        cache.name(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    )));
    for entry in entries {
        result.add_message(CmdMessage::info(format!("  {}", entry)));
    }
    Ok(result)
}
