use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::loader::{self, RemoteSource};
use crate::model::Spell;
use crate::store::DataStore;

/// Forces a remote re-fetch, bypassing the snapshot fast path, and
/// persists the result as the new snapshot.
pub fn run<S: DataStore, R: RemoteSource>(
    store: &mut S,
    remote: &R,
    source_url: &str,
) -> Result<(Vec<Spell>, CmdResult)> {
    let spells = loader::load_remote_and_snapshot(store, remote, source_url)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Refreshed {} spells from the remote source",
        spells.len()
    )));
    Ok((spells, result))
}
