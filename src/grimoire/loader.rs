//! Snapshot-first collection loading with paginated remote fallback.
//!
//! The load path is synchronous and per-invocation: a load or import
//! runs to completion before any other state mutation, so a stale
//! in-flight response can never overwrite newer state.

use crate::error::Result;
use crate::model::Spell;
use crate::normalize;
use crate::store::DataStore;
use serde::Deserialize;

/// One page of the remote protocol: a `results` array of
/// provider-native records and the URL of the next page, or a
/// null/absent terminator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellPage {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Seam over the paginated remote spell database.
pub trait RemoteSource {
    fn fetch_page(&self, url: &str) -> Result<SpellPage>;
}

/// Production source backed by a blocking HTTP client.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for HttpSource {
    fn fetch_page(&self, url: &str) -> Result<SpellPage> {
        let page = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<SpellPage>()?;
        Ok(page)
    }
}

/// Resolves the spell collection: fast local snapshot first, remote
/// pagination as fallback. On remote fallback the snapshot is
/// persisted best-effort for future fast-path use.
pub fn load<S, R>(store: &mut S, remote: &R, source_url: &str) -> Result<Vec<Spell>>
where
    S: DataStore,
    R: RemoteSource,
{
    match store.load_snapshot() {
        Ok(Some(spells)) if !spells.is_empty() => {
            log::info!("loaded {} spells from local snapshot", spells.len());
            Ok(retag_all(spells))
        }
        Ok(_) => {
            log::info!("no local snapshot, falling back to remote source");
            load_remote_and_snapshot(store, remote, source_url)
        }
        Err(err) => {
            log::warn!("local snapshot rejected ({}), falling back to remote", err);
            load_remote_and_snapshot(store, remote, source_url)
        }
    }
}

/// Forces a remote fetch, bypassing the snapshot fast path.
pub fn load_remote_and_snapshot<S, R>(
    store: &mut S,
    remote: &R,
    source_url: &str,
) -> Result<Vec<Spell>>
where
    S: DataStore,
    R: RemoteSource,
{
    let spells = fetch_all(remote, source_url)?;
    // Best-effort: snapshot failures never block the interactive flow.
    if let Err(err) = store.save_snapshot(&spells) {
        log::warn!("snapshot write failed (ignored): {}", err);
    }
    Ok(spells)
}

/// Pages the remote source to exhaustion, accumulating all records
/// before normalization. A malformed record degrades through the
/// normalizer's defaults rather than aborting the batch.
pub fn fetch_all<R: RemoteSource>(remote: &R, source_url: &str) -> Result<Vec<Spell>> {
    let mut raw = Vec::new();
    let mut url = Some(source_url.to_string());
    while let Some(current) = url {
        let page = remote.fetch_page(&current)?;
        raw.extend(page.results);
        url = page.next;
    }
    log::info!("fetched {} raw records from remote source", raw.len());
    Ok(raw.iter().map(normalize::normalize).collect())
}

/// Tags are re-derived at load time, never trusted from the snapshot;
/// seeded tags survive via set union.
pub fn retag_all(mut spells: Vec<Spell>) -> Vec<Spell> {
    for spell in &mut spells {
        normalize::retag(spell);
    }
    spells
}
