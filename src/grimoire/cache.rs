//! Named, versioned offline request cache.
//!
//! Mirrors a service-worker lifecycle: **install** pre-populates the
//! current cache generation from a fixed asset manifest (failing fast
//! if any asset is unreachable), **activate** deletes every stale
//! generation, and steady-state **fetch** intercepts requests: manifest
//! assets are served from cache without touching the network, anything
//! else goes network-first with an opportunistic cache write and a
//! cached fallback on network failure.
//!
//! The cache runs beside the main application flow and shares no
//! mutable state with the filter/sort pipeline.

use crate::error::{GrimoireError, Result};
use crate::loader::{RemoteSource, SpellPage};
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

const INDEX_FILENAME: &str = "index.json";

/// Seam over raw asset fetching so tests can script and count requests.
pub trait AssetFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production fetcher backed by a blocking HTTP client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let body = self.client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(body.to_vec())
    }
}

/// One cache generation on disk: `<root>/<name>/` holding response
/// bodies plus an `index.json` mapping request identity to filename.
pub struct OfflineCache {
    root: PathBuf,
    name: String,
    manifest: Vec<String>,
}

impl OfflineCache {
    pub fn new(root: PathBuf, name: impl Into<String>, manifest: Vec<String>) -> Self {
        Self {
            root,
            name: name.into(),
            manifest,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Pre-populates the current generation with every manifest asset.
    /// Any unreachable asset aborts the install (fail fast).
    pub fn install<F: AssetFetcher>(&self, fetcher: &F) -> Result<usize> {
        for asset in &self.manifest {
            let body = fetcher.fetch(asset).map_err(|err| {
                GrimoireError::Cache(format!("install failed for {}: {}", asset, err))
            })?;
            self.put(asset, &body)?;
        }
        log::info!("cache {} installed ({} assets)", self.name, self.manifest.len());
        Ok(self.manifest.len())
    }

    /// Deletes every sibling generation whose name differs from the
    /// current cache name. Returns the number of removed generations.
    pub fn activate(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in fs::read_dir(&self.root).map_err(GrimoireError::Io)? {
            let entry = entry.map_err(GrimoireError::Io)?;
            let path = entry.path();
            if path.is_dir() && entry.file_name() != self.name.as_str() {
                fs::remove_dir_all(&path).map_err(GrimoireError::Io)?;
                removed += 1;
                log::info!("cache generation {:?} removed", entry.file_name());
            }
        }
        Ok(removed)
    }

    /// Steady-state interception. Manifest requests are answered from
    /// cache only; the cache is authoritative for them and a miss is not
    /// re-fetched. Everything else is network-first with a cached
    /// fallback.
    pub fn fetch<F: AssetFetcher>(&self, request: &str, fetcher: &F) -> Result<Vec<u8>> {
        if let Some(asset) = self.manifest_match(request) {
            // Install keys assets by manifest entry; accept either the
            // exact request identity or the manifest key.
            return self
                .lookup(request)
                .or_else(|| self.lookup(&asset))
                .ok_or_else(|| {
                    GrimoireError::Cache(format!("manifest asset not installed: {}", request))
                });
        }
        match fetcher.fetch(request) {
            Ok(body) => {
                if let Err(err) = self.put(request, &body) {
                    log::warn!("cache write failed (ignored): {}", err);
                }
                Ok(body)
            }
            Err(err) => {
                log::info!("network failed for {}, trying cache: {}", request, err);
                self.lookup(request).ok_or(err)
            }
        }
    }

    /// Request identities currently held by this generation.
    pub fn entries(&self) -> Vec<String> {
        self.load_index().into_keys().collect()
    }

    pub fn lookup(&self, request: &str) -> Option<Vec<u8>> {
        let index = self.load_index();
        let filename = index.get(request)?;
        fs::read(self.dir().join(filename)).ok()
    }

    fn put(&self, request: &str, body: &[u8]) -> Result<()> {
        let dir = self.dir();
        fs::create_dir_all(&dir).map_err(GrimoireError::Io)?;
        let filename = entry_filename(request);
        fs::write(dir.join(&filename), body).map_err(GrimoireError::Io)?;

        let mut index = self.load_index();
        index.insert(request.to_string(), filename);
        let content = serde_json::to_string_pretty(&index).map_err(GrimoireError::Serialization)?;
        fs::write(dir.join(INDEX_FILENAME), content).map_err(GrimoireError::Io)?;
        Ok(())
    }

    fn load_index(&self) -> BTreeMap<String, String> {
        fs::read_to_string(self.dir().join(INDEX_FILENAME))
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Path-suffix match against the manifest, ignoring the query
    /// string; absolute manifest entries match on full identity.
    fn manifest_match(&self, request: &str) -> Option<String> {
        self.manifest
            .iter()
            .find(|asset| {
                if asset.contains("://") {
                    asset.as_str() == request
                } else {
                    let suffix = asset.trim_start_matches('.');
                    request_path(request).ends_with(suffix)
                }
            })
            .cloned()
    }
}

fn request_path(request: &str) -> &str {
    let after_scheme = match request.find("://") {
        Some(pos) => &request[pos + 3..],
        None => request,
    };
    let path = match after_scheme.find('/') {
        Some(pos) => &after_scheme[pos..],
        None => "/",
    };
    path.split('?').next().unwrap_or(path)
}

fn entry_filename(request: &str) -> String {
    let mut hasher = DefaultHasher::new();
    request.hash(&mut hasher);
    format!("entry-{:016x}.bin", hasher.finish())
}

/// Adapter that routes the data loader's page requests through the
/// offline cache, so the collection fetch obeys the same interception
/// strategy as every other request.
pub struct CachedSource<'a, F: AssetFetcher> {
    cache: &'a OfflineCache,
    fetcher: &'a F,
}

impl<'a, F: AssetFetcher> CachedSource<'a, F> {
    pub fn new(cache: &'a OfflineCache, fetcher: &'a F) -> Self {
        Self { cache, fetcher }
    }
}

impl<F: AssetFetcher> RemoteSource for CachedSource<'_, F> {
    fn fetch_page(&self, url: &str) -> Result<SpellPage> {
        let body = self.cache.fetch(url, self.fetcher)?;
        let page = serde_json::from_slice(&body).map_err(GrimoireError::Serialization)?;
        Ok(page)
    }
}
