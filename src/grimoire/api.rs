//! # API Facade
//!
//! Thin facade over the command layer and the single entry point for
//! every grimoire operation, regardless of the UI driving it. It holds
//! the loaded collection and the favorites set for the session,
//! dispatches to `commands::*`, and returns structured `CmdResult`
//! values. It performs no presentation: no stdout, no formatting.
//!
//! `GrimoireApi<S: DataStore>` is generic over the storage backend:
//! `FileStore` in production, `InMemoryStore` in tests.

use crate::cache::{AssetFetcher, OfflineCache};
use crate::commands;
use crate::config::GrimoireConfig;
use crate::error::Result;
use crate::favorites::Favorites;
use crate::loader::{self, RemoteSource};
use crate::model::Spell;
use crate::query::{SortMode, SpellQuery};
use crate::store::DataStore;
use std::path::{Path, PathBuf};

/// What a `config` invocation should do.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    Show,
    Get(String),
    Set(String, String),
}

pub struct GrimoireApi<S: DataStore> {
    store: S,
    config: GrimoireConfig,
    config_dir: PathBuf,
    spells: Vec<Spell>,
    favorites: Favorites,
}

impl<S: DataStore> GrimoireApi<S> {
    pub fn new(store: S, config: GrimoireConfig, config_dir: impl AsRef<Path>) -> Self {
        let favorites = Favorites::load(&store);
        Self {
            store,
            config,
            config_dir: config_dir.as_ref().to_path_buf(),
            spells: Vec::new(),
            favorites,
        }
    }

    pub fn config(&self) -> &GrimoireConfig {
        &self.config
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Populates the session collection: snapshot first, remote
    /// fallback with a best-effort snapshot write.
    pub fn load<R: RemoteSource>(&mut self, remote: &R) -> Result<()> {
        self.spells = loader::load(&mut self.store, remote, &self.config.source_url)?;
        Ok(())
    }

    pub fn list(&self, query: &SpellQuery, sort: SortMode) -> Result<commands::CmdResult> {
        commands::list::run(&self.spells, query, sort, &self.favorites)
    }

    pub fn view<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        commands::view::run(&self.spells, selectors)
    }

    pub fn toggle_favorites<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        commands::favorite::toggle(&mut self.store, &self.spells, &mut self.favorites, selectors)
    }

    pub fn import(&mut self, path: &Path) -> Result<commands::CmdResult> {
        let (spells, result) = commands::import::run(&mut self.store, path)?;
        if let Some(spells) = spells {
            self.spells = spells;
        }
        Ok(result)
    }

    pub fn export(&self, path: Option<PathBuf>) -> Result<commands::CmdResult> {
        commands::export::run(&self.spells, path)
    }

    pub fn preset(&self, name: &str, sort: SortMode) -> Result<commands::CmdResult> {
        commands::presets::run(&self.spells, name, sort, &self.favorites)
    }

    pub fn refresh<R: RemoteSource>(&mut self, remote: &R) -> Result<commands::CmdResult> {
        let (spells, result) =
            commands::refresh::run(&mut self.store, remote, &self.config.source_url)?;
        self.spells = spells;
        Ok(result)
    }

    pub fn tags(&self) -> Result<commands::CmdResult> {
        commands::tags::run(&self.spells)
    }

    /// The offline cache generation the current configuration names,
    /// rooted under the data directory.
    pub fn cache(&self) -> OfflineCache {
        OfflineCache::new(
            self.config_dir.join("cache"),
            self.config.cache_name.clone(),
            self.config.manifest.clone(),
        )
    }

    pub fn cache_install<F: AssetFetcher>(&self, fetcher: &F) -> Result<commands::CmdResult> {
        commands::cache::install(&self.cache(), fetcher)
    }

    pub fn cache_activate(&self) -> Result<commands::CmdResult> {
        commands::cache::activate(&self.cache())
    }

    pub fn cache_status(&self) -> Result<commands::CmdResult> {
        commands::cache::status(&self.cache())
    }

    /// Creates the data directory and writes the current configuration
    /// so the keys are visible for editing.
    pub fn init(&self) -> Result<commands::CmdResult> {
        self.config.save(&self.config_dir)?;
        let mut result = commands::CmdResult::default();
        result.add_message(commands::CmdMessage::success(format!(
            "Initialized data directory at {}",
            self.config_dir.display()
        )));
        Ok(result)
    }

    pub fn configure(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let mut result = commands::CmdResult::default();
        match action {
            ConfigAction::Show => {}
            ConfigAction::Get(key) => match self.config.get(&key) {
                Some(value) => {
                    result.add_message(commands::CmdMessage::info(format!("{} = {}", key, value)))
                }
                None => result.add_message(commands::CmdMessage::error(format!(
                    "Unknown config key: {}",
                    key
                ))),
            },
            ConfigAction::Set(key, value) => {
                self.config.set(&key, &value)?;
                self.config.save(&self.config_dir)?;
                result.add_message(commands::CmdMessage::success(format!(
                    "{} set to {}",
                    key, value
                )));
            }
        }
        Ok(result.with_config(self.config.clone()))
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};
