use crate::config::GrimoireConfig;
use crate::model::Spell;
use std::path::PathBuf;

pub mod cache;
pub mod export;
pub mod favorite;
pub mod helpers;
pub mod import;
pub mod list;
pub mod presets;
pub mod refresh;
pub mod tags;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Spells selected for display (list rows or detail views).
    pub listed: Vec<Spell>,
    /// Spells a mutation touched (favorite toggles, imports).
    pub affected: Vec<Spell>,
    /// Distinct tag labels with occurrence counts.
    pub tag_counts: Vec<(String, usize)>,
    /// Paths written by export-style commands.
    pub written_paths: Vec<PathBuf>,
    pub config: Option<GrimoireConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, spells: Vec<Spell>) -> Self {
        self.listed = spells;
        self
    }

    pub fn with_affected(mut self, spells: Vec<Spell>) -> Self {
        self.affected = spells;
        self
    }

    pub fn with_tag_counts(mut self, counts: Vec<(String, usize)>) -> Self {
        self.tag_counts = counts;
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn with_config(mut self, config: GrimoireConfig) -> Self {
        self.config = Some(config);
        self
    }
}
