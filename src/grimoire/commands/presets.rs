use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GrimoireError, Result};
use crate::favorites::Favorites;
use crate::model::Spell;
use crate::query::{filter_and_sort, SortMode, SpellQuery};

/// Named scenario presets that set several filter dimensions at once.
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    tags: &'static [&'static str],
    schools: &'static [&'static str],
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "social",
        description: "Parley, persuasion and table talk",
        tags: &["social"],
        schools: &[],
    },
    Preset {
        name: "siege",
        description: "Open battle: offense, control and defense",
        tags: &["offense", "control", "defense"],
        schools: &[],
    },
    Preset {
        name: "scouting",
        description: "Reconnaissance and information gathering",
        tags: &["scouting", "utility"],
        schools: &["divination", "illusion"],
    },
    Preset {
        name: "journey",
        description: "Overland travel and logistics",
        tags: &["movement", "utility"],
        schools: &[],
    },
];

impl Preset {
    pub fn query(&self) -> SpellQuery {
        SpellQuery {
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            schools: self.schools.iter().map(|s| s.to_string()).collect(),
            ..SpellQuery::default()
        }
    }
}

pub fn get(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

pub fn run(
    spells: &[Spell],
    name: &str,
    sort: SortMode,
    favorites: &Favorites,
) -> Result<CmdResult> {
    let preset = get(name).ok_or_else(|| {
        let known: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
        GrimoireError::Api(format!(
            "Unknown preset \"{}\" (expected one of: {})",
            name,
            known.join(", ")
        ))
    })?;

    let listed = filter_and_sort(spells, &preset.query(), sort, favorites);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Preset {}: {}",
        preset.name, preset.description
    )));
    Ok(result.with_listed(listed))
}
