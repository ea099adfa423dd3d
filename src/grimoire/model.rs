use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three spell component flags, parsed independently from the
/// upstream component string (e.g. `"V, S, M (a pinch of salt)"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub v: bool,
    #[serde(default)]
    pub s: bool,
    #[serde(default)]
    pub m: bool,
}

impl Components {
    /// Compact `V/S/M` notation for list rows; empty when no components.
    pub fn notation(&self) -> String {
        let mut parts = Vec::new();
        if self.v {
            parts.push("V");
        }
        if self.s {
            parts.push("S");
        }
        if self.m {
            parts.push("M");
        }
        parts.join("/")
    }
}

/// One catalog entity. Immutable after normalization except for `tags`
/// and `notes`, which user-supplied imports may seed.
///
/// Every field carries a serde default so that snapshots and imported
/// documents with missing fields still deserialize; the invariants
/// (`level` in 0..=9, freshly derived `tags`/`effects`) are enforced by
/// [`crate::normalize`], not trusted from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    /// Reserved for structured combat data; always null in current data.
    #[serde(default)]
    pub damage: Option<serde_json::Value>,
    /// Reserved for structured combat data; always null in current data.
    #[serde(default)]
    pub save: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub higher_levels: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub effects: Vec<String>,
}

impl Spell {
    /// The text blob free-text search runs against.
    pub fn search_blob(&self) -> String {
        let mut blob = format!("{} {}", self.name, self.description);
        if let Some(higher) = &self.higher_levels {
            blob.push(' ');
            blob.push_str(higher);
        }
        blob.to_lowercase()
    }

    pub fn level_label(&self) -> String {
        level_label(self.level)
    }

    pub fn school_label(&self) -> &str {
        school_label(&self.school)
    }
}

/// Derives the stable primary key from a display name: lowercase,
/// non-alphanumeric runs collapsed to a single `-`, ends trimmed.
/// Collisions are not resolved; they are an accepted data-quality risk.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

pub fn level_label(level: u8) -> String {
    if level == 0 {
        "Cantrip".to_string()
    } else {
        format!("Level {}", level)
    }
}

static SCHOOL_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("abjuration", "Abjuration"),
        ("conjuration", "Conjuration"),
        ("divination", "Divination"),
        ("enchantment", "Enchantment"),
        ("evocation", "Evocation"),
        ("illusion", "Illusion"),
        ("necromancy", "Necromancy"),
        ("transmutation", "Transmutation"),
    ])
});

/// Maps a normalized school key to its display label. Unknown keys pass
/// through unchanged.
pub fn school_label(school: &str) -> &str {
    SCHOOL_LABELS.get(school).copied().unwrap_or(school)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("Melf's Acid Arrow"), "melf-s-acid-arrow");
        assert_eq!(slugify("  Fireball!!  "), "fireball");
        assert_eq!(slugify("Wall of Fire"), "wall-of-fire");
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["Cure Wounds", "melf-s-acid-arrow", "---", "Ice Knife"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slugify_ignores_case_and_punctuation() {
        assert_eq!(slugify("FIREBALL"), slugify("fireball"));
        assert_eq!(slugify("(Fireball)"), slugify("Fireball"));
        assert_eq!(slugify("fire--ball"), slugify("Fire Ball"));
    }

    #[test]
    fn slugify_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn school_labels_pass_unknown_through() {
        assert_eq!(school_label("evocation"), "Evocation");
        assert_eq!(school_label("chronurgy"), "chronurgy");
    }

    #[test]
    fn components_notation() {
        let c = Components {
            v: true,
            s: false,
            m: true,
        };
        assert_eq!(c.notation(), "V/M");
        assert_eq!(Components::default().notation(), "");
    }

    #[test]
    fn spell_tolerates_sparse_documents() {
        let spell: Spell = serde_json::from_str(r#"{"name":"Light"}"#).unwrap();
        assert_eq!(spell.name, "Light");
        assert_eq!(spell.level, 0);
        assert!(spell.damage.is_none());
    }
}
