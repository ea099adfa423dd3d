//! Declarative filtering and the five total sort orders.
//!
//! Filtering is a pure function of (collection, query, favorites): no
//! hidden state, safe to re-run on every input change. All filter
//! dimensions compose with logical AND; within a multi-value dimension
//! the match is logical OR against the spell's field.

use crate::favorites::Favorites;
use crate::model::Spell;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellQuery {
    /// Case-insensitive substring matched against the
    /// name+description+higher-levels blob.
    pub text: Option<String>,
    pub levels: Vec<u8>,
    pub schools: Vec<String>,
    /// Match-any against the spell's class list.
    pub classes: Vec<String>,
    /// Match-any against the spell's tag list.
    pub tags: Vec<String>,
    pub concentration_only: bool,
    pub ritual_only: bool,
    pub favorites_only: bool,
    /// Component-presence flags; all of the set ones must be present.
    pub verbal: bool,
    pub somatic: bool,
    pub material: bool,
}

impl SpellQuery {
    pub fn is_empty(&self) -> bool {
        *self == SpellQuery::default()
    }

    fn matches(&self, spell: &Spell, favorites: &Favorites) -> bool {
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() && !spell.search_blob().contains(&needle) {
                return false;
            }
        }
        if !self.levels.is_empty() && !self.levels.contains(&spell.level) {
            return false;
        }
        if !self.schools.is_empty() && !self.schools.iter().any(|s| *s == spell.school) {
            return false;
        }
        if !self.classes.is_empty()
            && !self.classes.iter().any(|c| spell.classes.iter().any(|sc| sc == c))
        {
            return false;
        }
        if !self.tags.is_empty()
            && !self.tags.iter().any(|t| spell.tags.iter().any(|st| st == t))
        {
            return false;
        }
        if self.concentration_only && !spell.concentration {
            return false;
        }
        if self.ritual_only && !spell.ritual {
            return false;
        }
        if self.favorites_only && !favorites.is_favorite(&spell.id) {
            return false;
        }
        if self.verbal && !spell.components.v {
            return false;
        }
        if self.somatic && !spell.components.s {
            return false;
        }
        if self.material && !spell.components.m {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    NameAsc,
    NameDesc,
    #[default]
    LevelAsc,
    LevelDesc,
    TimeAsc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::NameAsc,
        SortMode::NameDesc,
        SortMode::LevelAsc,
        SortMode::LevelDesc,
        SortMode::TimeAsc,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "name-asc",
            SortMode::NameDesc => "name-desc",
            SortMode::LevelAsc => "level-asc",
            SortMode::LevelDesc => "level-desc",
            SortMode::TimeAsc => "time-asc",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.key() == s)
            .ok_or_else(|| format!("Unknown sort mode: {}", s))
    }
}

/// Casting-time precedence for the time-asc order. Unrecognized text
/// sorts last.
const TIME_ORDER: &[&str] = &[
    "reaction",
    "bonus",
    "1 action",
    "1 round",
    "1 minute",
    "10 minutes",
    "1 hour",
];

fn time_rank(casting_time: &str) -> usize {
    let lower = casting_time.to_lowercase();
    TIME_ORDER
        .iter()
        .position(|t| lower.contains(t))
        .unwrap_or(TIME_ORDER.len())
}

/// Caseless-first name collation; byte order breaks caseless ties so
/// two spells with distinct names are always strictly ordered. The `id`
/// tiebreak makes the ordering total even for duplicate names.
fn by_name(a: &Spell, b: &Spell) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

fn compare(a: &Spell, b: &Spell, mode: SortMode) -> Ordering {
    match mode {
        SortMode::NameAsc => by_name(a, b),
        SortMode::NameDesc => by_name(a, b).reverse(),
        SortMode::LevelAsc => a.level.cmp(&b.level).then_with(|| by_name(a, b)),
        SortMode::LevelDesc => b.level.cmp(&a.level).then_with(|| by_name(a, b)),
        SortMode::TimeAsc => time_rank(&a.casting_time)
            .cmp(&time_rank(&b.casting_time))
            .then_with(|| by_name(a, b)),
    }
}

/// Applies the query predicates and the chosen ordering, returning the
/// displayed subsequence.
pub fn filter_and_sort(
    spells: &[Spell],
    query: &SpellQuery,
    sort: SortMode,
    favorites: &Favorites,
) -> Vec<Spell> {
    let mut out: Vec<Spell> = spells
        .iter()
        .filter(|spell| query.matches(spell, favorites))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare(a, b, sort));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(name: &str, level: u8, school: &str) -> Spell {
        Spell {
            id: crate::model::slugify(name),
            name: name.to_string(),
            level,
            school: school.to_string(),
            ..Spell::default()
        }
    }

    fn fixture() -> Vec<Spell> {
        let mut fireball = spell("Fireball", 3, "evocation");
        fireball.tags = vec!["offense".into()];
        fireball.classes = vec!["wizard".into(), "sorcerer".into()];
        fireball.casting_time = "1 action".into();
        fireball.components = crate::model::Components {
            v: true,
            s: true,
            m: true,
        };

        let mut shield = spell("Shield", 1, "abjuration");
        shield.tags = vec!["defense".into()];
        shield.classes = vec!["wizard".into()];
        shield.casting_time = "1 reaction".into();
        shield.concentration = false;
        shield.components = crate::model::Components {
            v: true,
            s: true,
            m: false,
        };

        let mut augury = spell("Augury", 2, "divination");
        augury.tags = vec!["scouting".into()];
        augury.classes = vec!["cleric".into()];
        augury.casting_time = "1 minute".into();
        augury.ritual = true;
        augury.description = "Level 2 · Divination · omens".into();

        vec![fireball, shield, augury]
    }

    #[test]
    fn empty_query_is_identity_filter() {
        let spells = fixture();
        let out = filter_and_sort(&spells, &SpellQuery::default(), SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), spells.len());
    }

    #[test]
    fn level_filter_only_removes() {
        let spells = fixture();
        let all = filter_and_sort(&spells, &SpellQuery::default(), SortMode::NameAsc, &Favorites::default());
        let query = SpellQuery {
            levels: vec![1, 3],
            ..SpellQuery::default()
        };
        let some = filter_and_sort(&spells, &query, SortMode::NameAsc, &Favorites::default());
        assert!(some.len() < all.len());
        assert!(some.iter().all(|s| all.iter().any(|a| a.id == s.id)));
        assert!(some.iter().all(|s| [1, 3].contains(&s.level)));
    }

    #[test]
    fn dimensions_compose_with_and() {
        let spells = fixture();
        let query = SpellQuery {
            classes: vec!["wizard".into()],
            levels: vec![3],
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &query, SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Fireball");
    }

    #[test]
    fn multi_value_dimension_is_match_any() {
        let spells = fixture();
        let query = SpellQuery {
            tags: vec!["offense".into(), "defense".into()],
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &query, SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn text_search_hits_description() {
        let spells = fixture();
        let query = SpellQuery {
            text: Some("OMENS".into()),
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &query, SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Augury");
    }

    #[test]
    fn component_flags_are_match_all() {
        let spells = fixture();
        let query = SpellQuery {
            verbal: true,
            material: true,
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &query, SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Fireball");
    }

    #[test]
    fn ritual_and_favorites_flags() {
        let spells = fixture();
        let ritual_query = SpellQuery {
            ritual_only: true,
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &ritual_query, SortMode::NameAsc, &Favorites::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Augury");

        let mut favorites = Favorites::default();
        favorites.insert("shield");
        let fav_query = SpellQuery {
            favorites_only: true,
            ..SpellQuery::default()
        };
        let out = filter_and_sort(&spells, &fav_query, SortMode::NameAsc, &favorites);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Shield");
    }

    #[test]
    fn sorts_are_stable_and_total() {
        let spells = fixture();
        for mode in SortMode::ALL {
            let once = filter_and_sort(&spells, &SpellQuery::default(), mode, &Favorites::default());
            let twice = filter_and_sort(&once, &SpellQuery::default(), mode, &Favorites::default());
            assert_eq!(once, twice, "repeated {} sort must not reshuffle", mode.key());
            for i in 0..once.len() {
                for j in (i + 1)..once.len() {
                    assert_ne!(
                        compare(&once[i], &once[j], mode),
                        Ordering::Equal,
                        "distinct spells must be strictly ordered"
                    );
                }
            }
        }
    }

    #[test]
    fn level_sort_breaks_ties_by_name() {
        let mut spells = fixture();
        spells.push(spell("Blink", 3, "transmutation"));
        let out = filter_and_sort(&spells, &SpellQuery::default(), SortMode::LevelAsc, &Favorites::default());
        let names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Shield", "Augury", "Blink", "Fireball"]);
    }

    #[test]
    fn time_sort_uses_precedence_table() {
        let spells = fixture();
        let out = filter_and_sort(&spells, &SpellQuery::default(), SortMode::TimeAsc, &Favorites::default());
        let names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
        // reaction < 1 action < 1 minute
        assert_eq!(names, vec!["Shield", "Fireball", "Augury"]);
    }

    #[test]
    fn unrecognized_casting_time_sorts_last() {
        let mut late = spell("Wish", 9, "conjuration");
        late.casting_time = "a fortnight".into();
        let mut early = spell("Shield", 1, "abjuration");
        early.casting_time = "1 reaction".into();
        let out = filter_and_sort(
            &[late, early],
            &SpellQuery::default(),
            SortMode::TimeAsc,
            &Favorites::default(),
        );
        assert_eq!(out[0].name, "Shield");
        assert_eq!(out[1].name, "Wish");
    }

    #[test]
    fn sort_mode_parsing() {
        assert_eq!("level-desc".parse::<SortMode>(), Ok(SortMode::LevelDesc));
        assert!("fastest".parse::<SortMode>().is_err());
    }
}
