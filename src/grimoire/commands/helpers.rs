use crate::error::{GrimoireError, Result};
use crate::model::{slugify, Spell};

/// Resolves a user-supplied selector to one spell: exact id match
/// first (the selector is slugified, so `"Cure Wounds"` and
/// `cure-wounds` are equivalent), then a case-insensitive name
/// substring that must be unambiguous.
pub fn find_spell<'a>(spells: &'a [Spell], selector: &str) -> Result<&'a Spell> {
    let slug = slugify(selector);
    if let Some(spell) = spells.iter().find(|s| s.id == slug) {
        return Ok(spell);
    }

    let needle = selector.to_lowercase();
    let matches: Vec<&Spell> = spells
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one),
        [] => Err(GrimoireError::SpellNotFound(selector.to_string())),
        many => Err(GrimoireError::Api(format!(
            "Selector \"{}\" is ambiguous ({} matches)",
            selector,
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spells() -> Vec<Spell> {
        ["Fireball", "Fire Shield", "Shield"]
            .into_iter()
            .map(|name| Spell {
                id: slugify(name),
                name: name.to_string(),
                ..Spell::default()
            })
            .collect()
    }

    #[test]
    fn resolves_by_slug() {
        let all = spells();
        assert_eq!(find_spell(&all, "fire-shield").unwrap().name, "Fire Shield");
        assert_eq!(find_spell(&all, "Fire Shield").unwrap().name, "Fire Shield");
    }

    #[test]
    fn unique_substring_resolves() {
        let all = spells();
        assert_eq!(find_spell(&all, "ball").unwrap().name, "Fireball");
    }

    #[test]
    fn ambiguous_substring_is_an_error() {
        let all = spells();
        assert!(matches!(
            find_spell(&all, "fire"),
            Err(GrimoireError::Api(_))
        ));
    }

    #[test]
    fn unknown_selector_is_not_found() {
        let all = spells();
        assert!(matches!(
            find_spell(&all, "wish"),
            Err(GrimoireError::SpellNotFound(_))
        ));
    }
}
