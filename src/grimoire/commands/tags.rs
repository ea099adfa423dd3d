use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Spell;
use std::collections::BTreeMap;

/// Distinct tag labels with occurrence counts, most common first,
/// ties alphabetical.
pub fn run(spells: &[Spell]) -> Result<CmdResult> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for spell in spells {
        for tag in &spell.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut tag_counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    tag_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(CmdResult::default().with_tag_counts(tag_counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_tags() {
        let spells: Vec<Spell> = [
            ("Fireball", vec!["offense"]),
            ("Ice Storm", vec!["offense", "control"]),
            ("Shield", vec!["defense"]),
        ]
        .into_iter()
        .map(|(name, tags)| Spell {
            id: crate::model::slugify(name),
            name: name.to_string(),
            tags: tags.into_iter().map(String::from).collect(),
            ..Spell::default()
        })
        .collect();

        let result = run(&spells).unwrap();
        assert_eq!(
            result.tag_counts,
            vec![
                ("offense".to_string(), 2),
                ("control".to_string(), 1),
                ("defense".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_collection_has_no_tags() {
        assert!(run(&[]).unwrap().tag_counts.is_empty());
    }
}
