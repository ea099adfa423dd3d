use crate::commands::{helpers::find_spell, CmdMessage, CmdResult};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::model::Spell;
use crate::store::DataStore;

/// Flips favorite membership for each selected spell, persisting the
/// full set after every toggle.
pub fn toggle<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    spells: &[Spell],
    favorites: &mut Favorites,
    selectors: &[I],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for selector in selectors {
        let spell = find_spell(spells, selector.as_ref())?.clone();
        let now_member = favorites.toggle(store, &spell.id)?;
        let verb = if now_member {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        result.add_message(CmdMessage::success(format!(
            "{} ({}): {}",
            verb, spell.id, spell.name
        )));
        result.affected.push(spell);
    }
    Ok(result)
}
