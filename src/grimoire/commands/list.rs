use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::model::Spell;
use crate::query::{filter_and_sort, SortMode, SpellQuery};

pub fn run(
    spells: &[Spell],
    query: &SpellQuery,
    sort: SortMode,
    favorites: &Favorites,
) -> Result<CmdResult> {
    let listed = filter_and_sort(spells, query, sort, favorites);
    let mut result = CmdResult::default();
    if listed.is_empty() && !spells.is_empty() {
        result.add_message(CmdMessage::info("No spells match the current filters."));
    }
    Ok(result.with_listed(listed))
}
