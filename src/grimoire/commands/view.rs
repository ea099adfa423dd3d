use crate::commands::{helpers::find_spell, CmdResult};
use crate::error::Result;
use crate::model::Spell;

pub fn run<S: AsRef<str>>(spells: &[Spell], selectors: &[S]) -> Result<CmdResult> {
    let mut listed = Vec::with_capacity(selectors.len());
    for selector in selectors {
        listed.push(find_spell(spells, selector.as_ref())?.clone());
    }
    Ok(CmdResult::default().with_listed(listed))
}
