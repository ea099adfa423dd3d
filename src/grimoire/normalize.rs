//! Raw upstream record → [`Spell`] derivation pipeline.
//!
//! The normalizer is total: any missing or malformed field degrades to a
//! safe default instead of erroring, so one bad record can never abort a
//! whole load. The keyword tables below are deliberately fuzzy text
//! heuristics, not a parser; their trigger words are part of the data
//! contract and must not be "improved".

use crate::model::{level_label, school_label, slugify, Components, Spell};
use serde_json::Value;

pub const SOURCE_LABEL: &str = "SRD 5.1";
pub const HIGHER_LEVELS_LABEL: &str = "At higher levels: ";

/// Localized spelling accepted by the ritual heuristic alongside the
/// plain word "ritual".
const RITUAL_VARIANT: &str = "ритуал";

/// Coarse mechanical-effect classifiers, scanned over the lowercased
/// rules text. Emission order is fixed for deterministic display even
/// though effects are conceptually a set.
const EFFECT_TABLE: &[(&str, &[&str])] = &[
    ("damage", &["damage", "1d", "2d", "3d", "4d", "5d"]),
    ("ac_up", &["armor class", " ac ", "shield", "cover"]),
    ("heal", &["heal", "hit points", "regain"]),
    (
        "control",
        &[
            "paraly", "restrain", "stun", "blind", "deafen", "charm", "frighten", "banish", "hold",
        ],
    ),
    (
        "movement",
        &["teleport", "fly", "misty", "dimension door", "move"],
    ),
    ("scout", &["detect", "identify", "see", "scry"]),
    (
        "utility",
        &["invisible", "light", "clean", "message", "mend", "shape water"],
    ),
];

/// Display-oriented cues appended to the synthesized summary line.
const HINT_TABLE: &[(&str, &[&str])] = &[
    ("damage", &["damage", "1d", "2d", "3d", "4d", "5d"]),
    ("healing", &["heal", "hit points", "regain"]),
    (
        "control",
        &["charm", "frighten", "paraly", "restrain", "stun", "hold", "sleep"],
    ),
    ("movement", &["teleport", "fly", "misty", "door", "dimension"]),
    ("scouting", &["detect", "identify", "see", "scry"]),
];

/// Thematic category labels, each triggered by a coarse effect or by a
/// keyword hit in the combined name+description+higher-levels text.
const TAG_TABLE: &[(&str, &str, &[&str])] = &[
    ("offense", "damage", &["damage"]),
    ("defense", "ac_up", &["shield", "resist", "cover", "armor"]),
    (
        "social",
        "",
        &[
            "charm", "persua", "truth", "emotion", "suggestion", "language", "understand",
        ],
    ),
    (
        "control",
        "control",
        &["paraly", "hold", "blind", "deafen", "restrain", "fear", "frighten"],
    ),
    ("healing", "heal", &["heal", "cure"]),
    (
        "scouting",
        "scout",
        &["detect", "scry", "clairvoy", "identif"],
    ),
    ("movement", "movement", &["teleport", "jump", "fly", "misty"]),
    (
        "utility",
        "utility",
        &["mend", "light", "clean", "message", "invisib"],
    ),
];

/// Converts one provider-native record into exactly one [`Spell`].
/// Never fails.
pub fn normalize(raw: &Value) -> Spell {
    let name = text(raw, "name");
    let desc = text(raw, "desc");
    let desc_lower = desc.to_lowercase();
    let higher = text(raw, "higher_level");
    let duration = text(raw, "duration");

    let level = parse_level(raw);
    let school = text(raw, "school").to_lowercase();
    let casting_time = text(raw, "casting_time");
    let range = text(raw, "range");
    let components = parse_components(&text(raw, "components"));

    let concentration = flag_or_keyword(raw.get("concentration"), "concentration")
        || duration.to_lowercase().contains("concentration");
    let ritual = flag_or_keyword(raw.get("ritual"), "ritual")
        || field_string(raw.get("ritual")).to_lowercase().contains(RITUAL_VARIANT);

    let higher_levels = match higher.trim() {
        "" => None,
        rest => Some(format!("{}{}", HIGHER_LEVELS_LABEL, rest)),
    };

    let effects = derive_effects(&desc_lower);
    let description = synthesize_summary(
        level,
        &school,
        &casting_time,
        &range,
        &duration,
        &format!("{} {} {}", desc_lower, name.to_lowercase(), higher.to_lowercase()),
    );

    let mut spell = Spell {
        id: slugify(&name),
        name,
        level,
        school,
        classes: parse_classes(raw),
        casting_time,
        range,
        components,
        duration,
        concentration,
        ritual,
        damage: None,
        save: None,
        description,
        higher_levels,
        source: SOURCE_LABEL.to_string(),
        tags: Vec::new(),
        notes: String::new(),
        effects,
    };
    retag(&mut spell);
    spell
}

/// Re-derives thematic tags and unions them with whatever tags the
/// record already carries. Idempotent: a second pass adds nothing.
pub fn retag(spell: &mut Spell) {
    let mut text = spell.search_blob();
    text.push(' ');
    // Word-boundary padding for the " ac " pattern at line edges.
    text.insert(0, ' ');

    let mut tags: Vec<String> = Vec::with_capacity(spell.tags.len() + TAG_TABLE.len());
    for seed in &spell.tags {
        if !tags.contains(seed) {
            tags.push(seed.clone());
        }
    }

    for (label, effect, keywords) in TAG_TABLE {
        let by_effect = !effect.is_empty() && spell.effects.iter().any(|e| e == effect);
        let by_damage_field = *label == "offense" && spell.damage.is_some();
        let by_ritual = *label == "utility" && spell.ritual;
        let by_keyword = keywords.iter().any(|k| text.contains(k));
        if (by_effect || by_damage_field || by_ritual || by_keyword)
            && !tags.iter().any(|t| t == label)
        {
            tags.push(label.to_string());
        }
    }
    spell.tags = tags;
}

/// Scans the lowercased rules text for the fixed effect keyword sets.
pub fn derive_effects(desc_lower: &str) -> Vec<String> {
    let padded = format!(" {} ", desc_lower);
    EFFECT_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| padded.contains(k)))
        .map(|(effect, _)| effect.to_string())
        .collect()
}

/// `<level-label> · <school-label> · <time> · <range> · <duration>`,
/// plus a lossy `hint:` segment when display cues are detected. Not a
/// rules-accurate transcript.
fn synthesize_summary(
    level: u8,
    school: &str,
    time: &str,
    range: &str,
    duration: &str,
    hint_text: &str,
) -> String {
    let mut line = format!(
        "{} · {} · {} · {} · {}",
        level_label(level),
        school_label(school),
        time,
        range,
        duration
    );
    let hints: Vec<&str> = HINT_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| hint_text.contains(k)))
        .map(|(hint, _)| *hint)
        .collect();
    if !hints.is_empty() {
        line.push_str(" · hint: ");
        line.push_str(&hints.join(", "));
    }
    line
}

/// Explicit integer field first, else the first decimal digit of the
/// textual level, else 0. Always lands in 0..=9.
fn parse_level(raw: &Value) -> u8 {
    if let Some(n) = raw.get("level_int").and_then(Value::as_u64) {
        return n.min(9) as u8;
    }
    field_string(raw.get("level"))
        .chars()
        .find(|c| c.is_ascii_digit())
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0) as u8
}

/// Case-insensitive scan for the literal letters V, S, M as three
/// independent flags.
fn parse_components(s: &str) -> Components {
    let upper = s.to_uppercase();
    Components {
        v: upper.contains('V'),
        s: upper.contains('S'),
        m: upper.contains('M'),
    }
}

fn parse_classes(raw: &Value) -> Vec<String> {
    let field = raw.get("dnd_class").or_else(|| raw.get("classes"));
    match field {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect(),
        Some(value) => field_string(Some(value))
            .to_lowercase()
            .replace(char::is_whitespace, "")
            .split(',')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// True when the field is an explicit boolean `true` or a string
/// containing the given word (case-insensitive).
fn flag_or_keyword(field: Option<&Value>, word: &str) -> bool {
    match field {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.to_lowercase().contains(word),
        _ => false,
    }
}

fn text(raw: &Value, key: &str) -> String {
    field_string(raw.get(key))
}

fn field_string(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
