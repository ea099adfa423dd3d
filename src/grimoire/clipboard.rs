use crate::error::{GrimoireError, Result};
use crate::model::Spell;

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_through(&mut std::process::Command::new("pbcopy"), text)
    }

    #[cfg(target_os = "linux")]
    {
        copy_linux(text)
    }

    #[cfg(target_os = "windows")]
    {
        pipe_through(&mut std::process::Command::new("clip"), text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Err(GrimoireError::Api(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[cfg(target_os = "linux")]
fn copy_linux(text: &str) -> Result<()> {
    let mut xclip = std::process::Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    if pipe_through(&mut xclip, text).is_ok() {
        return Ok(());
    }
    let mut xsel = std::process::Command::new("xsel");
    xsel.args(["--clipboard", "--input"]);
    pipe_through(&mut xsel, text)
        .map_err(|e| GrimoireError::Api(format!("{}. Install xclip or xsel.", e)))
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_through(command: &mut std::process::Command, text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| GrimoireError::Api(format!("Failed to spawn clipboard command: {}", e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| GrimoireError::Api(format!("Failed to write to clipboard: {}", e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| GrimoireError::Api(format!("Failed to wait for clipboard command: {}", e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(GrimoireError::Api(
            "Clipboard command exited with error".to_string(),
        ))
    }
}

/// Formats the detail block the copy action puts on the clipboard:
/// name, level and school, the three timing fields, then the
/// synthesized description and the upcasting note when present.
pub fn format_spell_for_clipboard(spell: &Spell) -> String {
    let mut out = format!(
        "{}\n{} · {}\n{} · {} · {}\n\n{}\n",
        spell.name,
        spell.level_label(),
        spell.school_label(),
        spell.casting_time,
        spell.range,
        spell.duration,
        spell.description
    );
    if let Some(higher) = &spell.higher_levels {
        out.push('\n');
        out.push_str(higher);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Spell {
        Spell {
            id: "fireball".into(),
            name: "Fireball".into(),
            level: 3,
            school: "evocation".into(),
            casting_time: "1 action".into(),
            range: "150 feet".into(),
            duration: "Instantaneous".into(),
            description: "Level 3 · Evocation · 1 action · 150 feet · Instantaneous".into(),
            ..Spell::default()
        }
    }

    #[test]
    fn format_includes_header_and_description() {
        let text = format_spell_for_clipboard(&sample());
        assert!(text.starts_with("Fireball\nLevel 3 · Evocation\n"));
        assert!(text.contains("1 action · 150 feet · Instantaneous"));
        assert!(!text.contains("At higher levels"));
    }

    #[test]
    fn format_appends_higher_levels_when_present() {
        let mut spell = sample();
        spell.higher_levels = Some("At higher levels: +1d6 per slot.".into());
        let text = format_spell_for_clipboard(&spell);
        assert!(text.ends_with("At higher levels: +1d6 per slot.\n"));
    }
}
