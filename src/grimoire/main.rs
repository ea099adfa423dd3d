use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use grimoire::api::{CmdMessage, ConfigAction, GrimoireApi, MessageLevel};
use grimoire::cache::{AssetFetcher, CachedSource, HttpFetcher};
use grimoire::clipboard::{copy_to_clipboard, format_spell_for_clipboard};
use grimoire::config::GrimoireConfig;
use grimoire::error::{GrimoireError, Result};
use grimoire::favorites::Favorites;
use grimoire::loader::HttpSource;
use grimoire::model::Spell;
use grimoire::query::{SortMode, SpellQuery};
use grimoire::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{CacheCommands, Cli, Commands};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: GrimoireApi<FileStore>,
    offline: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            level,
            school,
            class,
            tag,
            concentration,
            ritual,
            favorites,
            verbal,
            somatic,
            material,
            sort,
        }) => {
            let query = SpellQuery {
                text: search,
                levels: level,
                schools: school,
                classes: class,
                tags: tag,
                concentration_only: concentration,
                ritual_only: ritual,
                favorites_only: favorites,
                verbal,
                somatic,
                material,
            };
            handle_list(&mut ctx, query, sort)
        }
        Some(Commands::View { spells }) => handle_view(&mut ctx, spells),
        Some(Commands::Copy { spell }) => handle_copy(&mut ctx, spell),
        Some(Commands::Fav { spells }) => handle_fav(&mut ctx, spells),
        Some(Commands::Preset { name, sort }) => handle_preset(&mut ctx, name, sort),
        Some(Commands::Tags) => handle_tags(&mut ctx),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Export { path }) => handle_export(&mut ctx, path),
        Some(Commands::Refresh) => handle_refresh(&mut ctx),
        Some(Commands::Cache { action }) => handle_cache(&ctx, action),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&mut ctx, SpellQuery::default(), SortMode::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "grimoire", "grimoire")
            .ok_or_else(|| GrimoireError::Api("Could not determine data directory".into()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = GrimoireConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.clone());
    let api = GrimoireApi::new(store, config, &data_dir);

    Ok(AppContext {
        api,
        offline: cli.offline,
    })
}

/// Network seam for the cache layer. Offline mode fails every network
/// attempt so only the snapshot and the cache can answer.
enum Fetcher {
    Http(HttpFetcher),
    Offline,
}

impl AssetFetcher for Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        match self {
            Fetcher::Http(f) => f.fetch(url),
            Fetcher::Offline => Err(GrimoireError::Cache(format!(
                "offline mode, not fetching {}",
                url
            ))),
        }
    }
}

fn fetcher_for(ctx: &AppContext) -> Fetcher {
    if ctx.offline {
        Fetcher::Offline
    } else {
        Fetcher::Http(HttpFetcher::new())
    }
}

/// Populates the session collection: snapshot fast path, then remote
/// pagination. Interception through the offline cache starts once a
/// generation is installed; until then requests go straight to the
/// network.
fn load_collection(ctx: &mut AppContext) -> Result<()> {
    let cache = ctx.api.cache();
    if ctx.offline || !cache.entries().is_empty() {
        let fetcher = fetcher_for(ctx);
        let source = CachedSource::new(&cache, &fetcher);
        ctx.api.load(&source)
    } else {
        ctx.api.load(&HttpSource::new())
    }
}

fn handle_list(ctx: &mut AppContext, query: SpellQuery, sort: SortMode) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.list(&query, sort)?;
    print_spells(&result.listed, ctx.api.favorites());
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, spells: Vec<String>) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.view(&spells)?;
    print_full_spells(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, spell: String) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.view(&[spell])?;
    for spell in &result.listed {
        let text = format_spell_for_clipboard(spell);
        match copy_to_clipboard(&text) {
            Ok(()) => println!("{}", format!("Copied {} to clipboard.", spell.name).green()),
            Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
        }
    }
    Ok(())
}

fn handle_fav(ctx: &mut AppContext, spells: Vec<String>) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.toggle_favorites(&spells)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_preset(ctx: &mut AppContext, name: String, sort: SortMode) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.preset(&name, sort)?;
    print_messages(&result.messages);
    print_spells(&result.listed, ctx.api.favorites());
    Ok(())
}

fn handle_tags(ctx: &mut AppContext) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.tags()?;
    if result.tag_counts.is_empty() {
        println!("No tags.");
    }
    for (tag, count) in &result.tag_counts {
        println!("{:>4}  {}", count, tag);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.import(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, path: Option<PathBuf>) -> Result<()> {
    load_collection(ctx)?;
    let result = ctx.api.export(path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_refresh(ctx: &mut AppContext) -> Result<()> {
    // Refresh bypasses the snapshot and the cache alike.
    if ctx.offline {
        return Err(GrimoireError::Api(
            "Refresh needs the network; remove --offline".into(),
        ));
    }
    let result = ctx.api.refresh(&HttpSource::new())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cache(ctx: &AppContext, action: CacheCommands) -> Result<()> {
    let result = match action {
        CacheCommands::Install => {
            let fetcher = fetcher_for(ctx);
            ctx.api.cache_install(&fetcher)?
        }
        CacheCommands::Activate => ctx.api.cache_activate()?,
        CacheCommands::Status => ctx.api.cache_status()?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::Show,
        (Some(k), None) => ConfigAction::Get(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::Show);

    let result = ctx.api.configure(action)?;
    if show_all {
        if let Some(config) = &result.config {
            println!("source-url = {}", config.source_url);
            println!("cache-name = {}", config.cache_name);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const SCHOOL_WIDTH: usize = 14;
const TIME_WIDTH: usize = 12;
const NOTATION_WIDTH: usize = 6;
const FAV_MARKER: &str = "★";

fn print_spells(spells: &[Spell], favorites: &Favorites) {
    if spells.is_empty() {
        return;
    }

    for spell in spells {
        let marker = if favorites.is_favorite(&spell.id) {
            format!("{} ", FAV_MARKER).yellow()
        } else {
            "  ".normal()
        };

        let level = if spell.level == 0 {
            "C".to_string()
        } else {
            spell.level.to_string()
        };

        let mut flags = String::new();
        if spell.concentration {
            flags.push('C');
        }
        if spell.ritual {
            flags.push('R');
        }

        let fixed = 2 + 3 + SCHOOL_WIDTH + TIME_WIDTH + NOTATION_WIDTH + 3;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&spell.name, available);
        let padding = available.saturating_sub(name.width());

        println!(
            "{}{:>2} {}{} {:<school$} {:<time$} {:<notation$} {}",
            marker,
            level,
            name.bold(),
            " ".repeat(padding),
            truncate_to_width(spell.school_label(), SCHOOL_WIDTH),
            truncate_to_width(&spell.casting_time, TIME_WIDTH),
            spell.components.notation(),
            flags.dimmed(),
            school = SCHOOL_WIDTH,
            time = TIME_WIDTH,
            notation = NOTATION_WIDTH,
        );
    }
}

fn print_full_spells(spells: &[Spell]) {
    for (i, spell) in spells.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{}  {}", spell.name.bold(), spell.id.dimmed());
        println!("{} · {}", spell.level_label(), spell.school_label());
        println!(
            "{} · {} · {}",
            spell.casting_time, spell.range, spell.duration
        );
        if !spell.components.notation().is_empty() {
            println!("Components: {}", spell.components.notation());
        }
        if !spell.classes.is_empty() {
            println!("Classes: {}", spell.classes.join(", "));
        }
        if spell.concentration {
            println!("{}", "Concentration".yellow());
        }
        if spell.ritual {
            println!("{}", "Ritual".yellow());
        }
        println!("--------------------------------");
        println!("{}", spell.description);
        if let Some(higher) = &spell.higher_levels {
            println!("{}", higher);
        }
        if !spell.tags.is_empty() {
            println!("Tags: {}", spell.tags.join(", ").dimmed());
        }
        if !spell.source.is_empty() {
            println!("Source: {}", spell.source.dimmed());
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
