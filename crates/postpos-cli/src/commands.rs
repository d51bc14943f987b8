use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use postpos_merge::{merge_in_place, MergeConfig, MergeSummary};
use postpos_sdk::{
    ContentItem, FileMetaStore, InMemoryCatalog, ItemId, PluginConfig, PostPosition,
    RequestContext, SaveOutcome,
};
use postpos_types::parse_pin_spec;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let json = matches!(cli.format, OutputFormat::Json);
    match &cli.command {
        Command::Merge(args) => cmd_merge(args, json),
        Command::Set(args) => cmd_set(&cli, args, json),
        Command::Get(args) => cmd_get(&cli, args, json),
        Command::Clear(args) => cmd_clear(&cli, args, json),
        Command::List(_) => cmd_list(&cli, json),
        Command::Render(args) => cmd_render(&cli, args, json),
        Command::Config(_) => cmd_config(&cli, json),
    }
}

fn open_plugin(cli: &Cli) -> anyhow::Result<PostPosition<FileMetaStore>> {
    let config = PluginConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let store = FileMetaStore::open(&cli.store)
        .with_context(|| format!("opening {}", cli.store.display()))?;
    Ok(PostPosition::new(config, store)?.with_host_page_size(cli.host_page_size))
}

fn parse_id(raw: &str) -> anyhow::Result<ItemId> {
    raw.parse::<ItemId>()
        .with_context(|| format!("'{raw}' is not an item id"))
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the merger over bare ids.
pub(crate) fn merge_ids(args: &MergeArgs) -> anyhow::Result<(Vec<ItemId>, MergeSummary)> {
    let mut list = args
        .base
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_id(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let pins = args
        .pins
        .iter()
        .map(|spec| parse_pin_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let config = if args.allow_doubles {
        MergeConfig::allow_doubles()
    } else {
        MergeConfig::default()
    };
    let summary = merge_in_place(&mut list, pins, config);
    Ok((list, summary))
}

fn cmd_merge(args: &MergeArgs, json: bool) -> anyhow::Result<()> {
    let (merged, summary) = merge_ids(args)?;
    if json {
        return print_json(&serde_json::json!({ "items": merged, "summary": summary }));
    }
    let rendered: Vec<String> = merged.iter().map(ItemId::to_string).collect();
    println!("{}", rendered.join(","));
    println!(
        "  {} inserted, {} skipped, {} duplicates removed",
        summary.inserted.to_string().green(),
        summary.skipped.to_string().yellow(),
        summary.removed_duplicates
    );
    Ok(())
}

fn cmd_set(cli: &Cli, args: &SetArgs, json: bool) -> anyhow::Result<()> {
    let plugin = open_plugin(cli)?;
    let item = ContentItem::new(parse_id(&args.id)?).with_content_type(&args.content_type);
    let form = HashMap::from([(plugin.config().meta_field_name.clone(), args.value.clone())]);
    let outcome = plugin.save_submission(&item, &form)?;
    if json {
        let value = match outcome {
            SaveOutcome::Stored(p) => serde_json::json!({ "id": item.id, "stored": p }),
            SaveOutcome::Skipped(reason) => {
                serde_json::json!({ "id": item.id, "skipped": format!("{reason:?}") })
            }
        };
        return print_json(&value);
    }
    match outcome {
        SaveOutcome::Stored(p) => println!("{} Item {} pinned to {}", "✓".green().bold(), item.id, p.to_string().bold()),
        SaveOutcome::Skipped(reason) => println!("{} Item {} unchanged ({reason:?})", "-".yellow(), item.id),
    }
    Ok(())
}

fn cmd_get(cli: &Cli, args: &ItemArgs, json: bool) -> anyhow::Result<()> {
    let plugin = open_plugin(cli)?;
    let id = parse_id(&args.id)?;
    let position = plugin.position_of(id)?;
    if json {
        return print_json(&serde_json::json!({ "id": id, "position": position }));
    }
    if position.is_pinned() {
        println!("{} = {}", id.to_string().bold(), position.to_string().green());
    } else {
        println!("{} = {}", id.to_string().bold(), "(not pinned)".dimmed());
    }
    Ok(())
}

fn cmd_clear(cli: &Cli, args: &ItemArgs, json: bool) -> anyhow::Result<()> {
    let plugin = open_plugin(cli)?;
    let id = parse_id(&args.id)?;
    let removed = plugin.clear_position(id)?;
    if json {
        return print_json(&serde_json::json!({ "id": id, "removed": removed }));
    }
    if removed {
        println!("Cleared position of {}", id.to_string().bold());
    } else {
        println!("Item {} had no position", id.to_string().bold());
    }
    Ok(())
}

fn cmd_list(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let plugin = open_plugin(cli)?;
    let positions = plugin.positions()?;
    if json {
        let entries: Vec<_> = positions
            .iter()
            .map(|(id, p)| serde_json::json!({ "id": id, "position": p }))
            .collect();
        return print_json(&serde_json::Value::Array(entries));
    }
    if positions.is_empty() {
        println!("No positions stored.");
    }
    for (id, position) in positions {
        println!("  {:>8}  {}", id.to_string().bold(), position);
    }
    Ok(())
}

pub(crate) fn load_catalog(path: &Path) -> anyhow::Result<InMemoryCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(InMemoryCatalog::from_json(&raw)?)
}

pub(crate) fn request_context(args: &RenderArgs) -> RequestContext {
    RequestContext {
        front_page: args.front_page,
        home: args.home,
        archive: args.archive,
        search: args.search,
        singular: args.singular,
        page: args.page,
        flags: args.flags.clone(),
    }
}

fn cmd_render(cli: &Cli, args: &RenderArgs, json: bool) -> anyhow::Result<()> {
    let plugin = open_plugin(cli)?;
    let catalog = load_catalog(&args.catalog)?;
    let context = request_context(args);
    let applies = plugin.gate_outcome(&context).applies();
    let listing = plugin.listing(&context, &catalog);

    if json {
        return print_json(&serde_json::json!({ "reordered": applies, "items": listing }));
    }
    if !applies {
        println!("{}", "Conditions not met; default order.".dimmed());
    }
    for (slot, item) in listing.iter().enumerate() {
        let pinned = plugin.position_of(item.id)?;
        let marker = if applies && pinned.is_pinned() { "*".green() } else { " ".normal() };
        println!("{:>3}. {} {:>6}  {}", slot + 1, marker, item.id.to_string().yellow(), item.title);
    }
    Ok(())
}

fn cmd_config(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let config = PluginConfig::load(&cli.config)?;
    if json {
        return print_json(&serde_json::to_value(&config)?);
    }
    print!("{}", config.to_toml_string()?);
    if config.page_size.is_none() {
        println!("# page_size follows host: {}", config.effective_page_size(cli.host_page_size));
    }
    Ok(())
}
