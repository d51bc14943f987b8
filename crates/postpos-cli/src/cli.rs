use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "postpos",
    about = "Post Position - pin content items to fixed slots of the front page",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Plugin configuration (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "postpos.toml")]
    pub config: PathBuf,

    /// Position store (JSON). Created on first write.
    #[arg(long, global = true, default_value = "postpos-positions.json")]
    pub store: PathBuf,

    /// Host page size used when the config leaves `page_size` unset.
    #[arg(long, global = true, default_value_t = 10)]
    pub host_page_size: usize,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Splice pinned ids into a list of ids
    Merge(MergeArgs),
    /// Submit a position for an item, as the edit form would
    Set(SetArgs),
    /// Show an item's stored position
    Get(ItemArgs),
    /// Remove an item's stored position
    Clear(ItemArgs),
    /// List all stored positions
    List(ListArgs),
    /// Render a request's listing from a catalog file
    Render(RenderArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Base listing as comma-separated ids
    #[arg(long, value_delimiter = ',')]
    pub base: Vec<String>,
    /// Pinned id as <id>:<position>; repeatable, applied in order
    #[arg(long = "pin")]
    pub pins: Vec<String>,
    /// Keep a pinned item's natural occurrence
    #[arg(long)]
    pub allow_doubles: bool,
}

#[derive(Args)]
pub struct SetArgs {
    pub id: String,
    /// Submitted value; non-numeric values are ignored
    #[arg(allow_hyphen_values = true)]
    pub value: String,
    #[arg(long, default_value = "post")]
    pub content_type: String,
}

#[derive(Args)]
pub struct ItemArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct RenderArgs {
    /// JSON array of content items in default display order
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub front_page: bool,
    #[arg(long)]
    pub home: bool,
    #[arg(long)]
    pub archive: bool,
    #[arg(long)]
    pub search: bool,
    #[arg(long)]
    pub singular: bool,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Host-defined request marker; repeatable
    #[arg(long = "flag")]
    pub flags: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {}
