use cardbase_core::{ColorFilter, ThemeMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "cardbase",
    version,
    about,
    long_about = "Search the card catalog and manage your card collections"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile name
    #[arg(long, short, env = "CARDBASE_PROFILE", global = true)]
    pub profile: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Writes a profile with default settings
    Init,
    /// Searches the card catalog
    Search(SearchArgs),
    /// Lists catalog sets
    Sets(SetsArgs),
    /// Shows a single card and remembers it as recently viewed
    Card(CardArgs),
    /// Collection subcommands
    #[clap(subcommand)]
    Collection(CollectionCommand),
    /// Shows recent collection activity
    Activity(ListArgs),
    /// Shows recently viewed cards
    Recent(ListArgs),
    /// Shows or sets the theme preference
    Theme(ThemeArgs),
}

#[derive(Debug, Clone, Default, ValueEnum, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Args, PartialEq)]
pub struct SearchArgs {
    /// Free-text query
    pub term: Vec<String>,

    /// Color filter (w, u, b, r, g, multicolor, colorless, land)
    #[arg(long, short, value_parser = parse_color_filter)]
    pub color: Option<ColorFilter>,

    /// Set code filter
    #[arg(long, short)]
    pub set: Option<String>,

    /// Number of result pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct SetsArgs {
    /// Only sets whose name contains this text
    pub filter: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq)]
pub struct CardArgs {
    /// Catalog card id
    pub id: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, PartialEq, Default)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum CollectionCommand {
    /// Creates a new collection.
    Create {
        /// Collection name
        #[arg(trailing_var_arg = true, required = true)]
        name: Vec<String>,
    },
    /// Lists collections.
    List {
        /// Only favorite collections
        #[arg(long, short)]
        favorites: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },
    /// Shows a collection's cards and records the view.
    Show {
        id: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },
    /// Deletes a collection.
    Delete { id: String },
    /// Toggles the favorite flag.
    Favorite { id: String },
    /// Looks a card up in the catalog and adds it to a collection.
    Add {
        collection_id: String,
        card_id: String,
    },
    /// Removes a card from a collection.
    Remove {
        collection_id: String,
        card_id: String,
    },
}

#[derive(Debug, Args, PartialEq)]
pub struct ThemeArgs {
    /// New theme (auto, light, dark); prints the current one when omitted
    #[arg(value_parser = parse_theme)]
    pub mode: Option<ThemeMode>,
}

pub fn parse_color_filter(s: &str) -> anyhow::Result<ColorFilter> {
    s.parse().map_err(|e: cardbase_core::Error| {
        let suggestions: Vec<String> = ColorFilter::matching(s)
            .iter()
            .map(|c| c.to_string())
            .collect();

        if suggestions.is_empty() {
            anyhow::Error::from(e)
        } else {
            anyhow::anyhow!("{} (did you mean {}?)", e, suggestions.join(", "))
        }
    })
}

pub fn parse_theme(s: &str) -> anyhow::Result<ThemeMode> {
    Ok(s.parse()?)
}
