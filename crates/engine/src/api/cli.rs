//! Command-line arguments.

use clap::Parser;
use spelltome_domain::{FilterCriteria, Selection, SpellLevel};

#[derive(Debug, Parser)]
#[command(name = "spelltome")]
#[command(about = "Browse the D&D 5e spell catalog")]
#[command(version)]
#[command(
    after_help = "Environment:\n  SPELLTOME_API_URL               Spell data source base URL\n  SPELLTOME_REQUEST_TIMEOUT_SECS  Per-request timeout, 0 to disable\n  SPELLTOME_PARTIAL_RESULTS       Keep spells that loaded when others fail\n  RUST_LOG                        Log filter (logs go to stderr)"
)]
pub struct Cli {
    /// Case-insensitive text matched against name and first description paragraph
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
    /// Spell level 0-9 (0 = cantrip), or "all"
    #[arg(long, short = 'l', default_value = "all", value_parser = parse_level)]
    pub level: Selection<u8>,
    /// School name, or "all"
    #[arg(long, default_value = "all")]
    pub school: Selection<String>,
    /// Class identifier such as "wizard", or "all"
    #[arg(long = "class", short = 'c', default_value = "all", value_parser = parse_class)]
    pub class_id: Selection<String>,
    /// Show the detail view of one spell by identifier
    #[arg(long)]
    pub show: Option<String>,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Start an interactive browsing session
    #[arg(long, short = 'i', default_value_t = false)]
    pub interactive: bool,
    /// Keep the spells that loaded when some detail requests fail
    #[arg(long, default_value_t = false)]
    pub partial: bool,
    /// Override the spell data source base URL
    #[arg(long)]
    pub api_url: Option<String>,
}

impl Cli {
    /// Filter criteria from the filter flags.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.clone(),
            level: self.level.clone(),
            school: self.school.clone(),
            class_id: self.class_id.clone(),
        }
    }
}

/// Parse a level selection, rejecting levels above 9.
pub(crate) fn parse_level(value: &str) -> Result<Selection<u8>, String> {
    let selection = value
        .parse::<Selection<u8>>()
        .map_err(|e| e.to_string())?;
    if let Selection::Only(level) = &selection {
        SpellLevel::new(*level).map_err(|e| e.to_string())?;
    }
    Ok(selection)
}

/// Parse a class selection. Class ids are lower-case API identifiers.
pub(crate) fn parse_class(value: &str) -> Result<Selection<String>, String> {
    let selection = value
        .parse::<Selection<String>>()
        .map_err(|e| e.to_string())?;
    Ok(match selection {
        Selection::Only(id) => Selection::Only(id.to_ascii_lowercase()),
        Selection::All => Selection::All,
    })
}
