//! Terminal presentation surface.
//!
//! Renders cards, detail views and filter menus as plain text, and runs the
//! interactive browsing loop. Rendering is pure; the loop reads commands
//! from any async line source and writes to any `Write`, so it can be
//! driven by scripted input in tests.

use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use spelltome_domain::{
    CatalogSnapshot, CriteriaChange, FilterCriteria, MagicSchool, Selection, Spell, SpellLevel,
    SpellcastingClass,
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::cli::{parse_class, parse_level};
use crate::use_cases::{BrowseHandle, CatalogLoad, FilterView, LoadCatalog};

/// Shown instead of a result list when nothing matches.
pub const NO_RESULTS: &str = "No spells found matching your criteria";

/// Shown when a reload failed and the loaded catalog stays in place.
pub const KEEPING_CATALOG: &str = "Reload failed, keeping the current catalog";

pub const HELP: &str = "\
Commands:
  search <text>       Filter by name or summary (empty clears)
  level <0-9|all>     Filter by spell level (0 = cantrip)
  school <name|all>   Filter by school of magic
  class <id|all>      Filter by class, e.g. wizard
  reset               Clear every filter
  list                Show the current results
  show <id>           Show one spell in full
  classes             Show the filter menus
  reload              Fetch the catalog again
  help                Show this help
  quit                Leave";

// =============================================================================
// Rendering
// =============================================================================

/// One result-list line: badge, name, school, casting time, duration, range.
pub fn render_card(spell: &Spell) -> String {
    format!(
        "[{}] {:<28} {:<13} {} | {} | {}",
        spell.level.badge(),
        spell.name,
        spell.school.display_name(),
        spell.casting_time,
        spell.duration,
        spell.range
    )
}

/// The result list for a filtered view, with a count line.
pub fn render_results<'a>(spells: impl IntoIterator<Item = &'a Spell>, total: usize) -> String {
    let mut out = String::new();
    let mut shown = 0;
    for spell in spells {
        out.push_str(&render_card(spell));
        out.push('\n');
        shown += 1;
    }

    if shown == 0 {
        out.push_str(NO_RESULTS);
        out.push('\n');
    } else {
        let _ = writeln!(out, "{shown} of {total} spells");
    }
    out
}

/// Full spell detail.
pub fn render_detail(spell: &Spell) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", spell.name);
    let _ = writeln!(out, "{} {}", spell.level.label(), spell.school.display_name());
    let _ = writeln!(out, "Casting Time: {}", spell.casting_time);
    let _ = writeln!(out, "Range: {}", spell.range);
    let _ = writeln!(out, "Duration: {}", spell.duration);

    if !spell.components.is_empty() {
        let names: Vec<&str> = spell.components.iter().map(|c| c.name()).collect();
        match &spell.material {
            Some(material) => {
                let _ = writeln!(out, "Components: {} ({material})", names.join(", "));
            }
            None => {
                let _ = writeln!(out, "Components: {}", names.join(", "));
            }
        }
    }
    if spell.ritual {
        let _ = writeln!(out, "Ritual: yes");
    }
    if spell.concentration {
        let _ = writeln!(out, "Concentration: yes");
    }
    if !spell.classes.is_empty() {
        let _ = writeln!(out, "Classes: {}", spell.classes.join(", "));
    }

    if !spell.description.is_empty() {
        out.push_str("\nDescription:\n");
        for paragraph in &spell.description {
            let _ = writeln!(out, "{paragraph}");
        }
    }
    if let Some(higher_level) = &spell.higher_level {
        out.push_str("\nAt Higher Levels:\n");
        for paragraph in higher_level {
            let _ = writeln!(out, "{paragraph}");
        }
    }
    out
}

/// The class, level and school menus.
pub fn render_menus(classes: &[SpellcastingClass]) -> String {
    let class_options: Vec<String> = std::iter::once("All Classes [all]".to_string())
        .chain(
            classes
                .iter()
                .map(|class| format!("{} [{}]", class.display_name(), class.index())),
        )
        .collect();
    let level_options: Vec<String> = std::iter::once("All Levels [all]".to_string())
        .chain(
            SpellLevel::all().map(|level| format!("{} [{}]", level.label(), level.value())),
        )
        .collect();
    let school_options: Vec<String> = std::iter::once("All Schools".to_string())
        .chain(MagicSchool::KNOWN.iter().map(|school| school.name().to_string()))
        .collect();

    format!(
        "Classes: {}\nLevels: {}\nSchools: {}\n",
        class_options.join(", "),
        level_options.join(", "),
        school_options.join(", ")
    )
}

fn render_view(view: &FilterView) -> String {
    let mut out = String::new();
    if !view.criteria.is_unfiltered() {
        let _ = writeln!(out, "Filters: {}", view.criteria);
    }
    out.push_str(&render_results(view.spells(), view.catalog().len()));
    out
}

fn render_load_problems(load: &CatalogLoad) -> String {
    let mut out = String::new();
    for error in &load.errors {
        let _ = writeln!(out, "Warning: {error}");
    }
    if !load.failures.is_empty() {
        let skipped: Vec<&str> = load.failures.iter().map(|f| f.index.as_str()).collect();
        let _ = writeln!(out, "Warning: skipped {}", skipped.join(", "));
    }
    out
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for commands.")]
    Unknown(String),
    #[error("'{command}' needs an argument: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Change(CriteriaChange),
    Show(String),
    List,
    Classes,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" => Command::Change(CriteriaChange::Search(rest.to_string())),
            "level" => Command::Change(CriteriaChange::Level(
                parse_level(required(rest, "level", "level <0-9|all>")?)
                    .map_err(CommandError::InvalidArgument)?,
            )),
            "school" => Command::Change(CriteriaChange::School(
                required(rest, "school", "school <name|all>")?
                    .parse::<Selection<String>>()
                    .map_err(|e| CommandError::InvalidArgument(e.to_string()))?,
            )),
            "class" => Command::Change(CriteriaChange::Class(
                parse_class(required(rest, "class", "class <id|all>")?)
                    .map_err(CommandError::InvalidArgument)?,
            )),
            "reset" => Command::Change(CriteriaChange::Reset),
            "show" => Command::Show(required(rest, "show", "show <id>")?.to_string()),
            "list" => Command::List,
            "classes" | "menus" => Command::Classes,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, usage })
    } else {
        Ok(rest)
    }
}

// =============================================================================
// Interactive Session
// =============================================================================

/// Interactive browsing loop over one browse session.
pub struct TerminalSession {
    browse: BrowseHandle,
    loader: Arc<LoadCatalog>,
}

impl TerminalSession {
    pub fn new(
        catalog: Arc<CatalogSnapshot>,
        criteria: FilterCriteria,
        loader: Arc<LoadCatalog>,
    ) -> Self {
        Self {
            browse: BrowseHandle::spawn_with(catalog, criteria),
            loader,
        }
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(self, input: R, output: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let current = self.browse.current();
        write!(output, "{}", render_menus(current.catalog().classes()))?;
        write!(output, "{}", render_view(&current))?;
        writeln!(output, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };

            match command {
                Command::Change(change) => {
                    let view = self.browse.apply(change).await?;
                    write!(output, "{}", render_view(&view))?;
                }
                Command::Show(id) => {
                    let view = self.browse.current();
                    match view.catalog().spell(&id) {
                        Some(spell) => write!(output, "{}", render_detail(spell))?,
                        None => writeln!(output, "No spell with identifier '{id}'")?,
                    }
                }
                Command::List => write!(output, "{}", render_view(&self.browse.current()))?,
                Command::Classes => {
                    let view = self.browse.current();
                    write!(output, "{}", render_menus(view.catalog().classes()))?;
                }
                Command::Reload => {
                    writeln!(output, "Reloading catalog...")?;
                    let load = self.loader.load_or_empty().await;
                    write!(output, "{}", render_load_problems(&load))?;
                    // A failed batch would leave an empty or class-less catalog.
                    let view = if load.errors.is_empty() {
                        self.browse
                            .replace_catalog(Arc::new(load.snapshot))
                            .await?
                    } else {
                        writeln!(output, "{KEEPING_CATALOG}")?;
                        self.browse.current()
                    };
                    write!(output, "{}", render_view(&view))?;
                }
                Command::Help => writeln!(output, "{HELP}")?,
                Command::Quit => break,
            }
        }

        self.browse.shutdown().await;
        Ok(())
    }
}

/// Print problems from the initial load to `output`.
pub fn report_load(load: &CatalogLoad, output: &mut impl Write) -> std::io::Result<()> {
    write!(output, "{}", render_load_problems(load))
}
