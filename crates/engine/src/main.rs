//! Spelltome - Main entry point.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use spelltome_engine::api::terminal::{self, TerminalSession};
use spelltome_engine::api::Cli;
use spelltome_engine::use_cases::DetailFailurePolicy;
use spelltome_engine::{App, EngineConfig};
use spelltome_shared::{SpellDetailDto, SpellListResponse};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so stdout stays clean for --json.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spelltome_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if cli.partial {
        config.detail_failure = DetailFailurePolicy::SkipFailed;
    }

    let app = App::from_config(&config);
    let load = app.use_cases.catalog.load_catalog.load_or_empty().await;
    if !load.is_complete() {
        tracing::warn!(
            failed_items = load.failures.len(),
            failed_batches = load.errors.len(),
            "Catalog loaded with problems"
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(id) = &cli.show {
        match load.snapshot.spell(id) {
            Some(spell) if cli.json => {
                serde_json::to_writer_pretty(&mut out, &SpellDetailDto::from(spell))?;
                writeln!(out)?;
            }
            Some(spell) => write!(out, "{}", terminal::render_detail(spell))?,
            None => anyhow::bail!("No spell with identifier '{id}'"),
        }
        return Ok(());
    }

    let criteria = cli.criteria();

    if cli.interactive {
        terminal::report_load(&load, &mut out)?;
        let loader = app.use_cases.catalog.load_catalog.clone();
        let session = TerminalSession::new(Arc::new(load.snapshot), criteria, loader);
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        return session.run(input, &mut out).await;
    }

    let matches = load.snapshot.filter(&criteria);
    if cli.json {
        let response = SpellListResponse::new(criteria.clone(), load.snapshot.len(), matches);
        serde_json::to_writer_pretty(&mut out, &response)?;
        writeln!(out)?;
    } else {
        terminal::report_load(&load, &mut out)?;
        write!(
            out,
            "{}",
            terminal::render_results(matches, load.snapshot.len())
        )?;
    }

    Ok(())
}

/// Load `.env` from the working directory, then from the repo root.
fn load_dotenv() {
    let _ = dotenvy::dotenv();

    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
