use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo run -p xtask -- <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!(
            "cargo metadata failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let violations = check_layering(&metadata);

    if violations.is_empty() {
        println!("arch-check: {} crates OK", metadata.packages.len());
        return Ok(());
    }

    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} layering violation(s)", violations.len())
}

// =============================================================================
// Layering Rules
// =============================================================================

/// Workspace crates each crate may depend on. Crates not listed are unchecked.
const ALLOWED_INTERNAL: &[(&str, &[&str])] = &[
    ("spelltome-domain", &[]),
    ("spelltome-shared", &["spelltome-domain"]),
    ("spelltome-engine", &["spelltome-domain", "spelltome-shared"]),
    ("xtask", &[]),
];

/// Runtime, I/O and presentation crates kept out of the pure layers.
const PURE_CRATES: &[&str] = &["spelltome-domain", "spelltome-shared"];
const IMPURE_DEPENDENCIES: &[&str] = &[
    "tokio",
    "reqwest",
    "axum",
    "clap",
    "async-trait",
    "tracing-subscriber",
    "dotenvy",
    "futures-util",
];

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `None` for normal dependencies, `"dev"` or `"build"` otherwise
    kind: Option<String>,
}

impl Dependency {
    fn is_dev(&self) -> bool {
        self.kind.as_deref() == Some("dev")
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Violation {
    ForbiddenInternal { from: String, to: String },
    ImpureDependency { from: String, to: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ForbiddenInternal { from, to } => {
                write!(f, "{from} must not depend on workspace crate {to}")
            }
            Violation::ImpureDependency { from, to } => {
                write!(f, "{from} must stay free of {to}")
            }
        }
    }
}

fn check_layering(metadata: &Metadata) -> Vec<Violation> {
    let allowed: BTreeMap<&str, &[&str]> = ALLOWED_INTERNAL.iter().copied().collect();
    let mut violations = Vec::new();

    for package in &metadata.packages {
        let Some(permitted) = allowed.get(package.name.as_str()) else {
            continue;
        };
        let pure = PURE_CRATES.contains(&package.name.as_str());

        for dependency in package.dependencies.iter().filter(|d| !d.is_dev()) {
            let name = dependency.name.as_str();
            if allowed.contains_key(name) && !permitted.contains(&name) {
                violations.push(Violation::ForbiddenInternal {
                    from: package.name.clone(),
                    to: name.to_string(),
                });
            }
            if pure && IMPURE_DEPENDENCIES.contains(&name) {
                violations.push(Violation::ImpureDependency {
                    from: package.name.clone(),
                    to: name.to_string(),
                });
            }
        }
    }

    violations
}
