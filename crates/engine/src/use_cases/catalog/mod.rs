//! Catalog use cases.
//!
//! Loads the session's catalog from the spell data source:
//! - All spells: one listing call, then every detail call concurrently
//! - Class index: one class listing, allow-list filter, then every class
//!   spell list concurrently
//! - Full catalog: both of the above at once, assembled into a snapshot
//!
//! Concurrency is unbounded fan-out/fan-in. Results are re-associated with
//! their request, so output order always follows listing order.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use spelltome_domain::{CatalogSnapshot, ClassMembershipIndex, Spell, SpellcastingClass};

use crate::infrastructure::ports::{CatalogError, SpellDataPort};

/// Container for catalog use cases.
pub struct CatalogUseCases {
    pub load_spells: Arc<LoadSpells>,
    pub load_class_index: Arc<LoadClassIndex>,
    pub load_catalog: Arc<LoadCatalog>,
}

impl CatalogUseCases {
    pub fn new(source: Arc<dyn SpellDataPort>, policy: DetailFailurePolicy) -> Self {
        let load_spells = Arc::new(LoadSpells::new(source.clone(), policy));
        let load_class_index = Arc::new(LoadClassIndex::new(source, policy));
        let load_catalog = Arc::new(LoadCatalog::new(
            load_spells.clone(),
            load_class_index.clone(),
        ));

        Self {
            load_spells,
            load_class_index,
            load_catalog,
        }
    }
}

/// What to do when one per-item call of a batch fails to reach the data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailFailurePolicy {
    /// Fail the whole batch and discard every other result.
    #[default]
    FailBatch,
    /// Keep the successful results and report each failed item.
    SkipFailed,
}

/// A per-item failure that did not abort its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub index: String,
    pub error: CatalogError,
}

// =============================================================================
// Spells
// =============================================================================

/// Result of loading every spell.
#[derive(Debug, Clone, Default)]
pub struct SpellLoadReport {
    /// Spells in listing order
    pub spells: Vec<Spell>,
    pub failures: Vec<ItemFailure>,
}

/// Use case for fetching the full spell list with details.
pub struct LoadSpells {
    source: Arc<dyn SpellDataPort>,
    policy: DetailFailurePolicy,
}

impl LoadSpells {
    pub fn new(source: Arc<dyn SpellDataPort>, policy: DetailFailurePolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch every spell.
    ///
    /// A failed listing fails the load. A detail call that cannot reach the
    /// data source is handled per [`DetailFailurePolicy`]; under `FailBatch`
    /// the error of the earliest failed item in listing order is returned.
    /// Malformed records are always skipped and reported, never fatal.
    pub async fn execute(&self) -> Result<SpellLoadReport, CatalogError> {
        let summaries = self.source.list_spells().await?;
        tracing::debug!(count = summaries.len(), "Listed spells");

        let details = join_all(
            summaries
                .iter()
                .map(|summary| self.source.get_spell(&summary.index)),
        )
        .await;

        let mut report = SpellLoadReport {
            spells: Vec::with_capacity(summaries.len()),
            failures: Vec::new(),
        };
        let mut seen = HashSet::new();

        for (summary, detail) in summaries.into_iter().zip(details) {
            match detail {
                Ok(spell) => {
                    if seen.insert(spell.id.clone()) {
                        report.spells.push(spell);
                    } else {
                        tracing::warn!(
                            index = %spell.id,
                            "Duplicate spell identifier, keeping first"
                        );
                    }
                }
                Err(error @ CatalogError::MalformedRecord { .. }) => {
                    tracing::warn!(
                        index = %summary.index,
                        error = %error,
                        "Skipping malformed spell"
                    );
                    report.failures.push(ItemFailure {
                        index: summary.index,
                        error,
                    });
                }
                Err(error) => match self.policy {
                    DetailFailurePolicy::FailBatch => return Err(error),
                    DetailFailurePolicy::SkipFailed => {
                        tracing::warn!(
                            index = %summary.index,
                            error = %error,
                            "Skipping unavailable spell"
                        );
                        report.failures.push(ItemFailure {
                            index: summary.index,
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(
            count = report.spells.len(),
            failed = report.failures.len(),
            "Loaded spells"
        );
        Ok(report)
    }
}

// =============================================================================
// Class Index
// =============================================================================

/// Result of loading the class membership index.
#[derive(Debug, Clone, Default)]
pub struct ClassIndexReport {
    /// Allow-listed classes in listing order
    pub classes: Vec<SpellcastingClass>,
    pub index: ClassMembershipIndex,
    pub failures: Vec<ItemFailure>,
}

/// Use case for building the class → spells index.
pub struct LoadClassIndex {
    source: Arc<dyn SpellDataPort>,
    policy: DetailFailurePolicy,
}

impl LoadClassIndex {
    pub fn new(source: Arc<dyn SpellDataPort>, policy: DetailFailurePolicy) -> Self {
        Self { source, policy }
    }

    /// Fetch the class listing, keep the eight spellcasting classes, then
    /// fetch each one's spell list.
    ///
    /// Under `SkipFailed` a class whose spell list failed stays listed but has
    /// no index entry, so filtering by it yields nothing.
    pub async fn execute(&self) -> Result<ClassIndexReport, CatalogError> {
        let listed = self.source.list_classes().await?;

        let mut classes = Vec::new();
        for entry in &listed {
            match SpellcastingClass::from_index(&entry.index) {
                Some(class) if !classes.contains(&class) => classes.push(class),
                Some(_) => {}
                None => tracing::debug!(class = %entry.index, "Ignoring non-spellcasting class"),
            }
        }

        let spell_lists = join_all(
            classes
                .iter()
                .map(|class| self.source.list_class_spells(class.index())),
        )
        .await;

        let mut report = ClassIndexReport {
            classes: classes.clone(),
            index: ClassMembershipIndex::new(),
            failures: Vec::new(),
        };

        for (class, spell_list) in classes.into_iter().zip(spell_lists) {
            match spell_list {
                Ok(spell_ids) => {
                    tracing::debug!(
                        class = class.index(),
                        count = spell_ids.len(),
                        "Indexed class"
                    );
                    report.index.insert(class.index(), spell_ids);
                }
                Err(error) => match self.policy {
                    DetailFailurePolicy::FailBatch => return Err(error),
                    DetailFailurePolicy::SkipFailed => {
                        tracing::warn!(
                            class = class.index(),
                            error = %error,
                            "Skipping class spell list"
                        );
                        report.failures.push(ItemFailure {
                            index: class.index().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(classes = report.index.len(), "Loaded class index");
        Ok(report)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A loaded catalog plus whatever went wrong while loading it.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub snapshot: CatalogSnapshot,
    /// Items skipped without failing their batch
    pub failures: Vec<ItemFailure>,
    /// Batches that failed outright and were replaced by empty data
    pub errors: Vec<CatalogError>,
}

impl CatalogLoad {
    /// True when nothing was skipped or replaced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }
}

/// Use case for loading the whole session catalog.
pub struct LoadCatalog {
    load_spells: Arc<LoadSpells>,
    load_class_index: Arc<LoadClassIndex>,
}

impl LoadCatalog {
    pub fn new(load_spells: Arc<LoadSpells>, load_class_index: Arc<LoadClassIndex>) -> Self {
        Self {
            load_spells,
            load_class_index,
        }
    }

    /// Load spells and classes concurrently; either failure fails the load.
    pub async fn execute(&self) -> Result<CatalogLoad, CatalogError> {
        let (spells, classes) = tokio::try_join!(
            self.load_spells.execute(),
            self.load_class_index.execute()
        )?;
        Ok(assemble(spells, classes, Vec::new()))
    }

    /// Load spells and classes concurrently, degrading each failed half to
    /// empty data instead of failing.
    ///
    /// A failed spell load yields an empty catalog; a failed class load
    /// leaves the spells browsable with no class filter options.
    pub async fn load_or_empty(&self) -> CatalogLoad {
        let (spells, classes) = tokio::join!(
            self.load_spells.execute(),
            self.load_class_index.execute()
        );

        let mut errors = Vec::new();
        let spells = spells.unwrap_or_else(|error| {
            tracing::warn!(
                error = %error,
                "Spell data unavailable, continuing with an empty catalog"
            );
            errors.push(error);
            SpellLoadReport::default()
        });
        let classes = classes.unwrap_or_else(|error| {
            tracing::warn!(
                error = %error,
                "Class data unavailable, continuing without class filters"
            );
            errors.push(error);
            ClassIndexReport::default()
        });

        assemble(spells, classes, errors)
    }
}

fn assemble(
    spells: SpellLoadReport,
    classes: ClassIndexReport,
    errors: Vec<CatalogError>,
) -> CatalogLoad {
    let mut failures = spells.failures;
    failures.extend(classes.failures);

    CatalogLoad {
        snapshot: CatalogSnapshot::new(spells.spells, classes.classes, classes.index),
        failures,
        errors,
    }
}
