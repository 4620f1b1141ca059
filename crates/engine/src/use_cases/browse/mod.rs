//! Browse session.
//!
//! A spawned task owns the filter criteria for one session. The presentation
//! surface sends criteria changes over a channel; after each change the task
//! re-runs the filter pipeline over the current catalog snapshot and
//! publishes the resulting view. Changes are applied strictly in the order
//! they were sent, so the published view always reflects the latest one.

use std::sync::Arc;

use spelltome_domain::{CatalogSnapshot, CriteriaChange, FilterCriteria, Spell};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Maximum queued commands before senders wait.
const COMMAND_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BrowseError {
    #[error("Browse session has stopped")]
    SessionClosed,
}

/// The filtered view published after every change.
#[derive(Debug, Clone)]
pub struct FilterView {
    /// Bumped once per processed command.
    pub revision: u64,
    pub criteria: FilterCriteria,
    catalog: Arc<CatalogSnapshot>,
    positions: Vec<usize>,
}

impl FilterView {
    fn compute(revision: u64, catalog: Arc<CatalogSnapshot>, criteria: FilterCriteria) -> Self {
        let positions = catalog.filter_positions(&criteria);
        Self {
            revision,
            criteria,
            catalog,
            positions,
        }
    }

    /// Matching spells in catalog order.
    pub fn spells(&self) -> impl Iterator<Item = &Spell> + '_ {
        let spells = self.catalog.spells();
        self.positions.iter().map(move |&position| &spells[position])
    }

    /// The snapshot this view was computed from.
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

enum BrowseCommand {
    Change {
        change: CriteriaChange,
        reply: Option<oneshot::Sender<Arc<FilterView>>>,
    },
    ReplaceCatalog {
        catalog: Arc<CatalogSnapshot>,
        reply: Option<oneshot::Sender<Arc<FilterView>>>,
    },
}

/// Handle to a running browse session.
///
/// Dropping the handle closes the command channel and the task ends.
pub struct BrowseHandle {
    commands: mpsc::Sender<BrowseCommand>,
    view: watch::Receiver<Arc<FilterView>>,
    task: JoinHandle<()>,
}

impl BrowseHandle {
    /// Start a session over `catalog` with unrestricted criteria.
    pub fn spawn(catalog: Arc<CatalogSnapshot>) -> Self {
        Self::spawn_with(catalog, FilterCriteria::default())
    }

    /// Start a session with initial criteria.
    pub fn spawn_with(catalog: Arc<CatalogSnapshot>, criteria: FilterCriteria) -> Self {
        let initial = Arc::new(FilterView::compute(0, catalog.clone(), criteria.clone()));
        let (view_tx, view_rx) = watch::channel(initial);
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_BUFFER);

        let task = tokio::spawn(run_session(catalog, criteria, rx, view_tx));

        Self {
            commands: tx,
            view: view_rx,
            task,
        }
    }

    /// Queue a change without waiting for the recomputed view.
    pub async fn send(&self, change: CriteriaChange) -> Result<(), BrowseError> {
        self.commands
            .send(BrowseCommand::Change {
                change,
                reply: None,
            })
            .await
            .map_err(|_| BrowseError::SessionClosed)
    }

    /// Apply a change and return the view computed from it.
    pub async fn apply(&self, change: CriteriaChange) -> Result<Arc<FilterView>, BrowseError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(BrowseCommand::Change {
                change,
                reply: Some(reply),
            })
            .await
            .map_err(|_| BrowseError::SessionClosed)?;
        response.await.map_err(|_| BrowseError::SessionClosed)
    }

    /// Swap in a freshly loaded catalog, keeping the current criteria.
    pub async fn replace_catalog(
        &self,
        catalog: Arc<CatalogSnapshot>,
    ) -> Result<Arc<FilterView>, BrowseError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(BrowseCommand::ReplaceCatalog {
                catalog,
                reply: Some(reply),
            })
            .await
            .map_err(|_| BrowseError::SessionClosed)?;
        response.await.map_err(|_| BrowseError::SessionClosed)
    }

    /// The most recently published view.
    pub fn current(&self) -> Arc<FilterView> {
        self.view.borrow().clone()
    }

    /// Wait for the next published view.
    pub async fn changed(&mut self) -> Result<Arc<FilterView>, BrowseError> {
        self.view
            .changed()
            .await
            .map_err(|_| BrowseError::SessionClosed)?;
        Ok(self.view.borrow_and_update().clone())
    }

    /// A receiver that observes every published view.
    pub fn subscribe(&self) -> watch::Receiver<Arc<FilterView>> {
        self.view.clone()
    }

    /// Close the command channel and wait for the task to finish.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Browse session task ended abnormally");
        }
    }
}

async fn run_session(
    mut catalog: Arc<CatalogSnapshot>,
    mut criteria: FilterCriteria,
    mut commands: mpsc::Receiver<BrowseCommand>,
    view_tx: watch::Sender<Arc<FilterView>>,
) {
    let mut revision = 0;

    while let Some(command) = commands.recv().await {
        let reply = match command {
            BrowseCommand::Change { change, reply } => {
                criteria.apply_change(change);
                reply
            }
            BrowseCommand::ReplaceCatalog {
                catalog: replacement,
                reply,
            } => {
                catalog = replacement;
                reply
            }
        };

        revision += 1;
        let view = Arc::new(FilterView::compute(
            revision,
            catalog.clone(),
            criteria.clone(),
        ));
        tracing::debug!(
            revision,
            criteria = %view.criteria,
            matches = view.len(),
            "Recomputed filter view"
        );

        view_tx.send_replace(view.clone());
        if let Some(reply) = reply {
            // The requester may have given up waiting.
            let _ = reply.send(view);
        }
    }

    tracing::debug!("Browse session closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{catalog, light};
    use spelltome_domain::{ClassMembershipIndex, Selection, SpellcastingClass};

    fn ids(view: &FilterView) -> Vec<&str> {
        view.spells().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn initial_view_shows_whole_catalog() {
        let handle = BrowseHandle::spawn(Arc::new(catalog()));

        let view = handle.current();
        assert_eq!(view.revision, 0);
        assert!(view.criteria.is_unfiltered());
        assert_eq!(ids(&view), vec!["fireball", "light", "cure-wounds", "shield"]);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn initial_criteria_are_applied() {
        let handle =
            BrowseHandle::spawn_with(Arc::new(catalog()), FilterCriteria::new().with_level(1));

        assert_eq!(ids(&handle.current()), vec!["cure-wounds", "shield"]);
    }

    #[tokio::test]
    async fn changes_accumulate_in_order() {
        let handle = BrowseHandle::spawn(Arc::new(catalog()));

        let view = handle
            .apply(CriteriaChange::Class(Selection::Only("wizard".into())))
            .await
            .expect("session running");
        assert_eq!(ids(&view), vec!["fireball", "light", "shield"]);

        let view = handle
            .apply(CriteriaChange::Level(Selection::Only(1)))
            .await
            .expect("session running");
        assert_eq!(ids(&view), vec!["shield"]);

        let view = handle
            .apply(CriteriaChange::Search("FIRE".into()))
            .await
            .expect("session running");
        assert!(view.is_empty());
        assert_eq!(view.revision, 3);

        let view = handle
            .apply(CriteriaChange::Reset)
            .await
            .expect("session running");
        assert_eq!(view.len(), 4);
    }

    #[tokio::test]
    async fn latest_change_wins_when_changes_are_queued() {
        let mut handle = BrowseHandle::spawn(Arc::new(catalog()));

        handle
            .send(CriteriaChange::Search("light".into()))
            .await
            .expect("session running");
        handle
            .send(CriteriaChange::Search("shield".into()))
            .await
            .expect("session running");
        let last = handle
            .apply(CriteriaChange::School(Selection::Only("ABJURATION".into())))
            .await
            .expect("session running");

        assert_eq!(last.revision, 3);
        assert_eq!(ids(&last), vec!["shield"]);
        let published = handle.changed().await.expect("session running");
        assert_eq!(published.revision, 3);
        assert_eq!(handle.current().revision, 3);
    }

    #[tokio::test]
    async fn replacing_catalog_keeps_criteria() {
        let handle = BrowseHandle::spawn(Arc::new(catalog()));
        handle
            .apply(CriteriaChange::Class(Selection::Only("cleric".into())))
            .await
            .expect("session running");

        let reloaded = CatalogSnapshot::new(
            vec![light()],
            vec![SpellcastingClass::Cleric],
            [("cleric", vec!["light"])]
                .into_iter()
                .collect::<ClassMembershipIndex>(),
        );
        let view = handle
            .replace_catalog(Arc::new(reloaded))
            .await
            .expect("session running");

        assert_eq!(view.criteria.class_id, Selection::Only("cleric".into()));
        assert_eq!(ids(&view), vec!["light"]);
        assert_eq!(view.catalog().len(), 1);
    }

    #[tokio::test]
    async fn subscribers_see_published_views() {
        let handle = BrowseHandle::spawn(Arc::new(catalog()));
        let mut watcher = handle.subscribe();

        handle
            .send(CriteriaChange::Level(Selection::Only(0)))
            .await
            .expect("session running");
        watcher.changed().await.expect("view published");

        assert_eq!(ids(&watcher.borrow()), vec!["light"]);
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_views() {
        let handle = BrowseHandle::spawn(Arc::new(CatalogSnapshot::empty()));

        let view = handle
            .apply(CriteriaChange::Search("anything".into()))
            .await
            .expect("session running");

        assert!(view.is_empty());
    }
}
