//! Immutable catalog snapshot for one browsing session.

use serde::{Deserialize, Serialize};

use crate::entities::{ClassMembershipIndex, Spell, SpellcastingClass};
use crate::filter;
use crate::value_objects::FilterCriteria;

/// Everything fetched from the data source for one session.
///
/// Built once by the loading step and read-only afterwards. A reload builds
/// a new snapshot instead of mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    spells: Vec<Spell>,
    classes: Vec<SpellcastingClass>,
    class_index: ClassMembershipIndex,
}

impl CatalogSnapshot {
    pub fn new(
        spells: Vec<Spell>,
        classes: Vec<SpellcastingClass>,
        class_index: ClassMembershipIndex,
    ) -> Self {
        Self {
            spells,
            classes,
            class_index,
        }
    }

    /// A snapshot with nothing in it (data source unavailable).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    /// Spellcasting classes offered by the data source, in its order.
    pub fn classes(&self) -> &[SpellcastingClass] {
        &self.classes
    }

    pub fn class_index(&self) -> &ClassMembershipIndex {
        &self.class_index
    }

    /// Look up a spell by identifier (for the detail view).
    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|spell| spell.id == id)
    }

    /// Run the filter pipeline over this snapshot.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Spell> {
        filter::apply(&self.spells, &self.class_index, criteria)
    }

    /// Positions of the matching spells within [`Self::spells`].
    pub fn filter_positions(&self, criteria: &FilterCriteria) -> Vec<usize> {
        let spell_filter = filter::SpellFilter::new(criteria, &self.class_index);
        self.spells
            .iter()
            .enumerate()
            .filter(|(_, spell)| spell_filter.matches(spell))
            .map(|(position, _)| position)
            .collect()
    }

    /// Number of spells in the snapshot.
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}
