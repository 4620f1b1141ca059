//! Spellcasting classes and the class → spell membership index.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One of the eight classes whose spell lists the catalog tracks.
///
/// This is a fixed allow-list: classes the data source reports that are not
/// listed here are dropped when the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellcastingClass {
    Bard,
    Cleric,
    Druid,
    Paladin,
    Ranger,
    Sorcerer,
    Warlock,
    Wizard,
}

impl SpellcastingClass {
    pub const ALL: [SpellcastingClass; 8] = [
        SpellcastingClass::Bard,
        SpellcastingClass::Cleric,
        SpellcastingClass::Druid,
        SpellcastingClass::Paladin,
        SpellcastingClass::Ranger,
        SpellcastingClass::Sorcerer,
        SpellcastingClass::Warlock,
        SpellcastingClass::Wizard,
    ];

    /// Data source identifier (e.g., "wizard").
    pub fn index(&self) -> &'static str {
        match self {
            SpellcastingClass::Bard => "bard",
            SpellcastingClass::Cleric => "cleric",
            SpellcastingClass::Druid => "druid",
            SpellcastingClass::Paladin => "paladin",
            SpellcastingClass::Ranger => "ranger",
            SpellcastingClass::Sorcerer => "sorcerer",
            SpellcastingClass::Warlock => "warlock",
            SpellcastingClass::Wizard => "wizard",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SpellcastingClass::Bard => "Bard",
            SpellcastingClass::Cleric => "Cleric",
            SpellcastingClass::Druid => "Druid",
            SpellcastingClass::Paladin => "Paladin",
            SpellcastingClass::Ranger => "Ranger",
            SpellcastingClass::Sorcerer => "Sorcerer",
            SpellcastingClass::Warlock => "Warlock",
            SpellcastingClass::Wizard => "Wizard",
        }
    }

    /// Exact match on the data source identifier. Renamed or unknown
    /// classes return `None`.
    pub fn from_index(index: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.index() == index)
    }
}

impl fmt::Display for SpellcastingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Mapping from class identifier to the spell identifiers that class can cast.
///
/// This is the authoritative membership signal for class filtering. It is
/// sourced independently from each spell's own `classes` field and the two
/// are never reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMembershipIndex {
    classes: HashMap<String, HashSet<String>>,
}

impl ClassMembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the spell list of one class, replacing any previous entry.
    pub fn insert<I, S>(&mut self, class_id: impl Into<String>, spell_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.insert(
            class_id.into(),
            spell_ids.into_iter().map(Into::into).collect(),
        );
    }

    /// Whether `class_id` can cast `spell_id`. A class with no entry casts nothing.
    pub fn contains(&self, class_id: &str, spell_id: &str) -> bool {
        self.classes
            .get(class_id)
            .is_some_and(|spells| spells.contains(spell_id))
    }

    pub fn spells_for(&self, class_id: &str) -> Option<&HashSet<String>> {
        self.classes.get(class_id)
    }

    pub fn has_class(&self, class_id: &str) -> bool {
        self.classes.contains_key(class_id)
    }

    pub fn class_ids(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of classes in the index.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for ClassMembershipIndex
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (class_id, spell_ids) in iter {
            index.insert(class_id, spell_ids);
        }
        index
    }
}
