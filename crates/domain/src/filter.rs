//! Spell filter pipeline.
//!
//! Narrows a spell collection by four independent predicates combined with
//! AND. Each predicate is a no-op when its criterion is unrestricted (or, for
//! the search text, empty). The pipeline is pure: it never suspends, never
//! mutates its inputs, and always recomputes the full result from scratch.
//!
//! - **Text**: the name, or the *first* description paragraph, contains the
//!   search text (case-insensitive). Later paragraphs are not searched.
//! - **Level**: exact integer equality; level 0 selects cantrips.
//! - **School**: case-insensitive equality with the spell's school name.
//! - **Class**: membership in the class index. A class missing from the index
//!   matches nothing.

use crate::entities::{ClassMembershipIndex, Spell};
use crate::value_objects::FilterCriteria;

/// Predicate over spells for one set of criteria.
///
/// The lower-cased search needle is computed once, so a single `SpellFilter`
/// can be reused across the whole collection.
#[derive(Debug, Clone)]
pub struct SpellFilter<'a> {
    criteria: &'a FilterCriteria,
    class_index: &'a ClassMembershipIndex,
    needle: Option<String>,
}

impl<'a> SpellFilter<'a> {
    pub fn new(criteria: &'a FilterCriteria, class_index: &'a ClassMembershipIndex) -> Self {
        let needle = if criteria.search_text.is_empty() {
            None
        } else {
            Some(criteria.search_text.to_lowercase())
        };

        Self {
            criteria,
            class_index,
            needle,
        }
    }

    /// Check if a spell passes every active predicate.
    pub fn matches(&self, spell: &Spell) -> bool {
        self.matches_text(spell)
            && self.matches_level(spell)
            && self.matches_school(spell)
            && self.matches_class(spell)
    }

    pub fn matches_text(&self, spell: &Spell) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        if spell.name.to_lowercase().contains(needle) {
            return true;
        }

        // Spells without a description are matched on their name alone
        spell
            .summary()
            .is_some_and(|first| first.to_lowercase().contains(needle))
    }

    pub fn matches_level(&self, spell: &Spell) -> bool {
        self.criteria
            .level
            .permits(|level| spell.level.value() == *level)
    }

    pub fn matches_school(&self, spell: &Spell) -> bool {
        self.criteria
            .school
            .permits(|school| spell.school.matches_label(school))
    }

    pub fn matches_class(&self, spell: &Spell) -> bool {
        self.criteria
            .class_id
            .permits(|class_id| self.class_index.contains(class_id, &spell.id))
    }
}

/// Return the spells satisfying every active criterion, in input order.
///
/// An empty result is a normal outcome (nothing matched), not an error.
pub fn apply<'s>(
    spells: &'s [Spell],
    class_index: &ClassMembershipIndex,
    criteria: &FilterCriteria,
) -> Vec<&'s Spell> {
    let filter = SpellFilter::new(criteria, class_index);
    spells.iter().filter(|spell| filter.matches(spell)).collect()
}
