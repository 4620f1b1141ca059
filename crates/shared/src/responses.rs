//! Outbound DTOs for machine-readable CLI output.

use serde::{Deserialize, Serialize};
use spelltome_domain::{FilterCriteria, Spell};

/// Card view of a spell: what a result list shows per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCardDto {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub level_badge: String,
    pub school: String,
    pub school_color: String,
    pub casting_time: String,
    pub duration: String,
    pub range: String,
}

impl From<&Spell> for SpellCardDto {
    fn from(spell: &Spell) -> Self {
        Self {
            id: spell.id.clone(),
            name: spell.name.clone(),
            level: spell.level.value(),
            level_badge: spell.level.badge(),
            school: spell.school.display_name().to_string(),
            school_color: spell.school.color().to_string(),
            casting_time: spell.casting_time.clone(),
            duration: spell.duration.clone(),
            range: spell.range.clone(),
        }
    }
}

/// Detail view of a spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellDetailDto {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub level_label: String,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub duration: String,
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub ritual: bool,
    pub concentration: bool,
    pub classes: Vec<String>,
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub higher_level: Option<Vec<String>>,
}

impl From<&Spell> for SpellDetailDto {
    fn from(spell: &Spell) -> Self {
        Self {
            id: spell.id.clone(),
            name: spell.name.clone(),
            level: spell.level.value(),
            level_label: spell.level.label(),
            school: spell.school.display_name().to_string(),
            casting_time: spell.casting_time.clone(),
            range: spell.range.clone(),
            duration: spell.duration.clone(),
            components: spell
                .components
                .iter()
                .map(|c| c.symbol().to_string())
                .collect(),
            material: spell.material.clone(),
            ritual: spell.ritual,
            concentration: spell.concentration,
            classes: spell.classes.clone(),
            description: spell.description.clone(),
            higher_level: spell.higher_level.clone(),
        }
    }
}

/// Result of one filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellListResponse {
    pub criteria: FilterCriteria,
    /// Size of the whole catalog
    pub total: usize,
    pub spells: Vec<SpellCardDto>,
}

impl SpellListResponse {
    pub fn new<'a>(
        criteria: FilterCriteria,
        total: usize,
        spells: impl IntoIterator<Item = &'a Spell>,
    ) -> Self {
        Self {
            criteria,
            total,
            spells: spells.into_iter().map(SpellCardDto::from).collect(),
        }
    }
}
