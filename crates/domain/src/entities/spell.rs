//! Spell entity for the D&D 5e spell catalog.
//!
//! A `Spell` is one catalog entry as served by the data source, already
//! validated: its level is within 0..=9 and its school has been resolved
//! to one of the eight schools of magic or the neutral bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A spell in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    /// Stable unique key (the data source's `index`, e.g. "fireball")
    pub id: String,
    /// Display name of the spell
    pub name: String,
    /// Spell level (cantrip = 0)
    pub level: SpellLevel,
    /// School of magic
    pub school: MagicSchool,
    /// How long it takes to cast (free text, e.g. "1 action")
    pub casting_time: String,
    /// Range of the spell (free text, e.g. "150 feet")
    pub range: String,
    /// How long the spell lasts (free text, e.g. "Instantaneous")
    pub duration: String,
    /// Required components, without duplicates
    #[serde(default)]
    pub components: Vec<SpellComponent>,
    /// Description paragraphs, in order
    #[serde(default)]
    pub description: Vec<String>,
    /// Paragraphs describing the effect when cast with a higher slot
    #[serde(default)]
    pub higher_level: Option<Vec<String>>,
    /// Class names listed on the spell itself (display only)
    #[serde(default)]
    pub classes: Vec<String>,
    /// Material component details
    #[serde(default)]
    pub material: Option<String>,
    /// Whether this spell can be cast as a ritual
    #[serde(default)]
    pub ritual: bool,
    /// Whether this spell requires concentration
    #[serde(default)]
    pub concentration: bool,
}

impl Spell {
    /// Create a spell with the required fields; everything else starts empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: SpellLevel,
        school: MagicSchool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            school,
            casting_time: String::new(),
            range: String::new(),
            duration: String::new(),
            components: Vec::new(),
            description: Vec::new(),
            higher_level: None,
            classes: Vec::new(),
            material: None,
            ritual: false,
            concentration: false,
        }
    }

    pub fn with_description<I, S>(mut self, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = paragraphs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_higher_level<I, S>(mut self, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs: Vec<String> = paragraphs.into_iter().map(Into::into).collect();
        self.higher_level = if paragraphs.is_empty() {
            None
        } else {
            Some(paragraphs)
        };
        self
    }

    /// Set the components, collapsing duplicates while keeping first-seen order.
    pub fn with_components(mut self, components: impl IntoIterator<Item = SpellComponent>) -> Self {
        self.components.clear();
        for component in components {
            if !self.components.contains(&component) {
                self.components.push(component);
            }
        }
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_casting(
        mut self,
        casting_time: impl Into<String>,
        range: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        self.casting_time = casting_time.into();
        self.range = range.into();
        self.duration = duration.into();
        self
    }

    /// The first description paragraph, if any.
    pub fn summary(&self) -> Option<&str> {
        self.description.first().map(String::as_str)
    }

    pub fn has_component(&self, component: SpellComponent) -> bool {
        self.components.contains(&component)
    }
}

/// Spell level, always within 0..=9. Level 0 is a cantrip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpellLevel(u8);

impl SpellLevel {
    pub const CANTRIP: SpellLevel = SpellLevel(0);
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Result<Self, DomainError> {
        if level > Self::MAX {
            return Err(DomainError::validation(format!(
                "spell level {level} is above {}",
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    /// Convert to numeric level (cantrip = 0).
    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_cantrip(&self) -> bool {
        self.0 == 0
    }

    /// Long label: "Cantrip" or "Level N".
    pub fn label(&self) -> String {
        if self.is_cantrip() {
            "Cantrip".to_string()
        } else {
            format!("Level {}", self.0)
        }
    }

    /// Short card badge: "C" or the level digit.
    pub fn badge(&self) -> String {
        if self.is_cantrip() {
            "C".to_string()
        } else {
            self.0.to_string()
        }
    }

    /// Every valid level, cantrip first.
    pub fn all() -> impl Iterator<Item = SpellLevel> {
        (0..=Self::MAX).map(SpellLevel)
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The eight schools of magic, plus a neutral bucket for labels the catalog
/// does not recognize (including a missing school).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MagicSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
    /// Unknown or missing label, kept verbatim
    Unrecognized(String),
}

/// Card color for schools outside the known eight.
pub const NEUTRAL_SCHOOL_COLOR: &str = "#718096";

impl MagicSchool {
    /// The eight recognized schools, in menu order.
    pub const KNOWN: [MagicSchool; 8] = [
        MagicSchool::Abjuration,
        MagicSchool::Conjuration,
        MagicSchool::Divination,
        MagicSchool::Enchantment,
        MagicSchool::Evocation,
        MagicSchool::Illusion,
        MagicSchool::Necromancy,
        MagicSchool::Transmutation,
    ];

    /// Resolve a label case-insensitively. Never fails: unknown labels land
    /// in [`MagicSchool::Unrecognized`].
    pub fn from_label(label: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|school| school.name().eq_ignore_ascii_case(label.trim()))
            .cloned()
            .unwrap_or_else(|| MagicSchool::Unrecognized(label.to_string()))
    }

    /// Canonical name, or the raw label for an unrecognized school.
    pub fn name(&self) -> &str {
        match self {
            MagicSchool::Abjuration => "Abjuration",
            MagicSchool::Conjuration => "Conjuration",
            MagicSchool::Divination => "Divination",
            MagicSchool::Enchantment => "Enchantment",
            MagicSchool::Evocation => "Evocation",
            MagicSchool::Illusion => "Illusion",
            MagicSchool::Necromancy => "Necromancy",
            MagicSchool::Transmutation => "Transmutation",
            MagicSchool::Unrecognized(label) => label,
        }
    }

    /// Name for display; an empty label shows as "Unknown".
    pub fn display_name(&self) -> &str {
        match self {
            MagicSchool::Unrecognized(label) if label.trim().is_empty() => "Unknown",
            other => other.name(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MagicSchool::Unrecognized(_))
    }

    /// Case-insensitive comparison against a school label.
    pub fn matches_label(&self, label: &str) -> bool {
        self.name().to_lowercase() == label.to_lowercase()
    }

    /// Card header color per school.
    pub fn color(&self) -> &'static str {
        match self {
            MagicSchool::Abjuration => "#4299e1",
            MagicSchool::Conjuration => "#9f7aea",
            MagicSchool::Divination => "#38b2ac",
            MagicSchool::Enchantment => "#ed64a6",
            MagicSchool::Evocation => "#f56565",
            MagicSchool::Illusion => "#667eea",
            MagicSchool::Necromancy => "#1a202c",
            MagicSchool::Transmutation => "#48bb78",
            MagicSchool::Unrecognized(_) => NEUTRAL_SCHOOL_COLOR,
        }
    }
}

impl From<String> for MagicSchool {
    fn from(label: String) -> Self {
        MagicSchool::from_label(&label)
    }
}

impl From<MagicSchool> for String {
    fn from(school: MagicSchool) -> Self {
        school.name().to_string()
    }
}

impl fmt::Display for MagicSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Casting requirement symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellComponent {
    #[serde(rename = "V")]
    Verbal,
    #[serde(rename = "S")]
    Somatic,
    #[serde(rename = "M")]
    Material,
}

impl SpellComponent {
    pub fn symbol(&self) -> &'static str {
        match self {
            SpellComponent::Verbal => "V",
            SpellComponent::Somatic => "S",
            SpellComponent::Material => "M",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpellComponent::Verbal => "Verbal",
            SpellComponent::Somatic => "Somatic",
            SpellComponent::Material => "Material",
        }
    }
}

impl FromStr for SpellComponent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "V" | "v" => Ok(SpellComponent::Verbal),
            "S" | "s" => Ok(SpellComponent::Somatic),
            "M" | "m" => Ok(SpellComponent::Material),
            other => Err(DomainError::parse(format!(
                "unknown component symbol: {other}"
            ))),
        }
    }
}

impl fmt::Display for SpellComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
