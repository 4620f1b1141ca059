//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{catalog, dnd5e_server};
//!
//! #[tokio::test]
//! async fn test_loads_from_fixture() {
//!     let server = dnd5e_server::start().await;
//!     let client = Dnd5eApiClient::new(&server.base_url());
//!     // ... test logic
//! }
//! ```

pub mod dnd5e_server;

use spelltome_domain::{
    CatalogSnapshot, ClassMembershipIndex, MagicSchool, Spell, SpellComponent, SpellLevel,
    SpellcastingClass,
};

// =============================================================================
// Spell Builders
// =============================================================================

pub fn spell(id: &str, name: &str, level: u8, school: MagicSchool) -> Spell {
    Spell::new(
        id,
        name,
        SpellLevel::new(level).expect("fixture level is valid"),
        school,
    )
    .with_casting("1 action", "Touch", "Instantaneous")
    .with_components([SpellComponent::Verbal, SpellComponent::Somatic])
}

pub fn fireball() -> Spell {
    spell("fireball", "Fireball", 3, MagicSchool::Evocation)
        .with_casting("1 action", "150 feet", "Instantaneous")
        .with_description([
            "A bright streak flashes from your pointing finger to a point you choose.",
            "The fire spreads around corners.",
        ])
        .with_higher_level(["The damage increases by 1d6 for each slot level above 3rd."])
        .with_classes(["Sorcerer", "Wizard"])
}

pub fn light() -> Spell {
    spell("light", "Light", 0, MagicSchool::Evocation)
        .with_casting("1 action", "Touch", "1 hour")
        .with_description(["You touch one object that is no larger than 10 feet."])
        .with_classes(["Cleric", "Wizard"])
}

pub fn cure_wounds() -> Spell {
    spell("cure-wounds", "Cure Wounds", 1, MagicSchool::Evocation)
        .with_description(["A creature you touch regains a number of hit points."])
        .with_classes(["Cleric"])
}

pub fn shield() -> Spell {
    spell("shield", "Shield", 1, MagicSchool::Abjuration)
        .with_casting("1 reaction", "Self", "1 round")
        .with_description(["An invisible barrier of magical force appears and protects you."])
        .with_classes(["Wizard"])
}

// =============================================================================
// Catalogs
// =============================================================================

/// Four spells, with wizard and cleric class lists.
pub fn catalog() -> CatalogSnapshot {
    let index: ClassMembershipIndex = [
        ("wizard", vec!["fireball", "light", "shield"]),
        ("cleric", vec!["light", "cure-wounds"]),
    ]
    .into_iter()
    .collect();

    CatalogSnapshot::new(
        vec![fireball(), light(), cure_wounds(), shield()],
        vec![SpellcastingClass::Cleric, SpellcastingClass::Wizard],
        index,
    )
}
