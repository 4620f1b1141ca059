//! Domain entities - Core catalog objects with identity

mod spell;
mod spellcasting_class;

pub use spell::{MagicSchool, Spell, SpellComponent, SpellLevel, NEUTRAL_SCHOOL_COLOR};
pub use spellcasting_class::{ClassMembershipIndex, SpellcastingClass};
