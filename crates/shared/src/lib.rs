//! Spelltome Shared - wire types
//!
//! This crate contains the types that cross a process boundary:
//! - Inbound DTOs mirroring the D&D 5e REST API (`dnd5e`)
//! - Outbound DTOs for the CLI's JSON output (`responses`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Lenient inbound types** - Missing fields default instead of failing a whole record

pub mod dnd5e;
pub mod responses;

pub use dnd5e::{ApiReference, ApiReferenceList, SpellRecord};
pub use responses::{SpellCardDto, SpellDetailDto, SpellListResponse};
