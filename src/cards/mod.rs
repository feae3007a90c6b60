//! Card system: definitions, catalog, and per-game registry.
//!
//! ## Key Types
//!
//! - `CardId`: Index into a game's card vocabulary
//! - `CardDef`: Static card data (cost, kind, effects)
//! - `Catalog`: Every known definition, looked up by name
//! - `CardRegistry`: The sorted vocabulary one game uses
//!
//! Copies of a card have no identity of their own; zones are multisets of
//! `CardId`.

pub mod catalog;
pub mod definition;
pub mod registry;

pub use catalog::{Catalog, BASE_CARDS};
pub use definition::{CardDef, CardId, CardKind, Effect};
pub use registry::CardRegistry;
