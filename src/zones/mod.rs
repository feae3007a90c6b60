//! Zone model: where every copy of every card currently is.
//!
//! ## Key Types
//!
//! - `ZoneKind`: The named per-player zones
//! - `Zone`: An ordered multiset of `CardId`
//! - `PlayerZones`: One player's zones, with atomic moves and drawing
//! - `Supply`: Shared piles, one per card in the vocabulary
//!
//! Cards are only ever moved, never created or destroyed, so the total
//! copies of each card across all zones, the supply and the trash is fixed
//! for a game.

pub mod player_zones;
pub mod supply;
pub mod zone;

pub use player_zones::{Drawn, PlayerZones};
pub use supply::Supply;
pub use zone::{Zone, ZoneKind};
