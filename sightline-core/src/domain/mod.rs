//! Domain types for Sightline

pub mod ids;
pub mod sighting;

pub use ids::{MonsterId, MoveId, TeamId};
pub use sighting::{Distance, GeoPoint, RaidInfo, Sighting, SightingKind};
