//! Sighting records — one immutable snapshot per timed spawn event.
//!
//! A sighting is fully populated by the upstream producer before it reaches
//! the filter layer: distance and the time fields are already derived.
//! Filters only read these records; nothing here is mutated after
//! construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ids::{MonsterId, MoveId, TeamId};

/// Latitude/longitude of the sighting. Used upstream to derive `distance`;
/// carried along for downstream substitution only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Meters from the fixed reference point, or `Unknown` when the distance
/// could not be computed (e.g. no reference point configured).
///
/// `Unknown` is a real sentinel, not a default: the distance predicate has
/// an explicit policy for it (see `filters::common`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distance {
    Known(f64),
    Unknown,
}

impl Distance {
    pub fn known(&self) -> Option<f64> {
        match *self {
            Distance::Known(meters) => Some(meters),
            Distance::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Distance::Unknown)
    }
}

/// Fields that only exist once a boss is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidInfo {
    pub monster: MonsterId,
    pub quick_move: MoveId,
    pub charge_move: MoveId,
    pub cp: u32,
}

/// What kind of spawn this sighting describes.
///
/// An egg is active until it hatches (`start_time`); a raid boss is active
/// until it expires (`end_time`). That asymmetry drives
/// [`Sighting::seconds_left`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SightingKind {
    Egg,
    Raid(RaidInfo),
}

/// One sighting event, as handed over by the ingestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub kind: SightingKind,
    pub location: GeoPoint,
    pub distance: Distance,
    /// Gym/location name; empty when the source didn't provide one.
    #[serde(default)]
    pub name: String,
    /// Park name; empty when the location is not in a park.
    #[serde(default)]
    pub park: String,
    /// Controlling team, when known.
    pub team: Option<TeamId>,
    /// Sponsorship id. `None` and `Some(0)` both mean "not sponsored";
    /// any positive value means sponsored.
    pub sponsor: Option<u32>,
    /// Hatch time (egg) / spawn time (raid), Unix seconds.
    pub start_time: i64,
    /// Expiry of the boss's availability, Unix seconds.
    pub end_time: i64,
    /// Difficulty tier, 1-5.
    pub level: u8,
    /// EX-raid eligibility of the gym; `None` when the source didn't say.
    pub is_ex_eligible: Option<bool>,
    /// Opaque producer-supplied values, passed through for downstream
    /// substitution. Never matched against here.
    #[serde(default)]
    pub custom_data: HashMap<String, String>,
}

impl Sighting {
    /// Seconds until this sighting stops being actionable, measured from
    /// `now`. Eggs count down to their hatch (`start_time`), raids to their
    /// expiry (`end_time`). Negative once the reference timestamp has
    /// passed.
    pub fn seconds_left(&self, now: i64) -> i64 {
        match self.kind {
            SightingKind::Egg => self.start_time - now,
            SightingKind::Raid(_) => self.end_time - now,
        }
    }

    pub fn is_egg(&self) -> bool {
        matches!(self.kind, SightingKind::Egg)
    }

    /// Raid payload, if this sighting is a raid.
    pub fn raid(&self) -> Option<&RaidInfo> {
        match &self.kind {
            SightingKind::Raid(info) => Some(info),
            SightingKind::Egg => None,
        }
    }
}
