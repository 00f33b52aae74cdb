//! Filter evaluators — decide whether a sighting is forwarded for
//! notification.
//!
//! One filter instance is built per configured rule and reused across many
//! sightings. Evaluation is a pure function of (configuration, sighting,
//! now): no I/O, no cross-event memory, no mutation. A configured
//! predicate must pass; an unset predicate always passes.
//!
//! # Architecture invariant
//! The egg and raid evaluators share the kind-independent predicate set by
//! composition ([`common::CommonRules`]), not by a base type. Each
//! evaluator owns only its kind-specific predicates.

pub mod common;
pub mod egg;
pub mod raid;

use crate::domain::Sighting;

/// Trait for sighting filters.
///
/// Implementations are immutable after construction and safe for
/// concurrent read-only evaluation. Replacing a rule set means building a
/// new filter and swapping the whole object.
pub trait SightingFilter: Send + Sync {
    /// Identifier for diagnostics (the rule's configured name).
    fn name(&self) -> &str;

    /// Evaluate against an injected timestamp. This is the entry point for
    /// tests and batch replays, where the clock must be controlled.
    fn check_at(&self, sighting: &Sighting, now: i64) -> bool;

    /// Evaluate against the wall clock, sampled once per call.
    fn check(&self, sighting: &Sighting) -> bool {
        self.check_at(sighting, chrono::Utc::now().timestamp())
    }
}

pub use common::CommonRules;
pub use egg::EggFilter;
pub use raid::RaidFilter;
