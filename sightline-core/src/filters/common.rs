//! The kind-independent predicate set shared by egg and raid filters.
//!
//! Every predicate is optional; unset means "don't care" and always
//! passes. All windows are inclusive at both ends. Cheap scalar checks run
//! before the substring scans.

use std::collections::HashSet;

use crate::aliases::{AliasPolicy, AliasTable, Namespace};
use crate::config::{opt_bool, opt_bound, opt_i64, opt_string_list, ConfigError, RuleMap};
use crate::domain::{Distance, Sighting, TeamId};

/// Parsed kind-independent rules. Built once from a [`RuleMap`], never
/// mutated afterward.
#[derive(Debug, Clone, Default)]
pub struct CommonRules {
    min_dist: Option<f64>,
    max_dist: Option<f64>,
    /// Explicit policy for sightings whose distance could not be computed.
    is_missing_info: Option<bool>,
    min_time_left: Option<i64>,
    max_time_left: Option<i64>,
    name_contains: Option<Vec<String>>,
    name_excludes: Option<Vec<String>>,
    park_contains: Option<Vec<String>>,
    park_excludes: Option<Vec<String>>,
    current_teams: Option<HashSet<TeamId>>,
    sponsored: Option<bool>,
    is_ex_eligible: Option<bool>,
}

impl CommonRules {
    pub fn from_config(
        config: &RuleMap,
        aliases: &AliasTable,
        policy: AliasPolicy,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            min_dist: opt_bound(config, "min_dist")?,
            max_dist: opt_bound(config, "max_dist")?,
            is_missing_info: opt_bool(config, "is_missing_info")?,
            min_time_left: opt_i64(config, "min_time_left")?,
            max_time_left: opt_i64(config, "max_time_left")?,
            name_contains: opt_string_list(config, "name_contains")?,
            name_excludes: opt_string_list(config, "name_excludes")?,
            park_contains: opt_string_list(config, "park_contains")?,
            park_excludes: opt_string_list(config, "park_excludes")?,
            current_teams: aliases.resolve_key(config, "current_teams", Namespace::Team, policy)?,
            sponsored: opt_bool(config, "sponsored")?,
            is_ex_eligible: opt_bool(config, "is_ex_eligible")?,
        })
    }

    /// True iff every configured predicate passes for this sighting.
    pub fn check(&self, sighting: &Sighting, now: i64) -> bool {
        if let Some(want) = self.sponsored {
            // None and Some(0) are both "not sponsored".
            let is_sponsored = sighting.sponsor.map_or(false, |id| id > 0);
            if is_sponsored != want {
                return false;
            }
        }

        if let Some(want) = self.is_ex_eligible {
            // An unknown eligibility never equals a configured boolean.
            if sighting.is_ex_eligible != Some(want) {
                return false;
            }
        }

        if let Some(teams) = &self.current_teams {
            match sighting.team {
                Some(team) if teams.contains(&team) => {}
                _ => return false,
            }
        }

        if !self.distance_ok(sighting.distance) {
            return false;
        }

        let seconds_left = sighting.seconds_left(now);
        if let Some(min) = self.min_time_left {
            if seconds_left < min {
                return false;
            }
        }
        if let Some(max) = self.max_time_left {
            if seconds_left > max {
                return false;
            }
        }

        substrings_ok(
            &sighting.name,
            self.name_contains.as_deref(),
            self.name_excludes.as_deref(),
        ) && substrings_ok(
            &sighting.park,
            self.park_contains.as_deref(),
            self.park_excludes.as_deref(),
        )
    }

    fn distance_ok(&self, distance: Distance) -> bool {
        match distance {
            Distance::Known(meters) => {
                let min = self.min_dist.unwrap_or(0.0);
                let max = self.max_dist.unwrap_or(f64::INFINITY);
                meters >= min && meters <= max
            }
            // An explicit flag wins either way. Without one, an unknown
            // distance fails only if a bound was actually configured —
            // otherwise the predicate is "don't care" and passes.
            Distance::Unknown => match self.is_missing_info {
                Some(accept_unknown) => accept_unknown,
                None => self.min_dist.is_none() && self.max_dist.is_none(),
            },
        }
    }
}

/// Inclusion passes on any configured substring; exclusion vetoes on any.
fn substrings_ok(haystack: &str, contains: Option<&[String]>, excludes: Option<&[String]>) -> bool {
    if let Some(patterns) = contains {
        if !patterns.iter().any(|p| haystack.contains(p.as_str())) {
            return false;
        }
    }
    if let Some(patterns) = excludes {
        if patterns.iter().any(|p| haystack.contains(p.as_str())) {
            return false;
        }
    }
    true
}
