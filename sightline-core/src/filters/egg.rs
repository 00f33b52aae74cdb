//! Egg filter — the common predicate set plus an egg level window.

use crate::aliases::{AliasPolicy, AliasTable};
use crate::config::{opt_level, ConfigError, RuleMap};
use crate::domain::Sighting;

use super::common::CommonRules;
use super::SightingFilter;

/// Acceptance rules for incubating eggs.
#[derive(Debug, Clone)]
pub struct EggFilter {
    name: String,
    rules: CommonRules,
    min_egg_lvl: u8,
    max_egg_lvl: u8,
}

impl EggFilter {
    /// Build from a rule mapping; unknown alias names are skipped.
    pub fn from_config(
        name: impl Into<String>,
        config: &RuleMap,
        aliases: &AliasTable,
    ) -> Result<Self, ConfigError> {
        Self::build(name.into(), config, aliases, AliasPolicy::Lenient)
    }

    /// Build with strict alias validation: unknown names reject the
    /// configuration instead of silently matching nothing.
    pub fn from_config_strict(
        name: impl Into<String>,
        config: &RuleMap,
        aliases: &AliasTable,
    ) -> Result<Self, ConfigError> {
        Self::build(name.into(), config, aliases, AliasPolicy::Strict)
    }

    fn build(
        name: String,
        config: &RuleMap,
        aliases: &AliasTable,
        policy: AliasPolicy,
    ) -> Result<Self, ConfigError> {
        let filter = Self {
            rules: CommonRules::from_config(config, aliases, policy)?,
            min_egg_lvl: opt_level(config, "min_egg_lvl")?.unwrap_or(1),
            max_egg_lvl: opt_level(config, "max_egg_lvl")?.unwrap_or(5),
            name,
        };
        tracing::debug!(filter = %filter.name, "egg filter constructed");
        Ok(filter)
    }
}

impl SightingFilter for EggFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_at(&self, sighting: &Sighting, now: i64) -> bool {
        if !sighting.is_egg() {
            return false;
        }
        if sighting.level < self.min_egg_lvl || sighting.level > self.max_egg_lvl {
            return false;
        }
        self.rules.check(sighting, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, GeoPoint, MonsterId, MoveId, RaidInfo, SightingKind};
    use serde_json::json;
    use std::collections::HashMap;

    const NOW: i64 = 1_600_000_000;

    fn egg(level: u8) -> Sighting {
        Sighting {
            kind: SightingKind::Egg,
            location: GeoPoint { lat: 0.0, lon: 0.0 },
            distance: Distance::Unknown,
            name: "unknown".to_string(),
            park: String::new(),
            team: None,
            sponsor: None,
            start_time: NOW + 1800,
            end_time: NOW + 4500,
            level,
            is_ex_eligible: None,
            custom_data: HashMap::new(),
        }
    }

    fn filter(pairs: &[(&str, serde_json::Value)]) -> EggFilter {
        let map: RuleMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        EggFilter::from_config("test", &map, &AliasTable::default()).unwrap()
    }

    #[test]
    fn level_window_is_inclusive() {
        let f = filter(&[("min_egg_lvl", json!(2)), ("max_egg_lvl", json!(4))]);
        for level in [2, 3, 4] {
            assert!(f.check_at(&egg(level), NOW), "level {level} should pass");
        }
        for level in [1, 5] {
            assert!(!f.check_at(&egg(level), NOW), "level {level} should fail");
        }
    }

    #[test]
    fn level_window_defaults_to_full_range() {
        let f = filter(&[]);
        for level in 1..=5 {
            assert!(f.check_at(&egg(level), NOW));
        }
    }

    #[test]
    fn rejects_raid_sightings() {
        let f = filter(&[]);
        let mut s = egg(5);
        s.kind = SightingKind::Raid(RaidInfo {
            monster: MonsterId(150),
            quick_move: MoveId(123),
            charge_move: MoveId(123),
            cp: 12345,
        });
        assert!(!f.check_at(&s, NOW));
    }

    #[test]
    fn name_reports_the_configured_identifier() {
        assert_eq!(filter(&[]).name(), "test");
    }
}
