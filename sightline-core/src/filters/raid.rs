//! Raid filter — the common predicate set plus boss identity, moveset,
//! CP, and raid level predicates.

use std::collections::HashSet;

use crate::aliases::{AliasPolicy, AliasTable, Namespace};
use crate::config::{opt_level, opt_u32, ConfigError, RuleMap};
use crate::domain::{MonsterId, MoveId, RaidInfo, Sighting};

use super::common::CommonRules;
use super::SightingFilter;

/// Acceptance rules for active raid bosses.
///
/// Monster and move lists are resolved to canonical id sets at
/// construction; evaluation is set membership only.
#[derive(Debug, Clone)]
pub struct RaidFilter {
    name: String,
    rules: CommonRules,
    monsters: Option<HashSet<MonsterId>>,
    monsters_exclude: Option<HashSet<MonsterId>>,
    quick_moves: Option<HashSet<MoveId>>,
    charge_moves: Option<HashSet<MoveId>>,
    min_raid_lvl: u8,
    max_raid_lvl: u8,
    min_cp: Option<u32>,
    max_cp: Option<u32>,
}

impl RaidFilter {
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
            monsters: aliases.resolve_key(config, "monsters", Namespace::Monster, policy)?,
            monsters_exclude: aliases.resolve_key(
                config,
                "monsters_exclude",
                Namespace::Monster,
                policy,
            )?,
            quick_moves: aliases.resolve_key(config, "quick_moves", Namespace::Move, policy)?,
            charge_moves: aliases.resolve_key(config, "charge_moves", Namespace::Move, policy)?,
            min_raid_lvl: opt_level(config, "min_raid_lvl")?.unwrap_or(1),
            max_raid_lvl: opt_level(config, "max_raid_lvl")?.unwrap_or(5),
            min_cp: opt_u32(config, "min_cp")?,
            max_cp: opt_u32(config, "max_cp")?,
            name,
        };
        tracing::debug!(filter = %filter.name, "raid filter constructed");
        Ok(filter)
    }

    fn raid_ok(&self, raid: &RaidInfo) -> bool {
        if let Some(set) = &self.monsters {
            if !set.contains(&raid.monster) {
                return false;
            }
        }
        // Exclusion can veto an otherwise-included boss.
        if let Some(set) = &self.monsters_exclude {
            if set.contains(&raid.monster) {
                return false;
            }
        }
        if let Some(set) = &self.quick_moves {
            if !set.contains(&raid.quick_move) {
                return false;
            }
        }
        if let Some(set) = &self.charge_moves {
            if !set.contains(&raid.charge_move) {
                return false;
            }
        }
        if let Some(min) = self.min_cp {
            if raid.cp < min {
                return false;
            }
        }
        if let Some(max) = self.max_cp {
            if raid.cp > max {
                return false;
            }
        }
        true
    }
}

impl SightingFilter for RaidFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_at(&self, sighting: &Sighting, now: i64) -> bool {
        let Some(raid) = sighting.raid() else {
            return false;
        };
        if sighting.level < self.min_raid_lvl || sighting.level > self.max_raid_lvl {
            return false;
        }
        self.raid_ok(raid) && self.rules.check(sighting, now)
    }
}
