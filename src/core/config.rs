//! Battle tuning configuration.

use super::constants::*;
use crate::error::{RepositoryError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formula used to scale a monster template to the player's level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMethod {
    /// `((modifier - 100) / 100) * level_gap + 1`
    #[default]
    Weighted,
    /// `(modifier / 100) * level_gap`
    Linear,
}

/// Tunable numbers for the battle engine.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Percentage driving monster scaling (150 = +50% per level gap when weighted).
    pub stats_modifier: u32,
    pub scaling_method: ScalingMethod,
    /// Floor for scaled monster hp.
    pub scaled_hp_floor: u32,
    /// Floor for every other scaled monster stat.
    pub scaled_stat_floor: u32,

    /// Percent of the level gap awarded as xp when fighting far above one's level.
    pub exp_modifier: u32,
    /// Percent of the level gap awarded as gold when fighting far above one's level.
    pub reward_modifier: u32,
    pub exp_min: u32,
    pub exp_max: u32,
    pub reward_min: u32,
    pub reward_max: u32,

    /// Threat range used when no weapon is equipped.
    pub default_threat_range: u32,
    /// Crit multiplier used when no weapon is equipped.
    pub default_crit_multiplier: u32,
    /// Keep the player alive through the monster's first attack.
    pub first_round_protection: bool,
    /// Minutes without a turn before an in-progress battle is expired.
    pub max_idle_minutes: i64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            stats_modifier: DEFAULT_STATS_MODIFIER,
            scaling_method: ScalingMethod::Weighted,
            scaled_hp_floor: SCALED_HP_FLOOR,
            scaled_stat_floor: SCALED_STAT_FLOOR,
            exp_modifier: DEFAULT_EXP_MODIFIER,
            reward_modifier: DEFAULT_REWARD_MODIFIER,
            exp_min: DEFAULT_EXP_MIN,
            exp_max: DEFAULT_EXP_MAX,
            reward_min: DEFAULT_REWARD_MIN,
            reward_max: DEFAULT_REWARD_MAX,
            default_threat_range: DEFAULT_THREAT_RANGE,
            default_crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            first_round_protection: true,
            max_idle_minutes: DEFAULT_MAX_IDLE_MINUTES,
        }
    }
}

impl BattleConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RepositoryError::Serialization(e.to_string()).into())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(RepositoryError::from)?;
        Self::from_json_str(&contents)
    }

    pub fn max_idle(&self) -> Duration {
        Duration::minutes(self.max_idle_minutes)
    }

    /// Config for fighting with the linear scaling formula.
    pub fn linear(stats_modifier: u32) -> Self {
        Self {
            stats_modifier,
            scaling_method: ScalingMethod::Linear,
            ..Default::default()
        }
    }
}
