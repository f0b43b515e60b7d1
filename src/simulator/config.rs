//! Simulation configuration.

use crate::core::config::BattleConfig;

/// Configuration for a batch of simulated battles.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to fight
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level of the simulated player
    pub player_level: u32,

    /// Class used for hp/mp growth and level-ups
    pub class_id: u32,

    /// Rounds after which a battle is abandoned as a stalemate
    pub max_rounds: u32,

    /// Defend instead of attacking while hp is at or below this percent
    pub defend_below_pct: u32,

    pub battle: BattleConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per battle)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            player_level: 1,
            class_id: 1,
            max_rounds: 200,
            defend_below_pct: 0,
            battle: BattleConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small reproducible batch for quick balance checks.
    pub fn quick(player_level: u32) -> Self {
        Self {
            num_runs: 100,
            seed: Some(42),
            player_level,
            ..Default::default()
        }
    }
}
