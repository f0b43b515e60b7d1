//! Victory rewards.

use super::types::MonsterInstance;
use crate::core::config::BattleConfig;
use crate::core::constants::REWARD_LEVEL_DIFF_THRESHOLD;
use crate::dice::DiceSource;
use serde::{Deserialize, Serialize};

/// xp, gold and sp earned from one victory, before level-up processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSpoils {
    pub xp: u32,
    pub gold: u32,
    pub sp: u32,
}

/// Rewards for beating `monster` at `player_level`.
///
/// Fighting more than one level above yourself pays a fixed amount scaled by
/// the level gap; anything else rolls within the configured ranges. xp and
/// gold are at least 1. sp is the monster's own value.
pub fn calculate_rewards(
    dice: &mut dyn DiceSource,
    player_level: u32,
    monster: &MonsterInstance,
    config: &BattleConfig,
) -> BattleSpoils {
    let level_diff = monster.level as i64 - player_level as i64;

    let (xp, gold) = if level_diff > REWARD_LEVEL_DIFF_THRESHOLD {
        (
            (level_diff * config.exp_modifier as i64 / 100) as u32,
            (level_diff * config.reward_modifier as i64 / 100) as u32,
        )
    } else {
        (
            dice.rand_range(config.exp_min, config.exp_max),
            dice.rand_range(config.reward_min, config.reward_max),
        )
    };

    BattleSpoils {
        xp: xp.max(1),
        gold: gold.max(1),
        sp: monster.sp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::RngDice;

    fn monster_at(level: u32) -> MonsterInstance {
        MonsterInstance {
            id: 1,
            name: "Ogre".into(),
            level,
            hp: 40,
            hp_max: 40,
            mp: 0,
            mp_max: 0,
            attack: 10,
            defense: 5,
            magic_attack: 1,
            magic_resistance: 1,
            mp_power: 0,
            element_id: 0,
            custom_spell: None,
            sp: 3,
        }
    }

    #[test]
    fn test_rewards_within_ranges_for_small_gap() {
        let config = BattleConfig::default();
        let mut dice = RngDice::seeded(5);
        for player_level in [5, 6, 9] {
            for _ in 0..100 {
                let spoils = calculate_rewards(&mut dice, player_level, &monster_at(6), &config);
                assert!((config.exp_min..=config.exp_max).contains(&spoils.xp));
                assert!((config.reward_min..=config.reward_max).contains(&spoils.gold));
                assert_eq!(spoils.sp, 3);
            }
        }
    }

    #[test]
    fn test_rewards_for_large_gap_are_exact() {
        let config = BattleConfig {
            exp_modifier: 250,
            reward_modifier: 130,
            ..Default::default()
        };
        let mut dice = RngDice::seeded(5);
        let spoils = calculate_rewards(&mut dice, 2, &monster_at(6), &config);
        assert_eq!(spoils.xp, 10); // floor(4 * 2.5)
        assert_eq!(spoils.gold, 5); // floor(4 * 1.3)
    }

    #[test]
    fn test_large_gap_rewards_floor_at_one() {
        let config = BattleConfig {
            exp_modifier: 10,
            reward_modifier: 0,
            ..Default::default()
        };
        let mut dice = RngDice::seeded(5);
        let spoils = calculate_rewards(&mut dice, 1, &monster_at(3), &config);
        assert_eq!(spoils.xp, 1);
        assert_eq!(spoils.gold, 1);
    }

    #[test]
    fn test_zero_ranges_floor_at_one() {
        let config = BattleConfig {
            exp_min: 0,
            exp_max: 0,
            reward_min: 0,
            reward_max: 0,
            ..Default::default()
        };
        let mut dice = RngDice::seeded(5);
        let spoils = calculate_rewards(&mut dice, 4, &monster_at(4), &config);
        assert_eq!(spoils.xp, 1);
        assert_eq!(spoils.gold, 1);
    }
}
