//! Level-relative monster scaling.

use super::types::MonsterTemplate;
use super::types::MonsterInstance;
use crate::core::config::{BattleConfig, ScalingMethod};

/// Scale factor for a monster of `monster_level` fighting a player of
/// `player_level`.
///
/// Monsters at or above the player's level are never scaled. Battle
/// candidates are already filtered to `monster_level <= player_level`.
pub fn scale_factor(
    player_level: u32,
    monster_level: u32,
    stats_modifier: u32,
    method: ScalingMethod,
) -> f64 {
    if monster_level >= player_level {
        return 1.0;
    }
    let gap = (player_level - monster_level) as f64;
    let modifier = stats_modifier as f64;
    match method {
        ScalingMethod::Weighted => ((modifier - 100.0) / 100.0) * gap + 1.0,
        ScalingMethod::Linear => (modifier / 100.0) * gap,
    }
}

/// `ceil(base * scale)`, never below `floor`.
pub fn scale_stat(base: u32, scale: f64, floor: u32) -> u32 {
    let scaled = (base as f64 * scale).ceil();
    if scaled.is_finite() && scaled > floor as f64 {
        scaled.min(u32::MAX as f64) as u32
    } else {
        floor
    }
}

/// Builds the battle copy of a template for a player of `player_level`.
///
/// hp is floored at `config.scaled_hp_floor`, every other scaled stat at
/// `config.scaled_stat_floor`. A monster without mana keeps none, so it
/// never gains a spell by scaling.
pub fn scale_monster(template: &MonsterTemplate, player_level: u32, config: &BattleConfig) -> MonsterInstance {
    let scale = scale_factor(
        player_level,
        template.level,
        config.stats_modifier,
        config.scaling_method,
    );
    let floor = config.scaled_stat_floor;
    let hp = scale_stat(template.hp, scale, config.scaled_hp_floor);
    let mp = match template.mp {
        0 => 0,
        base => scale_stat(base, scale, floor),
    };

    MonsterInstance {
        id: template.id,
        name: template.name.clone(),
        level: template.level,
        hp,
        hp_max: hp,
        mp,
        mp_max: mp,
        attack: scale_stat(template.attack, scale, floor),
        defense: scale_stat(template.defense, scale, floor),
        magic_attack: scale_stat(template.magic_attack, scale, floor),
        magic_resistance: scale_stat(template.magic_resistance, scale, floor),
        mp_power: template.mp_power,
        element_id: template.element_id,
        custom_spell: template.custom_spell.clone(),
        sp: scale_stat(template.sp, scale, floor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn goblin() -> MonsterTemplate {
        MonsterTemplate {
            id: 7,
            name: "Goblin".into(),
            level: 2,
            hp: 20,
            mp: 5,
            attack: 6,
            defense: 4,
            magic_attack: 3,
            magic_resistance: 2,
            mp_power: 3,
            sp: 2,
            element_id: 1,
            custom_spell: Some("Rusty Hex".into()),
        }
    }

    #[test]
    fn test_equal_levels_scale_one() {
        assert_eq!(scale_factor(5, 5, 150, ScalingMethod::Weighted), 1.0);
        assert_eq!(scale_factor(5, 5, 150, ScalingMethod::Linear), 1.0);
        assert_eq!(scale_factor(3, 9, 150, ScalingMethod::Linear), 1.0);
    }

    #[test]
    fn test_weighted_formula() {
        // 0.5 * 3 + 1
        assert_eq!(scale_factor(5, 2, 150, ScalingMethod::Weighted), 2.5);
        assert_eq!(scale_factor(5, 2, 100, ScalingMethod::Weighted), 1.0);
    }

    #[test]
    fn test_linear_formula() {
        // 1.5 * 3
        assert_eq!(scale_factor(5, 2, 150, ScalingMethod::Linear), 4.5);
        assert_eq!(scale_factor(5, 2, 0, ScalingMethod::Linear), 0.0);
    }

    #[test]
    fn test_scale_monster_weighted() {
        let monster = scale_monster(&goblin(), 5, &BattleConfig::default());
        assert_eq!(monster.hp, 50);
        assert_eq!(monster.hp_max, 50);
        assert_eq!(monster.mp, 13); // ceil(12.5)
        assert_eq!(monster.attack, 15);
        assert_eq!(monster.defense, 10);
        assert_eq!(monster.magic_attack, 8); // ceil(7.5)
        assert_eq!(monster.magic_resistance, 5);
        assert_eq!(monster.sp, 5);
        assert_eq!(monster.mp_power, 3); // not scaled
        assert_eq!(monster.custom_spell.as_deref(), Some("Rusty Hex"));
    }

    #[test]
    fn test_scale_monster_same_level_is_copy() {
        let monster = scale_monster(&goblin(), 2, &BattleConfig::default());
        assert_eq!(monster.hp, 20);
        assert_eq!(monster.attack, 6);
        assert_eq!(monster.sp, 2);
    }

    #[test]
    fn test_zero_scale_hits_floors() {
        let config = BattleConfig::linear(0);
        let monster = scale_monster(&goblin(), 5, &config);
        assert_eq!(monster.hp, 8);
        assert_eq!(monster.mp, 1);
        assert_eq!(monster.attack, 1);
        assert_eq!(monster.defense, 1);
        assert_eq!(monster.magic_attack, 1);
        assert_eq!(monster.magic_resistance, 1);
        assert_eq!(monster.sp, 1);
    }

    #[test]
    fn test_negative_scale_hits_floors() {
        // Weighted with a modifier below 100 shrinks the monster past zero
        let config = BattleConfig {
            stats_modifier: 10,
            ..Default::default()
        };
        let monster = scale_monster(&goblin(), 10, &config);
        assert_eq!(monster.hp, 8);
        assert_eq!(monster.attack, 1);
    }

    #[test]
    fn test_manaless_monster_stays_manaless() {
        let rat = MonsterTemplate {
            mp: 0,
            mp_power: 0,
            ..goblin()
        };
        for config in [BattleConfig::default(), BattleConfig::linear(0)] {
            let monster = scale_monster(&rat, 5, &config);
            assert_eq!(monster.mp, 0);
            assert_eq!(monster.mp_max, 0);
        }
    }

    proptest! {
        #[test]
        fn prop_equal_levels_always_one(level in 1u32..500, modifier in 0u32..1000) {
            prop_assert_eq!(scale_factor(level, level, modifier, ScalingMethod::Weighted), 1.0);
            prop_assert_eq!(scale_factor(level, level, modifier, ScalingMethod::Linear), 1.0);
        }

        #[test]
        fn prop_floors_always_hold(player in 1u32..100, modifier in 0u32..400, linear in any::<bool>()) {
            let config = BattleConfig {
                stats_modifier: modifier,
                scaling_method: if linear { ScalingMethod::Linear } else { ScalingMethod::Weighted },
                ..Default::default()
            };
            let monster = scale_monster(&goblin(), player, &config);
            prop_assert!(monster.hp >= 8);
            prop_assert!(monster.mp >= 1);
            prop_assert!(monster.attack >= 1);
            prop_assert!(monster.defense >= 1);
            prop_assert!(monster.sp >= 1);
        }
    }
}
