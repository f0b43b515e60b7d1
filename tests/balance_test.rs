//! Balance integration tests
//!
//! Statistical checks on rewards, scaling and progression using seeded dice.

use skirmish::catalog::data::default_monsters;
use skirmish::character::{apply_level_ups, xp_threshold, Attributes, Character, CharacterClass};
use skirmish::combat::scaling::{scale_factor, scale_monster};
use skirmish::combat::{calculate_rewards, MonsterInstance};
use skirmish::core::{ScalingMethod, DEFAULT_EXP_MAX, DEFAULT_EXP_MIN, DEFAULT_REWARD_MAX, DEFAULT_REWARD_MIN};
use skirmish::simulator::{run_simulation, SimConfig};
use skirmish::{BattleConfig, RngDice};

fn scaled(level: u32, monster_level: u32) -> MonsterInstance {
    let mut template = default_monsters()[0].clone();
    template.level = monster_level;
    scale_monster(&template, level, &BattleConfig::default())
}

// ============================================================================
// Rewards
// ============================================================================

#[test]
fn test_rewards_stay_in_configured_ranges() {
    let config = BattleConfig::default();
    let monster = scaled(4, 4);
    let mut dice = RngDice::seeded(2024);

    for _ in 0..2000 {
        let spoils = calculate_rewards(&mut dice, 4, &monster, &config);
        assert!((DEFAULT_EXP_MIN..=DEFAULT_EXP_MAX).contains(&spoils.xp));
        assert!((DEFAULT_REWARD_MIN..=DEFAULT_REWARD_MAX).contains(&spoils.gold));
        assert_eq!(spoils.sp, monster.sp);
    }
}

#[test]
fn test_rewards_cover_whole_range() {
    let config = BattleConfig::default();
    let monster = scaled(2, 1);
    let mut dice = RngDice::seeded(5);

    let xp: Vec<u32> = (0..3000)
        .map(|_| calculate_rewards(&mut dice, 2, &monster, &config).xp)
        .collect();
    assert!(xp.contains(&DEFAULT_EXP_MIN));
    assert!(xp.contains(&DEFAULT_EXP_MAX));
}

#[test]
fn test_stronger_monster_pays_fixed_rewards() {
    let config = BattleConfig::default();
    let mut dice = RngDice::seeded(1);
    // Five levels above the player: 5 * 100 / 100
    let monster = scaled(1, 6);
    let spoils = calculate_rewards(&mut dice, 1, &monster, &config);
    assert_eq!((spoils.xp, spoils.gold), (5, 5));
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_equal_levels_leave_monster_unscaled() {
    let template = default_monsters()[3].clone();
    let monster = scale_monster(&template, template.level, &BattleConfig::default());
    assert_eq!(monster.hp, template.hp.max(8));
    assert_eq!(monster.attack, template.attack);
    assert_eq!(monster.defense, template.defense);
    assert_eq!(monster.magic_attack, template.magic_attack);
    assert_eq!(monster.mp_power, template.mp_power);
}

#[test]
fn test_weighted_scaling_grows_with_level_gap() {
    let mut last = 1.0;
    for player_level in 2..20 {
        let factor = scale_factor(player_level, 1, 150, ScalingMethod::Weighted);
        assert!(factor > last);
        last = factor;
    }
    assert_eq!(scale_factor(3, 1, 150, ScalingMethod::Weighted), 2.0);
    assert_eq!(scale_factor(3, 1, 150, ScalingMethod::Linear), 3.0);
}

#[test]
fn test_scaled_monsters_respect_floors() {
    let config = BattleConfig::linear(1);
    for template in default_monsters() {
        let monster = scale_monster(&template, template.level + 1, &config);
        assert!(monster.hp >= 8);
        assert!(monster.attack >= 1);
        assert!(monster.defense >= 1);
        assert_eq!(monster.hp, monster.hp_max);
    }
}

// ============================================================================
// Progression
// ============================================================================

#[test]
fn test_large_reward_grants_several_levels() {
    let class = CharacterClass {
        id: 1,
        name: "Warrior".to_string(),
        hp_per_level: 8,
        mp_per_level: 1,
        armor_per_level: 1,
    };
    let mut c = Character::new(1, "Lucky", Attributes::new(), 1, 20, 4);
    c.xp = xp_threshold(3);

    let report = apply_level_ups(&mut c, &class);
    assert_eq!(report.levels_gained, 3);
    assert_eq!(c.level, 4);
    assert_eq!(c.hp_max, 20 + 3 * 8);
    assert_eq!(c.hp, c.hp_max);
}

// ============================================================================
// Whole battles
// ============================================================================

#[test]
fn test_simulated_battles_all_resolve() {
    let config = SimConfig {
        num_runs: 200,
        seed: Some(99),
        player_level: 3,
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config).unwrap();

    assert_eq!(report.num_runs, 200);
    assert_eq!(report.stalemates, 0);
    assert_eq!(report.fled, 0);
    assert_eq!(report.victories + report.defeats, 200);
    assert!(report.per_monster.values().all(|t| t.level <= 3));
}
