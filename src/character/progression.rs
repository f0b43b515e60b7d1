//! Experience thresholds and level-up gains.

use super::attributes::AttributeType;
use super::types::{Character, CharacterClass};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Total xp a character needs to advance past `level`.
///
/// Strictly increasing in `level`.
pub fn xp_threshold(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level.max(1) as f64, XP_CURVE_EXPONENT)) as u64
}

/// Outcome of a level-up check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub hp_gained: u32,
    pub mp_gained: u32,
    pub armor_gained: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// hp gain per level: class growth plus CON modifier, at least one.
pub fn hp_gain(class: &CharacterClass, con: u32) -> u32 {
    (class.hp_per_level + super::attributes::modifier(con)).max(MIN_HP_GAIN_PER_LEVEL)
}

/// mp gain per level: class growth plus INT modifier.
pub fn mp_gain(class: &CharacterClass, int: u32) -> u32 {
    class.mp_per_level + super::attributes::modifier(int)
}

/// Raises the character's level for as long as accumulated xp covers the
/// next threshold. Any level gained fully heals to the new maximums.
pub fn apply_level_ups(character: &mut Character, class: &CharacterClass) -> LevelUpReport {
    let mut report = LevelUpReport::default();
    let con = character.stat(AttributeType::Constitution);
    let int = character.stat(AttributeType::Intelligence);

    while character.xp >= xp_threshold(character.level) {
        character.level += 1;
        let hp = hp_gain(class, con);
        let mp = mp_gain(class, int);
        character.hp_max += hp;
        character.mp_max += mp;
        character.armor += class.armor_per_level;

        report.levels_gained += 1;
        report.hp_gained += hp;
        report.mp_gained += mp;
        report.armor_gained += class.armor_per_level;
    }

    if report.leveled_up() {
        character.heal_full();
    }
    report
}
