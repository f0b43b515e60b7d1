//! Supporting rolls for battle resolution.
//!
//! Each attack roll is one d20. A natural 1 always misses and a natural 20
//! always hits; anything else is a threshold comparison. The player's roll
//! hits on `>=`, the monster's physical and magic rolls need a strict `>`.

use super::types::{Initiative, MonsterInstance};
use crate::character::attributes::modifier;
use crate::character::derived_stats::CombatSnapshot;
use crate::core::constants::*;
use crate::dice::DiceSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub roll: u32,
    pub hit: bool,
}

impl AttackRoll {
    pub fn is_natural_hit(&self) -> bool {
        self.roll == NATURAL_HIT
    }
}

/// Resolves a d20 with the natural 1 / natural 20 short circuits, deferring
/// to `threshold` for every other face.
fn d20_check(roll: u32, threshold: impl Fn(u32) -> bool) -> bool {
    match roll {
        NATURAL_MISS => false,
        NATURAL_HIT => true,
        _ => threshold(roll),
    }
}

/// `roll + level + MIG_mod >= 10 + DEF_mod(monster) + monster level`
pub fn player_hit_threshold(roll: u32, player: &CombatSnapshot, monster: &MonsterInstance) -> bool {
    let attack = roll as i64 + player.level as i64 + player.might_modifier as i64;
    let defense = HIT_THRESHOLD_BASE + modifier(monster.defense) as i64 + monster.level as i64;
    attack >= defense
}

/// `roll + monster level + ATK_mod > 10 + DEF_mod(player)`
pub fn monster_hit_threshold(roll: u32, monster: &MonsterInstance, player: &CombatSnapshot) -> bool {
    let attack = roll as i64 + monster.level as i64 + modifier(monster.attack) as i64;
    let defense = HIT_THRESHOLD_BASE + modifier(player.physical_defense) as i64;
    attack > defense
}

/// `roll + monster level + MATK_mod > 10 + MDEF_mod(player)`
pub fn magic_hit_threshold(roll: u32, monster: &MonsterInstance, player: &CombatSnapshot) -> bool {
    let attack = roll as i64 + monster.level as i64 + modifier(monster.magic_attack) as i64;
    let defense = HIT_THRESHOLD_BASE + modifier(player.magic_defense) as i64;
    attack > defense
}

pub fn player_attack_roll(
    dice: &mut dyn DiceSource,
    player: &CombatSnapshot,
    monster: &MonsterInstance,
) -> AttackRoll {
    let roll = dice.d20();
    AttackRoll {
        roll,
        hit: d20_check(roll, |r| player_hit_threshold(r, player, monster)),
    }
}

pub fn monster_attack_roll(
    dice: &mut dyn DiceSource,
    monster: &MonsterInstance,
    player: &CombatSnapshot,
) -> AttackRoll {
    let roll = dice.d20();
    AttackRoll {
        roll,
        hit: d20_check(roll, |r| monster_hit_threshold(r, monster, player)),
    }
}

pub fn magic_attack_roll(
    dice: &mut dyn DiceSource,
    monster: &MonsterInstance,
    player: &CombatSnapshot,
) -> AttackRoll {
    let roll = dice.d20();
    AttackRoll {
        roll,
        hit: d20_check(roll, |r| magic_hit_threshold(r, monster, player)),
    }
}

/// Whether an attack roll threatens a critical hit.
pub fn threatens_crit(attack: &AttackRoll, threat_range: u32) -> bool {
    attack.hit && attack.roll >= threat_range
}

/// Second d20 confirming a threatened critical hit.
///
/// A natural 1 never confirms, a roll inside the threat range always does,
/// anything else re-applies the attack's own hit comparison.
pub fn crit_confirm(
    dice: &mut dyn DiceSource,
    threat_range: u32,
    hit_threshold: impl Fn(u32) -> bool,
) -> AttackRoll {
    let roll = dice.d20();
    let hit = if roll == NATURAL_MISS {
        false
    } else if roll >= threat_range {
        true
    } else {
        hit_threshold(roll)
    };
    AttackRoll { roll, hit }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterMove {
    Physical,
    Magic,
}

/// Monster AI: casts only when it can pay for the spell, and then only on
/// a d20 above 16.
pub fn monster_decision(dice: &mut dyn DiceSource, mp: u32, mp_power: u32) -> MonsterMove {
    if mp == 0 || mp < mp_power {
        return MonsterMove::Physical;
    }
    if dice.d20() > MONSTER_MAGIC_ROLL_THRESHOLD {
        MonsterMove::Magic
    } else {
        MonsterMove::Physical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleeCheck {
    pub player_roll: u32,
    pub monster_roll: u32,
    pub escaped: bool,
}

/// Opposed d20s. Ties go to the monster.
pub fn flee_check(dice: &mut dyn DiceSource) -> FleeCheck {
    let player_roll = dice.d20();
    let monster_roll = dice.d20();
    let escaped = match player_roll {
        NATURAL_HIT => true,
        NATURAL_MISS => false,
        _ => player_roll > monster_roll,
    };
    FleeCheck {
        player_roll,
        monster_roll,
        escaped,
    }
}

/// Opening initiative. The monster's dexterity is `10 + d(level) * 2`.
pub fn initiative_roll(dice: &mut dyn DiceSource, player_dex: u32, monster_level: u32) -> Initiative {
    let monster_dex = MONSTER_BASE_DEXTERITY + dice.uniform(1, monster_level.max(1)) * 2;
    let player_total = dice.d20() + modifier(player_dex);
    let monster_total = dice.d20() + modifier(monster_dex);
    Initiative {
        player_total,
        monster_total,
        player_first: player_total >= monster_total,
    }
}

/// Player weapon damage before crits and elements: `1..=power`.
pub fn player_damage_roll(dice: &mut dyn DiceSource, power: u32) -> u32 {
    dice.uniform(1, power.max(1))
}

/// Monster damage: `1..=power` plus half the monster's level (rounded up),
/// halved again (rounded up) when the player is defending.
pub fn monster_damage_roll(dice: &mut dyn DiceSource, power: u32, level: u32, defending: bool) -> u32 {
    let damage = dice.uniform(1, power.max(1)) + level.div_ceil(2);
    if defending {
        damage.div_ceil(2)
    } else {
        damage
    }
}
