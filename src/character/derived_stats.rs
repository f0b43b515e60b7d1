use super::attributes::{modifier, AttributeType};
use super::types::Character;
use crate::core::config::BattleConfig;
use crate::core::constants::*;
use crate::items::EquipmentBonuses;
use serde::{Deserialize, Serialize};

/// Physical Attack = ceil(MIG × 1.5 + CON_mod)
pub fn physical_attack(might: u32, con: u32) -> u32 {
    (might as f64 * PHYSICAL_ATTACK_FACTOR + modifier(con) as f64).ceil() as u32
}

/// Magic Attack = ceil(INT × 1.75)
pub fn magic_attack(int: u32) -> u32 {
    (int as f64 * MAGIC_ATTACK_FACTOR).ceil() as u32
}

/// Physical Defense = ceil(AC × 1.5 + DEX_mod), before equipment.
pub fn physical_defense(armor: u32, dex: u32) -> u32 {
    (armor as f64 * PHYSICAL_DEFENSE_FACTOR + modifier(dex) as f64).ceil() as u32
}

/// Magic Defense = ceil(WIS × 1.75), before equipment.
pub fn magic_defense(wis: u32) -> u32 {
    (wis as f64 * MAGIC_DEFENSE_FACTOR).ceil() as u32
}

/// Weapon numbers frozen at battle start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Upper bound of a damage roll.
    pub power: u32,
    pub threat_range: u32,
    pub crit_multiplier: u32,
    pub armed: bool,
}

/// The challenger's combat numbers, computed once when a battle starts.
///
/// Only hp and mp change afterwards. Equipment swaps are blocked while a
/// character is battling, so nothing here needs recomputing mid-fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
    pub physical_attack: u32,
    pub physical_defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
    pub hp_regen: u32,
    pub mp_regen: u32,
    pub level: u32,
    pub might_modifier: u32,
    pub dexterity: u32,
    pub weapon: WeaponStats,
    /// Element the player attacks with (weapon element, else own element).
    pub attack_element: u32,
    /// Element the player defends with.
    pub element: u32,
}

impl CombatSnapshot {
    pub fn calculate(character: &Character, gear: &EquipmentBonuses, config: &BattleConfig) -> Self {
        let might = character.stat(AttributeType::Might);
        let dex = character.stat(AttributeType::Dexterity);
        let con = character.stat(AttributeType::Constitution);
        let int = character.stat(AttributeType::Intelligence);
        let wis = character.stat(AttributeType::Wisdom);

        let physical_attack = physical_attack(might, con);

        // Unarmed fighters hit for up to half their physical attack
        let weapon = match gear.weapon_power {
            Some(power) => WeaponStats {
                power: power.max(1),
                threat_range: gear
                    .weapon_crit_range
                    .unwrap_or(config.default_threat_range),
                crit_multiplier: gear
                    .weapon_crit_multiplier
                    .unwrap_or(config.default_crit_multiplier),
                armed: true,
            },
            None => WeaponStats {
                power: (physical_attack / 2).max(1),
                threat_range: config.default_threat_range,
                crit_multiplier: config.default_crit_multiplier,
                armed: false,
            },
        };

        Self {
            hp: character.hp.min(character.hp_max),
            hp_max: character.hp_max,
            mp: character.mp.min(character.mp_max),
            mp_max: character.mp_max,
            physical_attack,
            physical_defense: physical_defense(character.armor, dex) + gear.defense,
            magic_attack: magic_attack(int) + gear.magic_attack,
            magic_defense: magic_defense(wis) + gear.magic_defense,
            hp_regen: gear.hp_regen,
            mp_regen: gear.mp_regen,
            level: character.level,
            might_modifier: modifier(might),
            dexterity: dex,
            weapon,
            attack_element: gear.weapon_element.unwrap_or(character.element_id),
            element: character.element_id,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Applies per-turn regeneration, capped at the maximums.
    pub fn regenerate(&mut self) -> (u32, u32) {
        let hp_before = self.hp;
        let mp_before = self.mp;
        self.hp = (self.hp + self.hp_regen).min(self.hp_max);
        self.mp = (self.mp + self.mp_regen).min(self.mp_max);
        (self.hp - hp_before, self.mp - mp_before)
    }
}
