//! Character record and class data as seen by the battle engine.

use super::attributes::{AttributeType, Attributes};
use crate::core::constants::{DEFAULT_DAILY_BATTLES, NEUTRAL_ELEMENT};
use crate::store::PlayerId;
use serde::{Deserialize, Serialize};

/// Per-level growth for a character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub id: u32,
    pub name: String,
    pub hp_per_level: u32,
    pub mp_per_level: u32,
    pub armor_per_level: u32,
}

/// The character-store record the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: PlayerId,
    pub name: String,
    pub attributes: Attributes,
    /// Natural armor class before equipment.
    pub armor: u32,
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
    pub level: u32,
    pub xp: u64,
    pub sp: u64,
    pub gold: u64,
    pub class_id: u32,
    pub element_id: u32,
    pub battles_remaining: u32,
    pub is_dead: bool,
    pub is_battling: bool,
    pub victories: u32,
    pub defeats: u32,
    pub flees: u32,
}

impl Character {
    /// A fresh level 1 character with full hp/mp.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        attributes: Attributes,
        class_id: u32,
        hp_max: u32,
        mp_max: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
            armor: 0,
            hp: hp_max,
            hp_max,
            mp: mp_max,
            mp_max,
            level: 1,
            xp: 0,
            sp: 0,
            gold: 0,
            class_id,
            element_id: NEUTRAL_ELEMENT,
            battles_remaining: DEFAULT_DAILY_BATTLES,
            is_dead: false,
            is_battling: false,
            victories: 0,
            defeats: 0,
            flees: 0,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_element(mut self, element_id: u32) -> Self {
        self.element_id = element_id;
        self
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    pub fn stat(&self, attr: AttributeType) -> u32 {
        self.attributes.get(attr)
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead && self.hp > 0
    }

    pub fn heal_full(&mut self) {
        self.hp = self.hp_max;
        self.mp = self.mp_max;
    }

    /// Brings a dead character back at full health.
    pub fn revive(&mut self) {
        self.is_dead = false;
        self.heal_full();
    }
}
