use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 7] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Helmet,
            EquipmentSlot::Gloves,
            EquipmentSlot::Boots,
            EquipmentSlot::Amulet,
            EquipmentSlot::Ring,
        ]
    }
}

/// Combat properties of a weapon. Only meaningful on the weapon slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub power: u32,
    #[serde(default)]
    pub bonus_power: u32,
    /// Lowest natural roll that threatens a critical hit.
    pub crit_range: u32,
    pub crit_multiplier: u32,
    /// Element id; `None` uses the wielder's own element.
    #[serde(default)]
    pub element: Option<u32>,
}

/// Flat bonuses an item grants while equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemBonuses {
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
    pub hp_regen: u32,
    pub mp_regen: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub slot: EquipmentSlot,
    pub name: String,
    pub durability: u32,
    pub max_durability: u32,
    #[serde(default)]
    pub bonuses: ItemBonuses,
    #[serde(default)]
    pub weapon: Option<WeaponProfile>,
}

impl Item {
    pub fn new(slot: EquipmentSlot, name: impl Into<String>, durability: u32) -> Self {
        Self {
            slot,
            name: name.into(),
            durability,
            max_durability: durability,
            bonuses: ItemBonuses::default(),
            weapon: None,
        }
    }

    pub fn with_bonuses(mut self, bonuses: ItemBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponProfile) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Broken items stay equipped but grant nothing.
    pub fn is_broken(&self) -> bool {
        self.durability == 0
    }

    pub fn wear(&mut self) {
        self.durability = self.durability.saturating_sub(1);
    }
}
