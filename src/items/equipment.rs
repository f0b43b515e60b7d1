use super::types::{EquipmentSlot, Item};
use serde::{Deserialize, Serialize};

/// Everything the battle engine needs to know about a player's gear.
///
/// Weapon fields are `None` when no working weapon is equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentBonuses {
    pub defense: u32,
    pub weapon_power: Option<u32>,
    pub weapon_crit_range: Option<u32>,
    pub weapon_crit_multiplier: Option<u32>,
    pub weapon_element: Option<u32>,
    pub hp_regen: u32,
    pub mp_regen: u32,
    pub magic_attack: u32,
    pub magic_defense: u32,
}

/// Player equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub helmet: Option<Item>,
    pub gloves: Option<Item>,
    pub boots: Option<Item>,
    pub amulet: Option<Item>,
    pub ring: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    fn get_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }

    /// Puts the item in its own slot, returning whatever was there.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        self.get_mut(item.slot).replace(item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.get_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.armor,
            &self.helmet,
            &self.gloves,
            &self.boots,
            &self.amulet,
            &self.ring,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// One point of wear on every equipped item.
    pub fn wear_all(&mut self) {
        for slot in EquipmentSlot::all() {
            if let Some(item) = self.get_mut(slot) {
                item.wear();
            }
        }
    }

    /// Sums the bonuses of every equipped item that is not broken.
    pub fn bonuses(&self) -> EquipmentBonuses {
        let mut total = EquipmentBonuses::default();
        for item in self.iter_equipped().filter(|i| !i.is_broken()) {
            total.defense += item.bonuses.defense;
            total.magic_attack += item.bonuses.magic_attack;
            total.magic_defense += item.bonuses.magic_defense;
            total.hp_regen += item.bonuses.hp_regen;
            total.mp_regen += item.bonuses.mp_regen;

            if item.slot == EquipmentSlot::Weapon {
                if let Some(weapon) = &item.weapon {
                    total.weapon_power = Some(weapon.power + weapon.bonus_power);
                    total.weapon_crit_range = Some(weapon.crit_range);
                    total.weapon_crit_multiplier = Some(weapon.crit_multiplier);
                    total.weapon_element = weapon.element;
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{ItemBonuses, WeaponProfile};
    use super::*;

    fn sword() -> Item {
        Item::new(EquipmentSlot::Weapon, "Flame Sword", 10).with_weapon(WeaponProfile {
            power: 8,
            bonus_power: 2,
            crit_range: 19,
            crit_multiplier: 3,
            element: Some(1),
        })
    }

    fn plate() -> Item {
        Item::new(EquipmentSlot::Armor, "Plate", 5).with_bonuses(ItemBonuses {
            defense: 6,
            magic_defense: 2,
            hp_regen: 1,
            ..Default::default()
        })
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.bonuses(), EquipmentBonuses::default());
    }

    #[test]
    fn test_equip_replaces_slot() {
        let mut eq = Equipment::new();
        assert!(eq.equip(sword()).is_none());
        let old = eq.equip(sword());
        assert_eq!(old.map(|i| i.name), Some("Flame Sword".to_string()));
        assert_eq!(eq.iter_equipped().count(), 1);
        assert!(eq.unequip(EquipmentSlot::Weapon).is_some());
        assert!(eq.get(EquipmentSlot::Weapon).is_none());
    }

    #[test]
    fn test_bonuses_sum_items_and_weapon() {
        let mut eq = Equipment::new();
        eq.equip(sword());
        eq.equip(plate());

        let bonuses = eq.bonuses();
        assert_eq!(bonuses.defense, 6);
        assert_eq!(bonuses.magic_defense, 2);
        assert_eq!(bonuses.hp_regen, 1);
        assert_eq!(bonuses.weapon_power, Some(10));
        assert_eq!(bonuses.weapon_crit_range, Some(19));
        assert_eq!(bonuses.weapon_crit_multiplier, Some(3));
        assert_eq!(bonuses.weapon_element, Some(1));
    }

    #[test]
    fn test_broken_items_grant_nothing() {
        let mut eq = Equipment::new();
        eq.equip(Item::new(EquipmentSlot::Armor, "Rags", 1).with_bonuses(ItemBonuses {
            defense: 3,
            ..Default::default()
        }));
        assert_eq!(eq.bonuses().defense, 3);

        eq.wear_all();
        assert_eq!(eq.bonuses().defense, 0);
    }

    #[test]
    fn test_wear_all_touches_every_item() {
        let mut eq = Equipment::new();
        eq.equip(sword());
        eq.equip(plate());
        eq.wear_all();
        assert_eq!(eq.weapon.as_ref().unwrap().durability, 9);
        assert_eq!(eq.armor.as_ref().unwrap().durability, 4);
    }
}
