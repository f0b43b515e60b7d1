use crate::core::constants::MODIFIER_BASELINE;
use crate::dice::DiceSource;
use serde::{Deserialize, Serialize};

pub const NUM_ATTRIBUTES: usize = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Might,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Might,
            AttributeType::Dexterity,
            AttributeType::Constitution,
            AttributeType::Intelligence,
            AttributeType::Wisdom,
            AttributeType::Charisma,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Ability modifier: +1 for every two points from 12 upward, never negative.
///
/// 11 and below give 0, 12-13 give +1, 14-15 give +2, and so on.
pub fn modifier(stat: u32) -> u32 {
    if stat < MODIFIER_BASELINE {
        0
    } else {
        (stat - MODIFIER_BASELINE) / 2 + 1
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// All attributes at 10.
    pub fn new() -> Self {
        Self {
            values: [10; NUM_ATTRIBUTES],
        }
    }

    /// Rolls every attribute with 4d6-drop-lowest.
    pub fn roll(dice: &mut dyn DiceSource) -> Self {
        let mut attrs = Self::new();
        for attr in AttributeType::all() {
            attrs.set(attr, dice.roll_stat());
        }
        attrs
    }

    pub fn from_values(might: u32, dex: u32, con: u32, int: u32, wis: u32, cha: u32) -> Self {
        Self {
            values: [might, dex, con, int, wis, cha],
        }
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn increment(&mut self, attr: AttributeType) {
        self.values[attr.index()] = self.values[attr.index()].saturating_add(1);
    }

    pub fn modifier(&self, attr: AttributeType) -> u32 {
        modifier(self.get(attr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngDice, ScriptedDice};
    use proptest::prelude::*;

    #[test]
    fn test_new_attributes() {
        let attrs = Attributes::new();
        for attr_type in AttributeType::all() {
            assert_eq!(attrs.get(attr_type), 10);
        }
    }

    #[test]
    fn test_get_set() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeType::Might, 16);
        assert_eq!(attrs.get(AttributeType::Might), 16);
        assert_eq!(attrs.get(AttributeType::Dexterity), 10);
    }

    #[test]
    fn test_increment_saturates_at_max() {
        let mut attrs = Attributes::new();
        attrs.increment(AttributeType::Wisdom);
        assert_eq!(attrs.get(AttributeType::Wisdom), 11);

        attrs.set(AttributeType::Dexterity, u32::MAX);
        attrs.increment(AttributeType::Dexterity);
        assert_eq!(attrs.get(AttributeType::Dexterity), u32::MAX);
    }

    #[test]
    fn test_modifier_steps() {
        assert_eq!(modifier(0), 0);
        assert_eq!(modifier(8), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(12), 1);
        assert_eq!(modifier(13), 1);
        assert_eq!(modifier(14), 2);
        assert_eq!(modifier(15), 2);
        assert_eq!(modifier(18), 4);
        assert_eq!(modifier(20), 5);
    }

    #[test]
    fn test_attribute_modifier_uses_step_function() {
        let attrs = Attributes::from_values(16, 12, 9, 11, 20, 3);
        assert_eq!(attrs.modifier(AttributeType::Might), 3);
        assert_eq!(attrs.modifier(AttributeType::Dexterity), 1);
        assert_eq!(attrs.modifier(AttributeType::Constitution), 0);
        assert_eq!(attrs.modifier(AttributeType::Intelligence), 0);
        assert_eq!(attrs.modifier(AttributeType::Wisdom), 5);
        assert_eq!(attrs.modifier(AttributeType::Charisma), 0);
    }

    #[test]
    fn test_roll_uses_four_dice_per_attribute() {
        let mut dice = ScriptedDice::new([6; 24]);
        let attrs = Attributes::roll(&mut dice);
        for attr in AttributeType::all() {
            assert_eq!(attrs.get(attr), 18);
        }
        assert_eq!(dice.consumed(), 24);
    }

    #[test]
    fn test_rolled_attributes_in_range() {
        let mut dice = RngDice::seeded(11);
        let attrs = Attributes::roll(&mut dice);
        for attr in AttributeType::all() {
            assert!((3..=18).contains(&attrs.get(attr)));
        }
    }

    #[test]
    fn test_index_returns_unique_values() {
        for (i, attr) in AttributeType::all().iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
    }

    proptest! {
        #[test]
        fn prop_modifier_non_decreasing(stat in 0u32..1000) {
            prop_assert!(modifier(stat + 1) >= modifier(stat));
        }

        #[test]
        fn prop_modifier_steps_every_two_points(stat in 12u32..1000) {
            prop_assert_eq!(modifier(stat + 2), modifier(stat) + 1);
        }

        #[test]
        fn prop_modifier_zero_below_twelve(stat in 0u32..=11) {
            prop_assert_eq!(modifier(stat), 0);
        }
    }
}
