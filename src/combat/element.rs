//! The elemental damage wheel.
//!
//! Relations are plain configuration data: nothing forces them to be
//! symmetric or to form a consistent cycle. The multiplier for an attack is
//! always read from the defender's record.

use crate::core::constants::NEUTRAL_ELEMENT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: u32,
    pub name: String,
    pub color: String,
    /// The element this one is strong against.
    pub oppose_strong: u32,
    /// Damage percent taken from an attacker of `oppose_weak`.
    pub oppose_strong_dmg: u32,
    /// Damage percent taken from an attacker of the same element.
    pub oppose_same_dmg: u32,
    /// The element this one is weak against.
    pub oppose_weak: u32,
    /// Damage percent taken from an attacker of `oppose_strong`.
    pub oppose_weak_dmg: u32,
}

/// Damage multiplier for an attack of `attacker` element landing on a
/// defender whose element record is `defender`.
///
/// Total over every pair, including the neutral element.
pub fn multiplier(attacker: u32, defender: &Element) -> f64 {
    if attacker == NEUTRAL_ELEMENT || defender.id == NEUTRAL_ELEMENT {
        1.0
    } else if attacker == defender.oppose_weak {
        defender.oppose_strong_dmg as f64 / 100.0
    } else if attacker == defender.id {
        defender.oppose_same_dmg as f64 / 100.0
    } else if attacker == defender.oppose_strong {
        defender.oppose_weak_dmg as f64 / 100.0
    } else {
        1.0
    }
}

/// Scales raw damage by a multiplier, rounding up.
pub fn apply_multiplier(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier).ceil() as u32
}
