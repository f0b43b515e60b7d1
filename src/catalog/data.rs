//! Built-in monsters, elements and classes.

use crate::character::types::CharacterClass;
use crate::combat::element::Element;
use crate::combat::types::MonsterTemplate;

fn element(
    id: u32,
    name: &str,
    color: &str,
    strong: (u32, u32),
    same_dmg: u32,
    weak: (u32, u32),
) -> Element {
    Element {
        id,
        name: name.to_string(),
        color: color.to_string(),
        oppose_strong: strong.0,
        oppose_strong_dmg: strong.1,
        oppose_same_dmg: same_dmg,
        oppose_weak: weak.0,
        oppose_weak_dmg: weak.1,
    }
}

/// Neutral plus a four-element wheel: Fire > Wind > Earth > Water > Fire.
pub fn default_elements() -> Vec<Element> {
    vec![
        element(0, "None", "#9e9e9e", (0, 100), 100, (0, 100)),
        element(1, "Fire", "#e53935", (3, 150), 50, (4, 75)),
        element(2, "Earth", "#8d6e63", (4, 150), 50, (3, 75)),
        element(3, "Wind", "#43a047", (2, 150), 50, (1, 75)),
        element(4, "Water", "#1e88e5", (1, 150), 50, (2, 75)),
    ]
}

pub fn default_classes() -> Vec<CharacterClass> {
    let class = |id, name: &str, hp, mp, armor| CharacterClass {
        id,
        name: name.to_string(),
        hp_per_level: hp,
        mp_per_level: mp,
        armor_per_level: armor,
    };
    vec![
        class(1, "Warrior", 8, 1, 1),
        class(2, "Mage", 4, 6, 0),
        class(3, "Rogue", 6, 2, 0),
        class(4, "Cleric", 6, 4, 1),
    ]
}

#[allow(clippy::too_many_arguments)]
fn monster(
    id: u32,
    name: &str,
    level: u32,
    hp: u32,
    mp: u32,
    attack: u32,
    defense: u32,
    magic: (u32, u32),
    mp_power: u32,
    sp: u32,
    element_id: u32,
    spell: Option<&str>,
) -> MonsterTemplate {
    MonsterTemplate {
        id,
        name: name.to_string(),
        level,
        hp,
        mp,
        attack,
        defense,
        magic_attack: magic.0,
        magic_resistance: magic.1,
        mp_power,
        sp,
        element_id,
        custom_spell: spell.map(str::to_string),
    }
}

pub fn default_monsters() -> Vec<MonsterTemplate> {
    vec![
        monster(1, "Giant Rat", 1, 10, 0, 4, 2, (1, 1), 0, 1, 0, None),
        monster(2, "Cave Bat", 1, 8, 2, 5, 3, (3, 2), 2, 1, 3, Some("Screech")),
        monster(3, "Goblin Scout", 2, 16, 4, 7, 5, (4, 3), 3, 1, 2, Some("Dirt Toss")),
        monster(4, "Ember Imp", 3, 18, 12, 6, 4, (10, 6), 4, 2, 1, Some("Cinder Bolt")),
        monster(5, "Bog Lurker", 4, 30, 6, 10, 8, (6, 5), 3, 2, 4, Some("Mire Grasp")),
        monster(6, "Stone Golem", 6, 55, 0, 14, 16, (2, 10), 0, 3, 2, None),
        monster(7, "Gale Harpy", 7, 38, 18, 13, 9, (14, 8), 6, 3, 3, Some("Razor Wind")),
        monster(8, "Frost Wraith", 9, 48, 30, 12, 10, (20, 14), 8, 4, 4, Some("Grave Chill")),
        monster(9, "Magma Drake", 12, 90, 40, 22, 18, (24, 16), 10, 6, 1, Some("Lava Breath")),
        monster(10, "Old Titan", 15, 140, 20, 28, 26, (18, 20), 10, 8, 2, Some("Earthshaker")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<u32> = default_monsters().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), default_monsters().len());
        let ids: HashSet<u32> = default_elements().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), default_elements().len());
    }

    #[test]
    fn test_monster_elements_exist() {
        let elements: HashSet<u32> = default_elements().iter().map(|e| e.id).collect();
        for m in default_monsters() {
            assert!(elements.contains(&m.element_id), "{} has unknown element", m.name);
        }
    }

    #[test]
    fn test_level_one_monsters_exist() {
        assert!(default_monsters().iter().any(|m| m.level == 1));
    }

    #[test]
    fn test_casters_can_afford_a_spell() {
        for m in default_monsters().iter().filter(|m| m.custom_spell.is_some()) {
            assert!(m.mp >= m.mp_power, "{} can never cast", m.name);
        }
    }
}
