use super::{BattleRepository, CharacterStore, EquipmentProvider, PlayerId};
use crate::character::types::Character;
use crate::combat::types::{BattleId, BattleSession};
use crate::error::{RepositoryError, Result};
use crate::items::{Equipment, EquipmentBonuses};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    characters: HashMap<PlayerId, Character>,
    battles: HashMap<BattleId, BattleSession>,
    active: HashMap<PlayerId, BattleId>,
}

impl Tables {
    /// A finished battle's result is final.
    fn check_open(&self, battle: &BattleSession) -> Result<()> {
        match self.battles.get(&battle.id) {
            Some(stored) if !stored.is_active() => Err(RepositoryError::Conflict(battle.id).into()),
            _ => Ok(()),
        }
    }

    fn write_battle(&mut self, battle: &BattleSession) {
        if battle.is_active() {
            self.active.insert(battle.player_id, battle.id);
        } else if self.active.get(&battle.player_id) == Some(&battle.id) {
            self.active.remove(&battle.player_id);
        }
        self.battles.insert(battle.id, battle.clone());
    }
}

/// In-memory character and battle storage.
///
/// A single lock guards every table, so each call is one atomic
/// read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.lock() {
            for character in characters {
                tables.characters.insert(character.id, character);
            }
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned.into())
    }

    /// Number of stored battles, finished ones included.
    pub fn battle_count(&self) -> Result<usize> {
        Ok(self.lock()?.battles.len())
    }
}

impl CharacterStore for MemoryStore {
    fn load_character(&self, id: PlayerId) -> Result<Option<Character>> {
        Ok(self.lock()?.characters.get(&id).cloned())
    }

    fn save_character(&self, character: &Character) -> Result<()> {
        self.lock()?
            .characters
            .insert(character.id, character.clone());
        Ok(())
    }
}

impl BattleRepository for MemoryStore {
    fn load_battle(&self, id: BattleId) -> Result<Option<BattleSession>> {
        Ok(self.lock()?.battles.get(&id).cloned())
    }

    fn active_battle(&self, player: PlayerId) -> Result<Option<BattleSession>> {
        let tables = self.lock()?;
        Ok(tables
            .active
            .get(&player)
            .and_then(|id| tables.battles.get(id))
            .cloned())
    }

    fn active_battles(&self) -> Result<Vec<BattleSession>> {
        let tables = self.lock()?;
        Ok(tables
            .active
            .values()
            .filter_map(|id| tables.battles.get(id))
            .cloned()
            .collect())
    }

    fn begin_battle(&self, character: &Character, battle: &BattleSession) -> Result<()> {
        let mut tables = self.lock()?;
        if tables.active.contains_key(&battle.player_id) || tables.battles.contains_key(&battle.id) {
            return Err(RepositoryError::Conflict(battle.id).into());
        }
        tables.characters.insert(character.id, character.clone());
        tables.write_battle(battle);
        Ok(())
    }

    fn commit(&self, character: &Character, battle: &BattleSession) -> Result<()> {
        let mut tables = self.lock()?;
        tables.check_open(battle)?;
        tables.characters.insert(character.id, character.clone());
        tables.write_battle(battle);
        Ok(())
    }

    fn save_battle(&self, battle: &BattleSession) -> Result<()> {
        let mut tables = self.lock()?;
        tables.check_open(battle)?;
        tables.write_battle(battle);
        Ok(())
    }
}

/// In-memory equipment per player.
#[derive(Debug, Default)]
pub struct MemoryEquipment {
    loadouts: Mutex<HashMap<PlayerId, Equipment>>,
}

impl MemoryEquipment {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PlayerId, Equipment>>> {
        self.loadouts
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned.into())
    }

    pub fn set_equipment(&self, player: PlayerId, equipment: Equipment) -> Result<()> {
        self.lock()?.insert(player, equipment);
        Ok(())
    }

    pub fn equipment(&self, player: PlayerId) -> Result<Equipment> {
        Ok(self.lock()?.get(&player).cloned().unwrap_or_default())
    }
}

impl EquipmentProvider for MemoryEquipment {
    fn aggregate(&self, player: PlayerId) -> Result<EquipmentBonuses> {
        Ok(self
            .lock()?
            .get(&player)
            .map(Equipment::bonuses)
            .unwrap_or_default())
    }

    fn decrement_durability(&self, player: PlayerId) -> Result<()> {
        if let Some(equipment) = self.lock()?.get_mut(&player) {
            equipment.wear_all();
        }
        Ok(())
    }
}
