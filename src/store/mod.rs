//! Collaborator contracts consumed by the battle engine.
//!
//! Repositories hold data that changes during play (characters, battles,
//! equipment wear). Static game data lives behind [`Catalog`].

mod memory;

pub use memory::{MemoryEquipment, MemoryStore};

use crate::character::types::{Character, CharacterClass};
use crate::combat::element::Element;
use crate::combat::types::{BattleId, BattleSession, MonsterTemplate};
use crate::error::Result;
use crate::items::EquipmentBonuses;

pub type PlayerId = u64;

/// Character records.
pub trait CharacterStore: Send + Sync {
    fn load_character(&self, id: PlayerId) -> Result<Option<Character>>;

    fn save_character(&self, character: &Character) -> Result<()>;
}

/// Battle sessions.
///
/// `begin_battle` and `commit` write a character and a battle together;
/// implementations must make both writes visible at once or not at all.
pub trait BattleRepository: Send + Sync {
    fn load_battle(&self, id: BattleId) -> Result<Option<BattleSession>>;

    /// The player's in-progress battle, if any.
    fn active_battle(&self, player: PlayerId) -> Result<Option<BattleSession>>;

    /// Every in-progress battle.
    fn active_battles(&self) -> Result<Vec<BattleSession>>;

    /// Stores a new battle and the character that started it. Fails with
    /// `RepositoryError::Conflict` if the player already has an in-progress
    /// battle.
    fn begin_battle(&self, character: &Character, battle: &BattleSession) -> Result<()>;

    /// Stores the result of one turn. Fails with `RepositoryError::Conflict`
    /// if the stored battle has already finished.
    fn commit(&self, character: &Character, battle: &BattleSession) -> Result<()>;

    /// Stores a battle on its own, for sessions whose character record is
    /// gone. Same conflict rule as `commit`.
    fn save_battle(&self, battle: &BattleSession) -> Result<()>;
}

/// Aggregated bonuses from a player's equipped items.
pub trait EquipmentProvider: Send + Sync {
    fn aggregate(&self, player: PlayerId) -> Result<EquipmentBonuses>;

    /// One point of wear on every equipped item. Called once per battle start.
    fn decrement_durability(&self, player: PlayerId) -> Result<()>;
}

/// Read-only game data.
pub trait Catalog: Send + Sync {
    fn monsters(&self) -> &[MonsterTemplate];

    fn element(&self, id: u32) -> Option<&Element>;

    fn class(&self, id: u32) -> Option<&CharacterClass>;

    /// Monsters a player of `level` may be matched against.
    fn monsters_up_to(&self, level: u32) -> Vec<&MonsterTemplate> {
        self.monsters().iter().filter(|m| m.level <= level).collect()
    }
}
