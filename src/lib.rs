//! Skirmish - turn-based monster battle engine.
//!
//! A player starts a battle against a monster picked from the catalog and
//! scaled to their level, then submits one action per turn until the battle
//! ends in victory, defeat or flight. Storage, equipment and game data sit
//! behind the traits in [`store`]; every random decision goes through a
//! [`dice::DiceSource`].

pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod dice;
pub mod error;
pub mod items;
pub mod simulator;
pub mod store;

pub use catalog::StaticCatalog;
pub use combat::{Action, BattleEngine, BattleResult, BattleSnapshot, TurnOutcome, TurnResult};
pub use crate::core::config::BattleConfig;
pub use dice::{DiceSource, RngDice, ScriptedDice};
pub use error::{BattleError, Result};
pub use store::{MemoryEquipment, MemoryStore, PlayerId};
