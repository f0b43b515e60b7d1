//! Battle balance simulator.
//!
//! Fights batches of full battles through [`BattleEngine`](crate::combat::BattleEngine)
//! against the built-in catalog and aggregates the outcomes, so balance
//! numbers come from the same code path real battles use.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRecord, MonsterTally, SimOutcome, SimReport};
pub use runner::{run_simulation, starting_character};
