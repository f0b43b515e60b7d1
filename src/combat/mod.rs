//! Battle resolution: monster scaling, rolls, elements, rewards and the
//! turn engine that ties them together.

pub mod element;
pub mod engine;
pub mod rewards;
pub mod rolls;
pub mod scaling;
pub mod types;

pub use element::Element;
pub use engine::BattleEngine;
pub use rewards::{calculate_rewards, BattleSpoils};
pub use scaling::scale_monster;
pub use types::*;
