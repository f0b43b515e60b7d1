//! Error types raised by the battle engine and its collaborators.

use crate::combat::types::BattleId;
use crate::store::PlayerId;
use thiserror::Error;

/// Malformed requests. Rejected before anything is read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("missing identifier: {0}")]
    MissingIdentifier(&'static str),

    #[error("'{0}' is not a valid battle id")]
    InvalidBattleId(String),
}

/// Requests that are well formed but illegal in the current game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("character {0} does not exist")]
    CharacterNotFound(PlayerId),

    #[error("character {0} is dead")]
    CharacterDead(PlayerId),

    #[error("character {0} is already in a battle")]
    AlreadyBattling(PlayerId),

    #[error("character {0} has no battles left today")]
    NoBattlesRemaining(PlayerId),

    #[error("no monster at or below level {0}")]
    NoEligibleMonster(u32),

    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("battle {0} has already finished")]
    BattleFinished(BattleId),
}

/// Catalog references that do not resolve. Never expected with consistent data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("element {0} is missing from the element table")]
    MissingElement(u32),

    #[error("class {0} is missing from the class table")]
    MissingClass(u32),
}

/// Failures inside a storage collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("battle {0} conflicts with an existing battle")]
    Conflict(BattleId),
}

#[derive(Debug, Error)]
pub enum BattleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BattleError {
    /// Validation and state errors describe an illegal request and are shown
    /// to the player; the rest are internal faults.
    pub fn is_player_visible(&self) -> bool {
        matches!(self, BattleError::Validation(_) | BattleError::State(_))
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_visible_categories() {
        let validation: BattleError = ValidationError::UnknownAction("dance".into()).into();
        let state: BattleError = StateError::CharacterDead(3).into();
        let integrity: BattleError = DataIntegrityError::MissingElement(9).into();
        let repo: BattleError = RepositoryError::LockPoisoned.into();

        assert!(validation.is_player_visible());
        assert!(state.is_player_visible());
        assert!(!integrity.is_player_visible());
        assert!(!repo.is_player_visible());
    }

    #[test]
    fn test_messages() {
        let err: BattleError = ValidationError::UnknownAction("dance".into()).into();
        assert_eq!(err.to_string(), "unknown action 'dance'");

        let err: BattleError = StateError::NoBattlesRemaining(7).into();
        assert_eq!(err.to_string(), "character 7 has no battles left today");
    }
}
