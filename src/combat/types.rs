use crate::character::derived_stats::CombatSnapshot;
use crate::error::ValidationError;
use crate::store::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type BattleId = Uuid;

/// Immutable catalog entry a battle monster is scaled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_resistance: u32,
    /// mp spent per spell cast.
    pub mp_power: u32,
    pub sp: u32,
    #[serde(default)]
    pub element_id: u32,
    #[serde(default)]
    pub custom_spell: Option<String>,
}

/// A scaled monster living for the length of one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic_attack: u32,
    pub magic_resistance: u32,
    pub mp_power: u32,
    pub element_id: u32,
    pub custom_spell: Option<String>,
    pub sp: u32,
}

impl MonsterInstance {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn spend_mp(&mut self, amount: u32) {
        self.mp = self.mp.saturating_sub(amount);
    }

    /// Label for the monster's spell in battle messages.
    pub fn spell_name(&self) -> &str {
        self.custom_spell.as_deref().unwrap_or("a spell")
    }
}

/// What the player does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack,
    Defend,
    Flee,
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(Action::Attack),
            "defend" => Ok(Action::Defend),
            "flee" => Ok(Action::Flee),
            "" => Err(ValidationError::MissingIdentifier("action")),
            other => Err(ValidationError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Flee => "flee",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    InProgress,
    Victory,
    Defeat,
    Fled,
}

impl BattleResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BattleResult::InProgress)
    }
}

/// Opening initiative roll. Shown to the player only; the player's action
/// always resolves before the monster's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub player_total: u32,
    pub monster_total: u32,
    pub player_first: bool,
}

/// One battle between a player and a monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    pub id: BattleId,
    pub player_id: PlayerId,
    pub turn: u32,
    pub result: BattleResult,
    pub challenger: CombatSnapshot,
    pub monster: MonsterInstance,
    pub initiative: Initiative,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BattleSession {
    pub fn is_active(&self) -> bool {
        !self.result.is_terminal()
    }

    /// Sets the terminal result. Has no effect once a result is recorded.
    pub fn finish(&mut self, result: BattleResult, now: DateTime<Utc>) {
        if self.is_active() && result.is_terminal() {
            self.result = result;
            self.finished_at = Some(now);
            self.last_activity = now;
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            battle_id: self.id,
            round: self.turn,
            result: self.result,
            player: Vitals::of_player(&self.challenger),
            monster: Vitals::of_monster(&self.monster),
            monster_name: self.monster.name.clone(),
            monster_level: self.monster.level,
            initiative: self.initiative,
        }
    }
}

/// Current and maximum hp/mp of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
}

impl Vitals {
    pub fn of_player(snapshot: &CombatSnapshot) -> Self {
        Self {
            hp: snapshot.hp,
            hp_max: snapshot.hp_max,
            mp: snapshot.mp,
            mp_max: snapshot.mp_max,
        }
    }

    pub fn of_monster(monster: &MonsterInstance) -> Self {
        Self {
            hp: monster.hp,
            hp_max: monster.hp_max,
            mp: monster.mp,
            mp_max: monster.mp_max,
        }
    }
}

/// State of a battle as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub battle_id: BattleId,
    pub round: u32,
    pub result: BattleResult,
    pub player: Vitals,
    pub monster: Vitals,
    pub monster_name: String,
    pub monster_level: u32,
    pub initiative: Initiative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
    pub sp: u32,
    pub leveled_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_level: Option<u32>,
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum TurnOutcome {
    Ongoing,
    Victory { rewards: Rewards },
    Defeat,
    Fled,
}

impl TurnOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TurnOutcome::Ongoing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub battle_id: BattleId,
    pub round: u32,
    pub action: Action,
    pub messages: Vec<String>,
    pub player: Vitals,
    pub monster: Vitals,
    /// Mirrors `outcome.is_terminal()` for clients reading raw JSON.
    pub terminal: bool,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

impl TurnResult {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn rewards(&self) -> Option<&Rewards> {
        match &self.outcome {
            TurnOutcome::Victory { rewards } => Some(rewards),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime() -> MonsterInstance {
        MonsterInstance {
            id: 1,
            name: "Slime".into(),
            level: 1,
            hp: 10,
            hp_max: 10,
            mp: 4,
            mp_max: 4,
            attack: 3,
            defense: 2,
            magic_attack: 2,
            magic_resistance: 1,
            mp_power: 2,
            element_id: 0,
            custom_spell: None,
            sp: 1,
        }
    }

    #[test]
    fn test_monster_take_damage_no_underflow() {
        let mut m = slime();
        m.take_damage(4);
        assert_eq!(m.hp, 6);
        assert!(m.is_alive());
        m.take_damage(40);
        assert_eq!(m.hp, 0);
        assert!(!m.is_alive());
    }

    #[test]
    fn test_spell_name_fallback() {
        let mut m = slime();
        assert_eq!(m.spell_name(), "a spell");
        m.custom_spell = Some("Acid Splash".into());
        assert_eq!(m.spell_name(), "Acid Splash");
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("attack".parse::<Action>(), Ok(Action::Attack));
        assert_eq!(" Defend ".parse::<Action>(), Ok(Action::Defend));
        assert_eq!("FLEE".parse::<Action>(), Ok(Action::Flee));
        assert_eq!(
            "dance".parse::<Action>(),
            Err(ValidationError::UnknownAction("dance".into()))
        );
        assert_eq!(
            "".parse::<Action>(),
            Err(ValidationError::MissingIdentifier("action"))
        );
        assert_eq!(Action::Flee.to_string(), "flee");
    }

    #[test]
    fn test_result_terminality() {
        assert!(!BattleResult::InProgress.is_terminal());
        assert!(BattleResult::Victory.is_terminal());
        assert!(BattleResult::Defeat.is_terminal());
        assert!(BattleResult::Fled.is_terminal());
    }

    #[test]
    fn test_outcome_serializes_with_result_tag() {
        let outcome = TurnOutcome::Victory {
            rewards: Rewards {
                xp: 10,
                gold: 4,
                sp: 1,
                leveled_up: false,
                new_level: None,
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"], "victory");
        assert_eq!(json["rewards"]["xp"], 10);
        assert!(json["rewards"].get("new_level").is_none());

        let json = serde_json::to_value(TurnOutcome::Ongoing).unwrap();
        assert_eq!(json["result"], "ongoing");
    }
}
