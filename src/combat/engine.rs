//! Turn resolution engine.
//!
//! A battle moves `NONE -> ACTIVE -> {VICTORY, DEFEAT, FLED}`. Every call
//! loads the battle and character, validates the request, resolves the whole
//! exchange on owned copies, and writes the result back with one atomic
//! store call. A rejected request touches nothing.
//!
//! The engine holds no locks of its own. It relies on the store for
//! single-writer-per-player; battles of different players share no state.

use super::element::{self, apply_multiplier};
use super::rewards::calculate_rewards;
use super::rolls::*;
use super::scaling::scale_monster;
use super::types::*;
use crate::character::derived_stats::CombatSnapshot;
use crate::character::progression::apply_level_ups;
use crate::character::types::{Character, CharacterClass};
use crate::core::config::BattleConfig;
use crate::core::constants::NEUTRAL_ELEMENT;
use crate::dice::DiceSource;
use crate::error::{
    BattleError, DataIntegrityError, RepositoryError, Result, StateError, ValidationError,
};
use crate::store::{BattleRepository, Catalog, CharacterStore, EquipmentProvider, PlayerId};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Element multipliers for both directions of a battle.
#[derive(Debug, Clone, Copy)]
struct ElementalMatchup {
    player_to_monster: f64,
    monster_to_player: f64,
}

pub struct BattleEngine<S, E, C> {
    store: S,
    equipment: E,
    catalog: C,
    config: BattleConfig,
}

impl<S, E, C> BattleEngine<S, E, C>
where
    S: CharacterStore + BattleRepository,
    E: EquipmentProvider,
    C: Catalog,
{
    pub fn new(store: S, equipment: E, catalog: C, config: BattleConfig) -> Self {
        Self {
            store,
            equipment,
            catalog,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn equipment(&self) -> &E {
        &self.equipment
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Starts a battle against a random monster at or below the player's level.
    pub fn start_battle(&self, player: PlayerId, dice: &mut dyn DiceSource) -> Result<BattleSnapshot> {
        self.start_battle_at(player, Utc::now(), dice)
    }

    pub fn start_battle_at(
        &self,
        player: PlayerId,
        now: DateTime<Utc>,
        dice: &mut dyn DiceSource,
    ) -> Result<BattleSnapshot> {
        self.begin(player, now, dice).inspect_err(|err| {
            warn!(player, %err, "battle start rejected");
        })
    }

    fn begin(
        &self,
        player: PlayerId,
        now: DateTime<Utc>,
        dice: &mut dyn DiceSource,
    ) -> Result<BattleSnapshot> {
        let mut character = self.load_character(player)?;
        if character.is_dead {
            return Err(StateError::CharacterDead(player).into());
        }
        if character.is_battling || self.store.active_battle(player)?.is_some() {
            return Err(StateError::AlreadyBattling(player).into());
        }
        if character.battles_remaining == 0 {
            return Err(StateError::NoBattlesRemaining(player).into());
        }

        let candidates = self.catalog.monsters_up_to(character.level);
        if candidates.is_empty() {
            return Err(StateError::NoEligibleMonster(character.level).into());
        }
        let pick = dice.uniform(0, candidates.len() as u32 - 1) as usize;
        let monster = scale_monster(candidates[pick], character.level, &self.config);

        let gear = self.equipment.aggregate(player)?;
        let challenger = CombatSnapshot::calculate(&character, &gear, &self.config);
        // Element records must resolve before anything is written
        self.matchup(challenger.attack_element, challenger.element, monster.element_id)?;
        let initiative = initiative_roll(dice, challenger.dexterity, monster.level);

        character.battles_remaining -= 1;
        character.is_battling = true;

        let battle = BattleSession {
            id: Uuid::new_v4(),
            player_id: player,
            turn: 0,
            result: BattleResult::InProgress,
            challenger,
            monster,
            initiative,
            started_at: now,
            last_activity: now,
            finished_at: None,
        };

        self.store
            .begin_battle(&character, &battle)
            .map_err(|err| match err {
                BattleError::Repository(RepositoryError::Conflict(_)) => {
                    StateError::AlreadyBattling(player).into()
                }
                other => other,
            })?;
        // The battle is already stored; wear is best effort from here
        if let Err(err) = self.equipment.decrement_durability(player) {
            warn!(player, battle = %battle.id, %err, "equipment wear failed");
        }

        info!(
            player,
            battle = %battle.id,
            monster = %battle.monster.name,
            monster_level = battle.monster.level,
            player_first = initiative.player_first,
            "battle started"
        );
        Ok(battle.snapshot())
    }

    /// The player's in-progress battle, if any.
    pub fn current_battle(&self, player: PlayerId) -> Result<Option<BattleSnapshot>> {
        Ok(self.store.active_battle(player)?.map(|b| b.snapshot()))
    }

    /// Parses a raw request before resolving it.
    pub fn handle_turn_request(
        &self,
        player: PlayerId,
        battle_id: &str,
        action: &str,
        dice: &mut dyn DiceSource,
    ) -> Result<TurnResult> {
        let (battle_id, action) = parse_turn_request(battle_id, action).inspect_err(|err| {
            warn!(player, %err, "malformed turn request");
        })?;
        self.process_turn(player, battle_id, action, dice)
    }

    /// Resolves one player action and the monster's response.
    pub fn process_turn(
        &self,
        player: PlayerId,
        battle_id: BattleId,
        action: Action,
        dice: &mut dyn DiceSource,
    ) -> Result<TurnResult> {
        self.process_turn_at(player, battle_id, action, Utc::now(), dice)
    }

    pub fn process_turn_at(
        &self,
        player: PlayerId,
        battle_id: BattleId,
        action: Action,
        now: DateTime<Utc>,
        dice: &mut dyn DiceSource,
    ) -> Result<TurnResult> {
        self.resolve_turn(player, battle_id, action, now, dice)
            .inspect_err(|err| {
                warn!(player, battle = %battle_id, %action, %err, "turn rejected");
            })
    }

    fn resolve_turn(
        &self,
        player: PlayerId,
        battle_id: BattleId,
        action: Action,
        now: DateTime<Utc>,
        dice: &mut dyn DiceSource,
    ) -> Result<TurnResult> {
        let mut battle = self
            .store
            .load_battle(battle_id)?
            .filter(|b| b.player_id == player)
            .ok_or(StateError::BattleNotFound(battle_id))?;
        if !battle.is_active() {
            return Err(StateError::BattleFinished(battle_id).into());
        }
        let mut character = self.load_character(player)?;
        let class = self.load_class(character.class_id)?.clone();
        let matchup = self.matchup(
            battle.challenger.attack_element,
            battle.challenger.element,
            battle.monster.element_id,
        )?;

        let mut turn = TurnLog::new(battle.turn);
        let mut defending = false;

        // Player phase
        match action {
            Action::Flee => {
                let check = flee_check(dice);
                debug!(player, battle = %battle_id, ?check, "flee check");
                if check.escaped {
                    turn.push(format!(
                        "You escape from the {} ({} vs {}).",
                        battle.monster.name, check.player_roll, check.monster_roll
                    ));
                    return self.finish_fled(character, battle, action, turn, now);
                }
                turn.push(format!(
                    "You try to flee but the {} blocks your way ({} vs {}).",
                    battle.monster.name, check.player_roll, check.monster_roll
                ));
            }
            Action::Defend => {
                defending = true;
                turn.push("You raise your guard.".to_string());
            }
            Action::Attack => {
                self.player_attack(&mut battle, matchup, dice, &mut turn);
            }
        }

        if !battle.monster.is_alive() {
            return self.finish_victory(character, &class, battle, action, turn, now, dice);
        }

        // Monster phase
        self.monster_attack(&mut battle, matchup, defending, dice, &mut turn);

        // Regeneration lands before the knockout check
        let (hp, mp) = battle.challenger.regenerate();
        if hp > 0 || mp > 0 {
            turn.push(format!("You regenerate {} hp and {} mp.", hp, mp));
        }

        if !battle.challenger.is_alive() {
            return self.finish_defeat(character, battle, action, turn, now);
        }

        battle.turn += 1;
        battle.last_activity = now;
        character.hp = battle.challenger.hp;
        character.mp = battle.challenger.mp;
        self.commit(&character, &battle)?;

        debug!(player, battle = %battle_id, round = battle.turn, "turn resolved");
        Ok(turn.into_result(&battle, action, TurnOutcome::Ongoing))
    }

    /// Closes every in-progress battle idle for longer than `max_idle` as
    /// fled. Returns the ids of the closed battles.
    ///
    /// A battle whose character record is gone is still closed. A battle
    /// that finished while the sweep ran is skipped.
    pub fn expire_idle_battles(&self, now: DateTime<Utc>, max_idle: Duration) -> Result<Vec<BattleId>> {
        let mut expired = Vec::new();
        for mut battle in self.store.active_battles()? {
            if now - battle.last_activity <= max_idle {
                continue;
            }
            battle.finish(BattleResult::Fled, now);
            let written = match self.store.load_character(battle.player_id)? {
                Some(mut character) => {
                    character.flees += 1;
                    character.is_battling = false;
                    character.hp = battle.challenger.hp;
                    character.mp = battle.challenger.mp;
                    self.store.commit(&character, &battle)
                }
                None => {
                    warn!(player = battle.player_id, battle = %battle.id, "idle battle has no character");
                    self.store.save_battle(&battle)
                }
            };
            match written {
                Ok(()) => {}
                Err(BattleError::Repository(RepositoryError::Conflict(_))) => {
                    debug!(battle = %battle.id, "idle battle finished during sweep");
                    continue;
                }
                Err(err) => return Err(err),
            }

            warn!(player = battle.player_id, battle = %battle.id, "idle battle expired");
            expired.push(battle.id);
        }
        Ok(expired)
    }

    /// [`expire_idle_battles`](Self::expire_idle_battles) with the
    /// configured idle limit.
    pub fn expire_stale_battles(&self, now: DateTime<Utc>) -> Result<Vec<BattleId>> {
        self.expire_idle_battles(now, self.config.max_idle())
    }

    /// Writes a turn's result. A battle finished by a concurrent turn
    /// rejects the write.
    fn commit(&self, character: &Character, battle: &BattleSession) -> Result<()> {
        self.store.commit(character, battle).map_err(|err| match err {
            BattleError::Repository(RepositoryError::Conflict(id)) => StateError::BattleFinished(id).into(),
            other => other,
        })
    }

    fn load_character(&self, player: PlayerId) -> Result<Character> {
        self.store
            .load_character(player)?
            .ok_or_else(|| StateError::CharacterNotFound(player).into())
    }

    fn load_class(&self, class_id: u32) -> Result<&CharacterClass> {
        self.catalog
            .class(class_id)
            .ok_or_else(|| DataIntegrityError::MissingClass(class_id).into())
    }

    fn element_multiplier(&self, attacker: u32, defender: u32) -> Result<f64> {
        if attacker == NEUTRAL_ELEMENT || defender == NEUTRAL_ELEMENT {
            return Ok(1.0);
        }
        let record = self
            .catalog
            .element(defender)
            .ok_or(DataIntegrityError::MissingElement(defender))?;
        Ok(element::multiplier(attacker, record))
    }

    fn matchup(&self, player_attack: u32, player_element: u32, monster_element: u32) -> Result<ElementalMatchup> {
        for id in [player_attack, player_element, monster_element] {
            if id != NEUTRAL_ELEMENT && self.catalog.element(id).is_none() {
                return Err(DataIntegrityError::MissingElement(id).into());
            }
        }
        Ok(ElementalMatchup {
            player_to_monster: self.element_multiplier(player_attack, monster_element)?,
            monster_to_player: self.element_multiplier(monster_element, player_element)?,
        })
    }

    fn player_attack(
        &self,
        battle: &mut BattleSession,
        matchup: ElementalMatchup,
        dice: &mut dyn DiceSource,
        turn: &mut TurnLog,
    ) {
        let challenger = &battle.challenger;
        let weapon = challenger.weapon;
        let attack = player_attack_roll(dice, challenger, &battle.monster);
        debug!(roll = attack.roll, hit = attack.hit, "player attack roll");

        if !attack.hit {
            turn.push(format!("You miss the {} (rolled {}).", battle.monster.name, attack.roll));
            return;
        }

        let mut damage = player_damage_roll(dice, weapon.power);
        let mut critical = false;
        if threatens_crit(&attack, weapon.threat_range) {
            let confirm = crit_confirm(dice, weapon.threat_range, |roll| {
                player_hit_threshold(roll, challenger, &battle.monster)
            });
            debug!(roll = confirm.roll, confirmed = confirm.hit, "crit confirmation");
            if confirm.hit {
                damage *= weapon.crit_multiplier.max(1);
                critical = true;
            }
        }
        damage = apply_multiplier(damage, matchup.player_to_monster);
        let damage = damage.max(1).min(battle.monster.hp);
        battle.monster.take_damage(damage);

        if critical {
            turn.push(format!(
                "Critical hit! You strike the {} for {} damage.",
                battle.monster.name, damage
            ));
        } else {
            turn.push(format!("You hit the {} for {} damage.", battle.monster.name, damage));
        }
        push_elemental_note(turn, matchup.player_to_monster);
    }

    fn monster_attack(
        &self,
        battle: &mut BattleSession,
        matchup: ElementalMatchup,
        defending: bool,
        dice: &mut dyn DiceSource,
        turn: &mut TurnLog,
    ) {
        let monster_move = monster_decision(dice, battle.monster.mp, battle.monster.mp_power);
        let (attack, power) = match monster_move {
            MonsterMove::Physical => (
                monster_attack_roll(dice, &battle.monster, &battle.challenger),
                battle.monster.attack,
            ),
            MonsterMove::Magic => {
                let mp_power = battle.monster.mp_power;
                battle.monster.spend_mp(mp_power);
                turn.push(format!(
                    "The {} casts {}!",
                    battle.monster.name,
                    battle.monster.spell_name()
                ));
                (
                    magic_attack_roll(dice, &battle.monster, &battle.challenger),
                    battle.monster.magic_attack,
                )
            }
        };
        debug!(?monster_move, roll = attack.roll, hit = attack.hit, "monster attack roll");

        if !attack.hit {
            turn.push(format!("The {} misses you.", battle.monster.name));
            return;
        }

        let raw = monster_damage_roll(dice, power, battle.monster.level, defending);
        let damage = apply_multiplier(raw, matchup.monster_to_player);
        let hp = battle.challenger.hp;
        let ceiling = if battle.turn == 0 && self.config.first_round_protection {
            hp.saturating_sub(1)
        } else {
            hp
        };
        let damage = damage.max(1).min(ceiling);
        battle.challenger.take_damage(damage);

        if defending {
            turn.push(format!(
                "The {} hits your guard for {} damage.",
                battle.monster.name, damage
            ));
        } else {
            turn.push(format!("The {} hits you for {} damage.", battle.monster.name, damage));
        }
        push_elemental_note(turn, matchup.monster_to_player);
    }

    fn finish_fled(
        &self,
        mut character: Character,
        mut battle: BattleSession,
        action: Action,
        turn: TurnLog,
        now: DateTime<Utc>,
    ) -> Result<TurnResult> {
        battle.finish(BattleResult::Fled, now);
        character.flees += 1;
        character.is_battling = false;
        character.hp = battle.challenger.hp;
        character.mp = battle.challenger.mp;
        self.commit(&character, &battle)?;

        info!(player = character.id, battle = %battle.id, "battle fled");
        Ok(turn.into_result(&battle, action, TurnOutcome::Fled))
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_victory(
        &self,
        mut character: Character,
        class: &CharacterClass,
        mut battle: BattleSession,
        action: Action,
        mut turn: TurnLog,
        now: DateTime<Utc>,
        dice: &mut dyn DiceSource,
    ) -> Result<TurnResult> {
        let spoils = calculate_rewards(dice, character.level, &battle.monster, &self.config);
        turn.push(format!(
            "The {} is defeated! You gain {} xp, {} gold and {} sp.",
            battle.monster.name, spoils.xp, spoils.gold, spoils.sp
        ));

        // A mutual knockout goes to the player
        battle.challenger.hp = battle.challenger.hp.max(1);

        character.hp = battle.challenger.hp;
        character.mp = battle.challenger.mp;
        character.xp += spoils.xp as u64;
        character.gold += spoils.gold as u64;
        character.sp += spoils.sp as u64;

        let level_up = apply_level_ups(&mut character, class);
        if level_up.leveled_up() {
            turn.push(format!("You reached level {}!", character.level));
        }

        character.victories += 1;
        character.is_battling = false;
        battle.finish(BattleResult::Victory, now);
        self.commit(&character, &battle)?;

        info!(
            player = character.id,
            battle = %battle.id,
            xp = spoils.xp,
            gold = spoils.gold,
            level = character.level,
            "battle won"
        );
        let rewards = Rewards {
            xp: spoils.xp,
            gold: spoils.gold,
            sp: spoils.sp,
            leveled_up: level_up.leveled_up(),
            new_level: level_up.leveled_up().then_some(character.level),
        };
        Ok(turn.into_result(&battle, action, TurnOutcome::Victory { rewards }))
    }

    fn finish_defeat(
        &self,
        mut character: Character,
        mut battle: BattleSession,
        action: Action,
        mut turn: TurnLog,
        now: DateTime<Utc>,
    ) -> Result<TurnResult> {
        turn.push(format!("You were slain by the {}.", battle.monster.name));

        battle.challenger.hp = 0;
        character.hp = 0;
        character.mp = battle.challenger.mp;
        character.is_dead = true;
        character.defeats += 1;
        character.is_battling = false;
        battle.finish(BattleResult::Defeat, now);
        self.commit(&character, &battle)?;

        info!(player = character.id, battle = %battle.id, "battle lost");
        Ok(turn.into_result(&battle, action, TurnOutcome::Defeat))
    }
}

fn parse_turn_request(battle_id: &str, action: &str) -> Result<(BattleId, Action)> {
    let battle_id = battle_id.trim();
    if battle_id.is_empty() {
        return Err(ValidationError::MissingIdentifier("battle id").into());
    }
    let battle_id = Uuid::parse_str(battle_id)
        .map_err(|_| ValidationError::InvalidBattleId(battle_id.to_string()))?;
    Ok((battle_id, action.parse()?))
}

fn push_elemental_note(turn: &mut TurnLog, multiplier: f64) {
    if multiplier > 1.0 {
        turn.push("It's super effective!".to_string());
    } else if multiplier < 1.0 {
        turn.push("It's not very effective.".to_string());
    }
}

/// Messages collected while a turn resolves.
struct TurnLog {
    round: u32,
    messages: Vec<String>,
}

impl TurnLog {
    fn new(round: u32) -> Self {
        Self {
            round,
            messages: Vec::new(),
        }
    }

    fn push(&mut self, message: String) {
        self.messages.push(message);
    }

    fn into_result(self, battle: &BattleSession, action: Action, outcome: TurnOutcome) -> TurnResult {
        TurnResult {
            battle_id: battle.id,
            round: self.round,
            action,
            messages: self.messages,
            player: Vitals::of_player(&battle.challenger),
            monster: Vitals::of_monster(&battle.monster),
            terminal: outcome.is_terminal(),
            outcome,
        }
    }
}
