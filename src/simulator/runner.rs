//! Drives whole battles through the engine with an in-memory store.

use super::config::SimConfig;
use super::report::{BattleRecord, SimOutcome, SimReport};
use crate::catalog::StaticCatalog;
use crate::character::attributes::{AttributeType, Attributes};
use crate::character::progression::{hp_gain, mp_gain, xp_threshold};
use crate::character::types::Character;
use crate::combat::engine::BattleEngine;
use crate::combat::types::{Action, TurnOutcome};
use crate::dice::{DiceSource, RngDice};
use crate::error::{DataIntegrityError, Result};
use crate::store::{Catalog, MemoryEquipment, MemoryStore, PlayerId};
use tracing::{debug, info};

const SIM_PLAYER: PlayerId = 1;
const BASE_HP: u32 = 12;
const BASE_MP: u32 = 4;

/// Run every battle in `config` and aggregate the results.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let catalog = StaticCatalog::builtin();
    let mut records = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut dice = match config.seed {
            Some(seed) => RngDice::seeded(seed.wrapping_add(run_idx as u64)),
            None => RngDice::from_entropy(),
        };

        let record = simulate_battle(config, catalog.clone(), &mut dice)?;
        if config.verbosity >= 2 {
            println!(
                "Battle {}/{} - {} (L{}): {} in {} rounds, {} hp left",
                run_idx + 1,
                config.num_runs,
                record.monster,
                record.monster_level,
                record.outcome,
                record.rounds,
                record.hp_left
            );
        }
        records.push(record);
    }

    let report = SimReport::from_records(config.player_level, records);
    info!(
        runs = report.num_runs,
        win_rate = report.win_rate(),
        "simulation finished"
    );
    Ok(report)
}

/// A fresh character of `level` with rolled attributes and class growth
/// applied for every level past the first.
pub fn starting_character(
    dice: &mut dyn DiceSource,
    catalog: &impl Catalog,
    class_id: u32,
    level: u32,
) -> Result<Character> {
    let class = catalog
        .class(class_id)
        .ok_or(DataIntegrityError::MissingClass(class_id))?;
    let attributes = Attributes::roll(dice);
    let level = level.max(1);
    let gained = level - 1;

    let hp_max = BASE_HP + hp_gain(class, attributes.get(AttributeType::Constitution)) * gained;
    let mp_max = BASE_MP + mp_gain(class, attributes.get(AttributeType::Intelligence)) * gained;

    let mut character = Character::new(SIM_PLAYER, "Simulant", attributes, class_id, hp_max, mp_max)
        .with_level(level)
        .with_armor(class.armor_per_level * gained);
    if level > 1 {
        character.xp = xp_threshold(level - 1);
    }
    Ok(character)
}

fn simulate_battle(
    config: &SimConfig,
    catalog: StaticCatalog,
    dice: &mut dyn DiceSource,
) -> Result<BattleRecord> {
    let character = starting_character(dice, &catalog, config.class_id, config.player_level)?;
    let engine = BattleEngine::new(
        MemoryStore::with_characters([character]),
        MemoryEquipment::new(),
        catalog,
        config.battle.clone(),
    );

    let battle = engine.start_battle(SIM_PLAYER, dice)?;
    let mut record = BattleRecord {
        monster: battle.monster_name.clone(),
        monster_level: battle.monster_level,
        outcome: SimOutcome::Stalemate,
        rounds: 0,
        xp: 0,
        gold: 0,
        leveled_up: false,
        hp_left: battle.player.hp,
    };

    let mut player = battle.player;
    while record.rounds < config.max_rounds {
        let action = if player.hp * 100 <= player.hp_max * config.defend_below_pct {
            Action::Defend
        } else {
            Action::Attack
        };
        let turn = engine.process_turn(SIM_PLAYER, battle.battle_id, action, dice)?;
        record.rounds += 1;
        record.hp_left = turn.player.hp;
        player = turn.player;

        match turn.outcome {
            TurnOutcome::Ongoing => continue,
            TurnOutcome::Victory { rewards } => {
                record.outcome = SimOutcome::Victory;
                record.xp = rewards.xp;
                record.gold = rewards.gold;
                record.leveled_up = rewards.leveled_up;
            }
            TurnOutcome::Defeat => record.outcome = SimOutcome::Defeat,
            TurnOutcome::Fled => record.outcome = SimOutcome::Fled,
        }
        break;
    }

    debug!(monster = %record.monster, outcome = %record.outcome, rounds = record.rounds, "simulated battle");
    Ok(record)
}
