//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimOutcome {
    Victory,
    Defeat,
    Fled,
    /// Still in progress when the round limit ran out.
    Stalemate,
}

impl fmt::Display for SimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimOutcome::Victory => "victory",
            SimOutcome::Defeat => "defeat",
            SimOutcome::Fled => "fled",
            SimOutcome::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

/// One simulated battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleRecord {
    pub monster: String,
    pub monster_level: u32,
    pub outcome: SimOutcome,
    pub rounds: u32,
    pub xp: u32,
    pub gold: u32,
    pub leveled_up: bool,
    pub hp_left: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonsterTally {
    pub level: u32,
    pub battles: u32,
    pub victories: u32,
    pub defeats: u32,
}

/// Aggregated results from a batch of battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub player_level: u32,
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub stalemates: u32,
    pub level_ups: u32,

    pub avg_rounds: f64,
    pub avg_xp_per_win: f64,
    pub avg_gold_per_win: f64,
    pub avg_hp_left_on_win: f64,

    pub per_monster: BTreeMap<String, MonsterTally>,

    #[serde(skip)]
    pub records: Vec<BattleRecord>,
}

impl SimReport {
    pub fn from_records(player_level: u32, records: Vec<BattleRecord>) -> Self {
        let count = |outcome| records.iter().filter(|r| r.outcome == outcome).count() as u32;
        let victories = count(SimOutcome::Victory);
        let wins = || records.iter().filter(|r| r.outcome == SimOutcome::Victory);
        let per_win = |total: f64| total / victories.max(1) as f64;

        let mut per_monster: BTreeMap<String, MonsterTally> = BTreeMap::new();
        for record in &records {
            let tally = per_monster.entry(record.monster.clone()).or_default();
            tally.level = record.monster_level;
            tally.battles += 1;
            match record.outcome {
                SimOutcome::Victory => tally.victories += 1,
                SimOutcome::Defeat => tally.defeats += 1,
                _ => {}
            }
        }

        Self {
            player_level,
            num_runs: records.len() as u32,
            victories,
            defeats: count(SimOutcome::Defeat),
            fled: count(SimOutcome::Fled),
            stalemates: count(SimOutcome::Stalemate),
            level_ups: records.iter().filter(|r| r.leveled_up).count() as u32,
            avg_rounds: records.iter().map(|r| r.rounds as f64).sum::<f64>()
                / records.len().max(1) as f64,
            avg_xp_per_win: per_win(wins().map(|r| r.xp as f64).sum()),
            avg_gold_per_win: per_win(wins().map(|r| r.gold as f64).sum()),
            avg_hp_left_on_win: per_win(wins().map(|r| r.hp_left as f64).sum()),
            per_monster,
            records,
        }
    }

    /// Share of battles won, as a percentage.
    pub fn win_rate(&self) -> f64 {
        self.victories as f64 * 100.0 / self.num_runs.max(1) as f64
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                     BATTLE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} at player level {}\n\n",
            self.num_runs, self.player_level
        ));

        report.push_str("OUTCOMES\n");
        report.push_str("───────────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Victories:   {:>6}  ({:.1}%)\n",
            self.victories,
            self.win_rate()
        ));
        report.push_str(&format!("  Defeats:     {:>6}\n", self.defeats));
        report.push_str(&format!("  Fled:        {:>6}\n", self.fled));
        report.push_str(&format!("  Stalemates:  {:>6}\n", self.stalemates));
        report.push_str(&format!("  Level-ups:   {:>6}\n\n", self.level_ups));

        report.push_str("AVERAGES\n");
        report.push_str("───────────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Rounds per battle:   {:.2}\n", self.avg_rounds));
        report.push_str(&format!("  XP per victory:      {:.2}\n", self.avg_xp_per_win));
        report.push_str(&format!("  Gold per victory:    {:.2}\n", self.avg_gold_per_win));
        report.push_str(&format!(
            "  HP left on victory:  {:.2}\n\n",
            self.avg_hp_left_on_win
        ));

        report.push_str("PER MONSTER\n");
        report.push_str("───────────────────────────────────────────────────────────────\n");
        report.push_str("  Monster            Lvl  Battles   Wins  Losses\n");
        for (name, tally) in &self.per_monster {
            report.push_str(&format!(
                "  {:<18} {:>3}  {:>7}  {:>5}  {:>6}\n",
                name, tally.level, tally.battles, tally.victories, tally.defeats
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
