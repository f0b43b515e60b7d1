//! Battle balance simulator CLI.
//!
//! Fights many battles against the built-in monster catalog and prints
//! outcome statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 1000 battles at level 1
//!   cargo run --bin simulate -- -n 200 -l 8       # 200 battles at level 8
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, JSON output

use skirmish::simulator::{run_simulation, SimConfig};
use skirmish::BattleConfig;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              SKIRMISH BATTLE SIMULATOR                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Battles:        {}", config.num_runs);
        println!("  Player Level:   {}", config.player_level);
        println!("  Class:          {}", config.class_id);
        println!("  Scaling:        {:?} ({}%)", config.battle.scaling_method, config.battle.stats_modifier);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("simulation failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = parse_value(args, &mut i)?;
            }
            "-l" | "--level" => {
                config.player_level = parse_value::<u32>(args, &mut i)?.max(1);
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value(args, &mut i)?);
            }
            "--class" => {
                config.class_id = parse_value(args, &mut i)?;
            }
            "--max-rounds" => {
                config.max_rounds = parse_value(args, &mut i)?;
            }
            "--defend-below" => {
                config.defend_below_pct = parse_value(args, &mut i)?;
            }
            "-c" | "--config" => {
                let path: String = parse_value(args, &mut i)?;
                config.battle = BattleConfig::from_json_file(&path)
                    .map_err(|err| format!("could not load {}: {}", path, err))?;
            }
            "--json" => json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "--quick" => {
                let level = config.player_level;
                config = SimConfig::quick(level);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    if json {
        config.verbosity = 0;
    }
    Ok((config, json))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    let value = args
        .get(*i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    *i += 1;
    value
        .parse()
        .map_err(|_| format!("invalid value '{}' for {}", value, flag))
}

fn print_help() {
    println!("Skirmish Battle Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of battles (default: 1000)");
    println!("    -l, --level <L>       Player level (default: 1)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --config <FILE>   Battle config JSON");
    println!("    --class <ID>          Player class id (default: 1)");
    println!("    --max-rounds <R>      Rounds before a battle is a stalemate (default: 200)");
    println!("    --defend-below <PCT>  Defend while hp is at or below PCT percent");
    println!("    --json                Print the report as JSON");
    println!("    --quick               100 battles with seed 42");
    println!("    -v, --verbose         Print every battle");
    println!("    -h, --help            Show this help");
    println!();
    println!("Set RUST_LOG=skirmish=debug to trace every roll.");
}
