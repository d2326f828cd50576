use std::env;
use std::fs::File;

use chrono::Utc;

use crate::server;
use crate::sim::blaster::{simulate_blaster_cycle, BlasterMode, BlasterParams};
use crate::sim::export_csv::write_timeline_csv;
use crate::sim::metrics::CycleResult;
use crate::sim::rifle::{simulate_rifle_cycle, RifleParams};
use crate::sweep::{rate_breakpoints, sweep_rifle_grid};
use crate::parallel::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Simulate,
    Export,
    Sweep,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("simulate") => Some(Command::Simulate),
        Some("export") => Some(Command::Export),
        Some("sweep") => Some(Command::Sweep),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Export) => handle_export(args),
        Some(Command::Sweep) => handle_sweep(),
        None => {
            eprintln!("usage: dryfire <serve|simulate|export|sweep>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("DRYFIRE_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// Build weapon parameters from positional args and flags:
/// `simulate blaster [power%] [speed%]` or
/// `simulate rifle [damage_steps] [rate_steps]` with
/// `--serum`, `--chaingun`, `--no-rocket`, `--healing` toggles.
fn simulate_from_args(args: &[String]) -> Option<CycleResult> {
    match args.get(2).map(String::as_str) {
        Some("blaster") => {
            let params = BlasterParams {
                mode: if args.iter().any(|arg| arg == "--healing") {
                    BlasterMode::Healing
                } else {
                    BlasterMode::Damage
                },
                weapon_power_percent: parse_f64_arg(args.get(3), "power", 100.0),
                attack_speed_percent: parse_f64_arg(args.get(4), "speed", 100.0),
                ..BlasterParams::default()
            };
            Some(simulate_blaster_cycle(&params))
        }
        Some("rifle") => {
            let params = RifleParams {
                damage_bonus_pct: parse_u32_arg(args.get(3), "damage_steps", 0),
                rate_bonus_pct: parse_u32_arg(args.get(4), "rate_steps", 0),
                chaingun_enabled: args.iter().any(|arg| arg == "--chaingun"),
                serum_enabled: args.iter().any(|arg| arg == "--serum"),
                rocket_enabled: !args.iter().any(|arg| arg == "--no-rocket"),
                ..RifleParams::default()
            };
            Some(simulate_rifle_cycle(&params))
        }
        _ => None,
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let Some(result) = simulate_from_args(args) else {
        eprintln!("usage: dryfire simulate <blaster|rifle> [args]");
        return 2;
    };

    if args.iter().any(|arg| arg == "--table") {
        println!("duration_s\ttotal_damage\tsustained_dps\tevent_count");
        println!(
            "{:.4}\t{:.2}\t{:.4}\t{}",
            result.total_duration_seconds,
            result.total_damage,
            result.sustained_dps,
            result.timeline.len()
        );
        return 0;
    }

    match serde_json::to_string_pretty(&result) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize simulation result: {err}");
            1
        }
    }
}

/// `export <blaster|rifle> [output.csv]` simulates the stock loadout
/// (plus any toggle flags) and writes the timeline as CSV.
fn handle_export(args: &[String]) -> i32 {
    let result = match args.get(2).map(String::as_str) {
        Some("blaster") => simulate_blaster_cycle(&BlasterParams {
            mode: if args.iter().any(|arg| arg == "--healing") {
                BlasterMode::Healing
            } else {
                BlasterMode::Damage
            },
            ..BlasterParams::default()
        }),
        Some("rifle") => simulate_rifle_cycle(&RifleParams {
            chaingun_enabled: args.iter().any(|arg| arg == "--chaingun"),
            serum_enabled: args.iter().any(|arg| arg == "--serum"),
            rocket_enabled: !args.iter().any(|arg| arg == "--no-rocket"),
            ..RifleParams::default()
        }),
        _ => {
            eprintln!("usage: dryfire export <blaster|rifle> [output.csv]");
            return 2;
        }
    };
    let weapon = args[2].as_str();

    let path = args
        .iter()
        .skip(3)
        .find(|arg| !arg.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| {
            format!(
                "dryfire-{weapon}-{}.csv",
                Utc::now().format("%Y%m%dT%H%M%SZ")
            )
        });

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to create '{path}': {err}");
            return 1;
        }
    };
    match write_timeline_csv(&result.timeline, file) {
        Ok(()) => {
            println!(
                "export complete: events={}, path='{path}'",
                result.timeline.len()
            );
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_sweep() -> i32 {
    let grid = sweep_rifle_grid(&RifleParams::default(), &WorkerPool::default());
    let payload = serde_json::json!({
        "breakpoints": rate_breakpoints(),
        "grid": grid,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize sweep result: {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    match raw {
        None => default,
        Some(value) if value.starts_with("--") => default,
        Some(value) => value.parse::<u32>().unwrap_or_else(|_| {
            eprintln!("invalid {name} '{value}', defaulting to {default}");
            default
        }),
    }
}

fn parse_f64_arg(raw: Option<&String>, name: &str, default: f64) -> f64 {
    match raw {
        None => default,
        Some(value) if value.starts_with("--") => default,
        Some(value) => value.parse::<f64>().unwrap_or_else(|_| {
            eprintln!("invalid {name} '{value}', defaulting to {default}");
            default
        }),
    }
}
