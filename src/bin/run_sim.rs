//! Demo binary: runs the production fixture (or a CSV map/task pair) to
//! completion and prints a JSON summary, optionally writing the recorded
//! trajectory to a CSV file.
//!
//! ```text
//! run_sim [--map FILE] [--tasks FILE] [--seed N] [--out FILE]
//! ```
//!
//! With no flags, runs the built-in 12-AGV/100-task production fixture.

use agv_fleet_sim_core::config::SimConfig;
use agv_fleet_sim_core::context::Context;
use agv_fleet_sim_core::io::{parse_map_csv, parse_task_csv, write_trajectory_csv};
use agv_fleet_sim_core::scoring::score;
use agv_fleet_sim_core::utils::fixtures::{production_map, production_tasks};
use agv_fleet_sim_core::utils::rand::shuffled;
use agv_fleet_sim_core::verbose::{ensure_logger_init, set_verbose_level, VerboseLevel};
use std::fs;
use std::process::ExitCode;

struct Args {
    map: Option<String>,
    tasks: Option<String>,
    seed: Option<u64>,
    out: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args { map: None, tasks: None, seed: None, out: None };
    let mut raw = std::env::args().skip(1);
    while let Some(flag) = raw.next() {
        match flag.as_str() {
            "--map" => args.map = raw.next(),
            "--tasks" => args.tasks = raw.next(),
            "--seed" => args.seed = raw.next().and_then(|s| s.parse().ok()),
            "--out" => args.out = raw.next(),
            _ => eprintln!("ignoring unrecognized argument: {flag}"),
        }
    }
    args
}

fn main() -> ExitCode {
    ensure_logger_init();
    set_verbose_level(VerboseLevel::Main);

    let args = parse_args();

    let map_elements = match &args.map {
        Some(path) => match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|s| parse_map_csv(&s).map_err(|e| e.to_string())) {
            Ok(elements) => elements,
            Err(err) => {
                eprintln!("failed to load map from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => production_map(),
    };

    let mut task_records = match &args.tasks {
        Some(path) => match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|s| parse_task_csv(&s).map_err(|e| e.to_string())) {
            Ok(records) => records,
            Err(err) => {
                eprintln!("failed to load tasks from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => production_tasks(),
    };

    if let Some(seed) = args.seed {
        task_records = shuffled(&task_records, seed);
    }

    let mut ctx = match Context::new(map_elements, task_records, SimConfig::default()) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("failed to build context: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = ctx.process_to_complete() {
        eprintln!("scheduler run failed: {err}");
        return ExitCode::FAILURE;
    }

    let durations: Vec<u32> = ctx.tasks.iter().filter_map(|t| t.duration()).collect();
    let avg_duration = if durations.is_empty() { 0.0 } else { durations.iter().sum::<u32>() as f64 / durations.len() as f64 };

    let summary = serde_json::json!({
        "ticks": ctx.timestamp,
        "tasks_completed": ctx.tasks.iter().filter(|t| t.status == agv_fleet_sim_core::task::TaskStatus::Completed).count(),
        "tasks_total": ctx.tasks.len(),
        "avg_task_duration": avg_duration,
        "agv_count": ctx.agvs.len(),
        "score": score(&ctx.tasks),
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());

    if let Some(out_path) = &args.out {
        if let Err(err) = fs::write(out_path, write_trajectory_csv(&ctx.recorder)) {
            eprintln!("failed to write trajectory to {out_path}: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
