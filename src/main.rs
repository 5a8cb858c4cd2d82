use grid_search::config::{log_filter, Cli, Config, Puzzle};
use grid_search::solver::{load_solver, Answer};
use grid_search::stat::Stats;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

#[derive(Serialize)]
struct Report<'a> {
    puzzle: Puzzle,
    part1: &'a str,
    part2: &'a str,
    stats: &'a Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    }
    .override_from_command_line(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&cli, &config)?)
        .init();
    if cli.config.is_none() {
        info!("No config file specified, using default config");
    }
    info!("Solving {:?} with input {}", config.puzzle, config.input_path);

    let solver = load_solver(&config)?;
    let mut stats = Stats::default();
    let solve_start_time = Instant::now();
    let Answer { part1, part2 } = solver.solve(&config, &mut stats)?;
    stats.time_us = solve_start_time.elapsed().as_micros() as usize;
    stats.print();

    if config.json {
        let report = Report {
            puzzle: config.puzzle,
            part1: &part1,
            part2: &part2,
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Part 1: {part1}");
        println!("Part 2: {part2}");
    }

    Ok(())
}
