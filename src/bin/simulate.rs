use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rayon::prelude::*;

use pig_dice::player::cpu_name;
use pig_dice::{
    EndReason, GameManager, MatchConfig, MatchOutcome, MatchSummary, NullSink, PigResult,
    DEFAULT_TARGET,
};

/// Runs computer-only Pig matches and reports how each seat fared.
#[derive(Parser, Debug)]
#[command(name = "simulate", version, about)]
struct Args {
    /// Number of matches to play
    #[arg(short = 'n', long, default_value_t = 100)]
    games: usize,

    /// Computer players per match
    #[arg(short, long, default_value_t = 2)]
    computers: usize,

    /// Banked score that wins a match
    #[arg(short, long, default_value_t = DEFAULT_TARGET)]
    target: u32,

    /// Base seed; match `i` uses `seed + i`
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Print every match summary as a JSON line
    #[arg(long)]
    json: bool,

    /// Print a line per match
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!(
        "Simulating {} matches of {} computer players to {}",
        args.games, args.computers, args.target
    );

    let results: Vec<PigResult<MatchSummary>> = (0..args.games)
        .into_par_iter()
        .map(|game| {
            let config = MatchConfig::bots_only(
                args.computers,
                args.target,
                Some(args.seed.wrapping_add(game as u64)),
            );
            GameManager::setup(&config, None, Box::new(NullSink))?.play()
        })
        .collect();

    let mut summaries = Vec::with_capacity(results.len());
    for (game, result) in results.into_iter().enumerate() {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!("Match {} failed: {}", game, e);
                return ExitCode::FAILURE;
            }
        }
    }

    for (game, summary) in summaries.iter().enumerate() {
        if args.verbose {
            println!("Match {}: {}", game + 1, describe(summary));
        }
        if args.json {
            match serde_json::to_string(summary) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize match {}: {}", game, e),
            }
        }
    }

    report(&args, &summaries);
    ExitCode::SUCCESS
}

fn describe(summary: &MatchSummary) -> String {
    match &summary.outcome {
        Some(MatchOutcome::Winner { name, .. }) => {
            format!("{} won in {} turns", name, summary.stats.turns)
        }
        Some(MatchOutcome::Tie { .. }) => format!("tie after {} turns", summary.stats.turns),
        None => "unfinished".to_string(),
    }
}

fn report(args: &Args, summaries: &[MatchSummary]) {
    let mut wins = vec![0usize; args.computers];
    let mut ties = 0;
    let mut deadline_endings = 0;
    let mut total_turns = 0u64;
    let mut total_rolls = 0u64;
    let mut total_forfeits = 0u64;

    for summary in summaries {
        match &summary.outcome {
            Some(MatchOutcome::Winner { index, .. }) => wins[*index] += 1,
            Some(MatchOutcome::Tie { .. }) => ties += 1,
            None => {}
        }
        if summary.reason == Some(EndReason::Deadline) {
            deadline_endings += 1;
        }
        total_turns += summary.stats.turns as u64;
        total_rolls += summary.stats.rolls as u64;
        total_forfeits += summary.stats.forfeits as u64;
    }

    let played = summaries.len().max(1) as f64;
    println!("\nResults over {} matches:", summaries.len());
    for (seat, &count) in wins.iter().enumerate() {
        println!(
            "  {:<6} {:>6} wins ({:.1}%)",
            cpu_name(seat),
            count,
            count as f64 / played * 100.0
        );
    }
    println!("  Ties: {}, ended by deadline: {}", ties, deadline_endings);
    println!("  Average turns per match: {:.1}", total_turns as f64 / played);
    println!("  Average rolls per match: {:.1}", total_rolls as f64 / played);
    if total_rolls > 0 {
        println!(
            "  Forfeit rate: {:.1}%",
            total_forfeits as f64 / total_rolls as f64 * 100.0
        );
    }
}
