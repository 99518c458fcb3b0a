use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use pig_dice::console::{score_line, welcome_banner};
use pig_dice::{
    ConsoleInput, ConsoleSink, GameManager, MatchConfig, PigResult, DEFAULT_TARGET,
};

/// Pig dice at the terminal: humans and computer players race to the target.
#[derive(Parser, Debug)]
#[command(name = "pig", version, about)]
struct Args {
    /// Number of human players (asked for when omitted)
    #[arg(long)]
    humans: Option<usize>,

    /// Number of computer players (asked for when omitted)
    #[arg(long)]
    computers: Option<usize>,

    /// Banked score that wins the match
    #[arg(short, long, default_value_t = DEFAULT_TARGET)]
    target: u32,

    /// Seed for the die, the computer players and the starting player
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Match aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> PigResult<()> {
    let prompt = ConsoleInput::stdio().into_shared();

    let humans = match args.humans {
        Some(humans) => humans,
        None => prompt
            .borrow_mut()
            .read_int("How many human players? ", 0, None)? as usize,
    };
    let computers = match args.computers {
        Some(computers) => computers,
        None => prompt
            .borrow_mut()
            .read_int("How many computer players? ", 0, None)? as usize,
    };

    let config = MatchConfig {
        humans,
        computers,
        target: args.target,
        seed: args.seed,
        human_names: Vec::new(),
    };

    let mut manager = GameManager::setup(&config, Some(prompt), Box::new(ConsoleSink::stdout()))?;
    println!("{}", welcome_banner(config.target));
    println!();

    let summary = manager.play()?;
    println!("\nFinal score --> {}", score_line(manager.engine().players()));
    info!(
        "Match finished after {} turns and {} rolls (seed {})",
        summary.stats.turns,
        summary.stats.rolls,
        manager.seed()
    );
    Ok(())
}
