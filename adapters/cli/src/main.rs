#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a game of Fountain in the terminal.

mod input;
mod output;
mod timer;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fountain_core::{GameStatus, DEFAULT_PIT_COUNT, MAX_MAP_SIZE, MIN_MAP_SIZE};
use fountain_system_session::{ActionSource, Game};
use fountain_world::{GridWorld, WorldConfig};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::{
    input::{LineActions, ScriptedActions},
    output::{JsonSink, TextSink},
    timer::SessionTimer,
};

/// Find the fountain in a pitch-dark cavern, switch it on, and make it back out.
#[derive(Debug, Parser)]
#[command(name = "fountain", version)]
struct Cli {
    /// Side length of the square cavern. Prompted for when omitted.
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_MAP_SIZE)..=i64::from(MAX_MAP_SIZE))
    )]
    size: Option<u32>,
    /// Number of pits hidden in the cavern.
    #[arg(long, default_value_t = DEFAULT_PIT_COUNT)]
    pits: u32,
    /// Seed for cavern generation. A random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Actions to play instead of reading stdin, separated by spaces or commas.
    #[arg(long)]
    script: Option<String>,
    /// Emit one JSON object per line instead of narration.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    kind: &'static str,
    status: GameStatus,
    turns: u32,
    elapsed_secs: u64,
}

/// Entry point for the Fountain command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let size = match cli.size {
        Some(size) => size,
        None => input::prompt_map_size(&mut input, &mut io::stderr(), MIN_MAP_SIZE, MAX_MAP_SIZE)?,
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        "generating a {size}x{size} cavern with {} pits from seed {seed}",
        cli.pits
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let world = GridWorld::generate(WorldConfig::square(size, cli.pits), &mut rng)
        .with_context(|| {
            format!(
                "could not generate a {size}x{size} cavern with {} pits",
                cli.pits
            )
        })?;

    let mut game = Game::new(world);
    let timer = SessionTimer::start();
    let status = match cli.script.as_deref() {
        Some(script) => play(&mut game, &mut ScriptedActions::parse(script)?, cli.json)?,
        None => play(
            &mut game,
            &mut LineActions::new(&mut input, io::stderr()),
            cli.json,
        )?,
    };
    let elapsed = timer.elapsed();
    info!("session ended as {status:?} after {elapsed:?}");

    let mut stdout = io::stdout().lock();
    if cli.json {
        let summary = Summary {
            kind: "summary",
            status,
            turns: game.turns(),
            elapsed_secs: elapsed.as_secs(),
        };
        serde_json::to_writer(&mut stdout, &summary)?;
        writeln!(stdout)?;
    } else {
        writeln!(
            stdout,
            "You spent {} in the cavern over {} turns.",
            timer::describe(elapsed),
            game.turns()
        )?;
    }
    Ok(())
}

fn play<S>(game: &mut Game, source: &mut S, json: bool) -> Result<GameStatus>
where
    S: ActionSource<Error = anyhow::Error>,
{
    let stdout = io::stdout();
    if json {
        game.run(source, &mut JsonSink::new(stdout.lock()))
    } else {
        game.run(source, &mut TextSink::new(stdout.lock()))
    }
}
