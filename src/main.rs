//! Chess Rogue - Main Binary
//!
//! Automated runs, parallel simulation, and line-oriented play on stdin

use anyhow::{bail, Context};
use chess_rogue_rs::{
    game::{
        Autopilot, BoardSnapshot, GameState, GameStateView, HeuristicController, NullHost, OutputFormat, PlayerController,
        RandomController, RecordingHost, RunLoop, RunPhase, VerbosityLevel,
    },
    simulate::{run_batch, ControllerKind},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};

/// Controller type for automated play
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Makes random choices
    Random,
    /// Greedy captures, checks, and king hunting
    Heuristic,
}

impl From<ControllerType> for ControllerKind {
    fn from(value: ControllerType) -> Self {
        match value {
            ControllerType::Random => ControllerKind::Random,
            ControllerType::Heuristic => ControllerKind::Heuristic,
        }
    }
}

/// Verbosity level for run output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl From<LogFormat> for OutputFormat {
    fn from(value: LogFormat) -> Self {
        match value {
            LogFormat::Text => OutputFormat::Text,
            LogFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "rogue")]
#[command(about = "Chess Rogue - roguelike chess engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one automated run
    Play {
        /// Controller driving the player side
        #[arg(long, value_enum, default_value = "heuristic")]
        controller: ControllerType,

        /// Set random seed for deterministic runs
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many cleared rounds
        #[arg(long, default_value_t = 10)]
        max_rounds: usize,

        /// Verbosity level for run output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Log line format
        #[arg(long, value_enum, default_value = "text")]
        log_format: LogFormat,

        /// Print the run summary and final board snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run many seeded runs in parallel and print aggregate statistics
    Sim {
        /// Number of runs
        #[arg(long, short = 'n', default_value_t = 100)]
        runs: usize,

        /// Base seed; run i uses a seed derived from it
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_enum, default_value = "heuristic")]
        controller: ControllerType,

        #[arg(long, default_value_t = 10)]
        max_rounds: usize,

        /// Print the full statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a run by hand, one command per line on stdin
    Tui {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            controller,
            seed,
            max_rounds,
            verbosity,
            log_format,
            json,
        } => run_play(controller, seed, max_rounds, verbosity.into(), log_format.into(), json)?,
        Commands::Sim {
            runs,
            seed,
            controller,
            max_rounds,
            json,
        } => run_sim(runs, seed, controller, max_rounds, json)?,
        Commands::Tui { seed, verbosity } => run_tui(seed, verbosity.into())?,
    }

    Ok(())
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn run_play(
    controller_type: ControllerType,
    seed: Option<u64>,
    max_rounds: usize,
    verbosity: VerbosityLevel,
    log_format: OutputFormat,
    json: bool,
) -> anyhow::Result<()> {
    let seed = resolve_seed(seed);
    let mut game = GameState::new(seed);
    game.logger.set_verbosity(verbosity);
    game.logger.set_output_format(log_format);

    let mut controller: Box<dyn PlayerController> = match controller_type {
        ControllerType::Random => Box::new(RandomController::with_seed(seed)),
        ControllerType::Heuristic => Box::new(HeuristicController::new()),
    };

    let summary = Autopilot::new(controller.as_mut())
        .with_max_rounds(max_rounds)
        .run(&mut game, &mut NullHost);

    let snapshot = GameStateView::new(&game).snapshot();

    if json {
        let out = serde_json::json!({ "summary": summary, "snapshot": snapshot });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("\n=== Run Complete ===");
        println!("Seed: {}", summary.seed);
        println!("Controller: {}", summary.controller);
        println!("Rounds cleared: {}", summary.rounds_cleared);
        println!("Turns played: {}", summary.turns_played);
        println!("Moves made: {}", summary.moves_made);
        println!("Best round score: {}", summary.best_round_score);
        println!("Gold: {}", summary.gold);
        println!("Ended: {:?}", summary.end_reason);
        print!("{}", render_board(&snapshot));
    }
    Ok(())
}

fn run_sim(runs: usize, seed: u64, controller: ControllerType, max_rounds: usize, json: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let stats = run_batch(seed, runs, controller.into(), max_rounds);
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("=== Chess Rogue - Simulation ===\n");
    println!("Runs: {}  Controller: {:?}  Round cap: {}", stats.runs, stats.controller, max_rounds);
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!("Runs per second: {:.2}\n", stats.runs as f64 / elapsed.as_secs_f64());
    }
    println!(
        "Reached round cap: {} ({:.1}%)",
        stats.completed_runs,
        100.0 * stats.completion_rate()
    );
    println!("Lost: {}", stats.lost_runs);
    println!("Mean rounds cleared: {:.2}", stats.mean_rounds_cleared);
    println!("Most rounds cleared: {}", stats.best_rounds_cleared);
    println!("Mean best round score: {:.1}", stats.mean_best_score);
    println!("Mean gold at end: {:.1}", stats.mean_gold);
    Ok(())
}

/// Board as text: ranks top to bottom, `.` for empty squares
fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();
    for (y, row) in snapshot.board.split('/').enumerate().take(snapshot.board_h.max(0) as usize) {
        let mut cells = Vec::new();
        for ch in row.chars() {
            match ch.to_digit(10) {
                Some(n) => cells.extend(std::iter::repeat('.').take(n as usize)),
                None => cells.push(ch),
            }
        }
        cells.truncate(snapshot.board_w.max(0) as usize);
        let line: String = cells.iter().flat_map(|c| [*c, ' ']).collect();
        out.push_str(&format!("{} {}\n", 8 - y, line.trim_end()));
    }
    let files: String = "abcdefgh"
        .chars()
        .take(snapshot.board_w.max(0) as usize)
        .flat_map(|c| [c, ' '])
        .collect();
    out.push_str(&format!("  {}\n", files.trim_end()));
    out
}

fn print_status(snapshot: &BoardSnapshot) {
    println!();
    print!("{}", render_board(snapshot));
    println!(
        "Round {} | Turn {}/{} | Actions {} | {}",
        snapshot.round, snapshot.turn, snapshot.turn_limit, snapshot.actions_left, snapshot.objective
    );
    println!(
        "Gold {} | Chips {} x {:.1} = {} / {}{}",
        snapshot.gold,
        snapshot.chips,
        snapshot.mult,
        snapshot.round_score,
        snapshot.score_target,
        if snapshot.in_check { " | CHECK" } else { "" }
    );
    if !snapshot.jokers.is_empty() {
        println!("Jokers: {}", snapshot.jokers.join(", "));
    }
    if !snapshot.tarots.is_empty() {
        println!("Tarots: {}", snapshot.tarots.join(", "));
    }
    if snapshot.phase == RunPhase::Shop {
        println!("Shop: {}", snapshot.shop.join(", "));
    }
}

const TUI_HELP: &str = "commands: <from> <to> | tarot <n> | buy <n> | sell <id> | reroll | leave | restart | help | quit";

/// One parsed stdin command
#[derive(Debug, PartialEq)]
enum TuiCommand {
    Move(String, String),
    Tarot(usize),
    Buy(usize),
    Sell(String),
    Reroll,
    Leave,
    Restart,
    Help,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<TuiCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let index = |w: Option<&&str>| -> anyhow::Result<usize> {
        let w = w.context("missing slot number")?;
        let n: usize = w.parse().with_context(|| format!("bad slot number '{w}'"))?;
        if n == 0 {
            bail!("slots are numbered from 1");
        }
        Ok(n - 1)
    };
    Ok(match words.as_slice() {
        ["tarot", ..] => TuiCommand::Tarot(index(words.get(1))?),
        ["buy", ..] => TuiCommand::Buy(index(words.get(1))?),
        ["sell", id] => TuiCommand::Sell(id.to_string()),
        ["reroll"] => TuiCommand::Reroll,
        ["leave"] => TuiCommand::Leave,
        ["restart"] => TuiCommand::Restart,
        ["help"] | ["?"] => TuiCommand::Help,
        ["quit"] | ["exit"] => TuiCommand::Quit,
        [from, to] => TuiCommand::Move(from.to_string(), to.to_string()),
        _ => bail!("unknown command '{}'", line.trim()),
    })
}

fn run_tui(seed: Option<u64>, verbosity: VerbosityLevel) -> anyhow::Result<()> {
    let seed = resolve_seed(seed);
    let mut game = GameState::new(seed);
    game.logger.set_verbosity(verbosity);
    let mut host = RecordingHost::new();
    let mut run = RunLoop::new(&mut game, &mut host);
    run.reset_run();

    println!("=== Chess Rogue (seed {seed}) ===");
    println!("{TUI_HELP}");
    print_status(&run.view().snapshot());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match command {
            TuiCommand::Move(from, to) => {
                if !run.submit_player_move(&from, &to) {
                    println!("Move not allowed.");
                }
            }
            TuiCommand::Tarot(i) => {
                if !run.use_tarot(i) {
                    println!("No usable tarot in that slot.");
                }
            }
            TuiCommand::Buy(i) => match run.buy_offer(i) {
                Ok(card) => println!("Bought {}.", card.name),
                Err(e) => println!("{e}"),
            },
            TuiCommand::Sell(id) => match run.sell_joker(&id) {
                Ok(refund) => println!("Sold for {refund} gold."),
                Err(e) => println!("{e}"),
            },
            TuiCommand::Reroll => {
                if let Err(e) = run.reroll_shop() {
                    println!("{e}");
                }
            }
            TuiCommand::Leave => {
                if let Err(e) = run.leave_shop() {
                    println!("{e}");
                }
            }
            TuiCommand::Restart => run.reset_run(),
            TuiCommand::Help => println!("{TUI_HELP}"),
            TuiCommand::Quit => break,
        }
        print_status(&run.view().snapshot());
        if run.game.phase == RunPhase::RunLost {
            println!("Run lost. Type 'restart' to play again or 'quit'.");
        }
        io::stdout().flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("e2 e4").unwrap(),
            TuiCommand::Move("e2".into(), "e4".into())
        );
        assert_eq!(parse_command("buy 2").unwrap(), TuiCommand::Buy(1));
        assert_eq!(parse_command("sell gambit").unwrap(), TuiCommand::Sell("gambit".into()));
        assert_eq!(parse_command("quit").unwrap(), TuiCommand::Quit);
        assert!(parse_command("buy 0").is_err());
        assert!(parse_command("dance now please").is_err());
    }

    #[test]
    fn test_verbosity_arg() {
        let v: VerbosityArg = "3".parse().unwrap();
        assert_eq!(VerbosityLevel::from(v), VerbosityLevel::Verbose);
        assert!("loud".parse::<VerbosityArg>().is_err());
    }

    #[test]
    fn test_render_board_clips_to_active_area() {
        let mut game = GameState::new(0);
        game.logger.enable_capture();
        let mut host = NullHost;
        let mut run = RunLoop::new(&mut game, &mut host);
        run.reset_run();
        let snap = run.view().snapshot();
        let text = render_board(&snap);
        assert_eq!(text.lines().count(), snap.board_h as usize + 1);
    }
}
