//! Hex terminal front end
//!
//! Play against the AI, pass the keyboard in hot-seat mode, or watch the AI
//! play itself. Set `RUST_LOG=debug` to see search statistics.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use hex::{AIEngine, Difficulty, GameConfig, GameMode, GameSession, GameStatus, Player};

#[derive(Parser, Debug)]
#[command(name = "hex", version, about = "Hex against a negamax AI")]
struct Cli {
    /// Board size; overrides the config file
    #[arg(long, global = true)]
    size: Option<usize>,

    /// easy, normal or hard; overrides the config file
    #[arg(long, global = true)]
    difficulty: Option<Difficulty>,

    /// TOML configuration file
    #[arg(long, global = true, default_value = "hex.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play from the terminal
    Play {
        /// Side the human plays against the AI
        #[arg(long, value_enum, default_value_t = Side::Red)]
        human: Side,

        /// Two humans, no AI
        #[arg(long)]
        duo: bool,

        /// Resume from a saved session file
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Let the AI play both sides
    Selfplay {
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Red,
    Blue,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Player::Red,
            Side::Blue => Player::Blue,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    config.validate()?;

    match cli.command {
        Command::Play { human, duo, resume } => {
            let mode = if duo {
                GameMode::Duo
            } else {
                GameMode::Solo {
                    human: human.into(),
                }
            };
            play(config, mode, resume)
        }
        Command::Selfplay { games } => selfplay(config, games),
    }
}

fn play(config: GameConfig, mode: GameMode, resume: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let session = match &resume {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => GameSession::restore_or_fresh(config, &json, mode),
            Err(e) => {
                warn!("cannot read {}: {e}", path.display());
                GameSession::new(config, mode)
            }
        },
        None => GameSession::new(config, mode),
    };
    let mut session = session.with_reward_hook(|event| {
        println!(
            "You beat the {} AI! Reward tier {}.",
            event.difficulty, event.tier
        );
    });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", session.board());

        match session.status() {
            GameStatus::Won(winner) => {
                println!("{} wins.", winner.name());
                if let Some(path) = session.winning_path() {
                    let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
                    println!("Winning chain: {}", cells.join(" "));
                }
            }
            GameStatus::Draw => println!("Draw."),
            _ => {}
        }

        if let Some(due) = session.ai_due() {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
            if let Some(report) = session.poll() {
                if let Some(pos) = report.result.best_move {
                    println!(
                        "AI ({}) plays {} [{:?}, {} nodes, {}ms]",
                        report.player.name(),
                        pos,
                        report.result.search_type,
                        report.result.nodes,
                        report.result.time_ms
                    );
                }
            }
            continue;
        }

        if session.status().is_over() {
            print!("'reset' to play again, 'quit' to leave: ");
        } else {
            print!(
                "{} to move ('row col', reset, save <file>, quit): ",
                session.current_player().name()
            );
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["quit"] | ["q"] => break,
            ["reset"] => session.reset(),
            ["save", path] => {
                std::fs::write(path, session.snapshot().to_json()?)?;
                println!("Saved to {path}.");
            }
            [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => {
                    if let Err(e) = session.apply_move(row, col) {
                        println!("Rejected: {e}");
                    }
                }
                _ => println!("Expected two numbers."),
            },
            _ => println!("Unknown command."),
        }
    }

    Ok(())
}

fn selfplay(config: GameConfig, games: usize) -> Result<(), Box<dyn Error>> {
    let profile = config.profile(config.difficulty);
    let mut engine = AIEngine::new();
    let mut session = GameSession::new(config, GameMode::Duo);
    let mut red_wins = 0;

    for game in 1..=games {
        session.reset();
        let start = Instant::now();
        let mut nodes = 0;

        while !session.status().is_over() {
            let player = session.current_player();
            let result = engine.choose_move(session.board(), player, &profile);
            nodes += result.nodes;
            let Some(pos) = result.best_move else {
                break;
            };
            session.apply_move(pos.row as usize, pos.col as usize)?;
        }

        println!("{}", session.board());
        match session.status() {
            GameStatus::Won(winner) => {
                if winner == Player::Red {
                    red_wins += 1;
                }
                println!(
                    "Game {game}: {} wins after {} stones",
                    winner.name(),
                    session.board().stone_count()
                );
            }
            status => println!("Game {game}: {status:?}"),
        }
        info!(
            "game {game}: {} nodes in {}ms",
            nodes,
            start.elapsed().as_millis()
        );
    }

    println!("Red won {red_wins} of {games}.");
    Ok(())
}
