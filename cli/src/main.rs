use std::io::{self, Write};

use anyhow::Context;
use boomgrid_core::{Game, GameConfig, GameState};
use clap::Parser;

mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 5)]
    width: u8,

    /// Board height in cells
    #[arg(long, default_value_t = 5)]
    height: u8,

    /// Probability that any one cell holds a mine
    #[arg(long, default_value_t = GameConfig::DEFAULT_MINE_RATE)]
    mine_rate: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(u8, u8),
    Flag(u8, u8),
    New,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "r" | "reveal" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Command::Reveal(x, y)
        }
        "f" | "flag" => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Command::Flag(x, y)
        }
        "n" | "new" => Command::New,
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    match parts.next() {
        Some(_) => None,
        None => Some(command),
    }
}

fn print_help() {
    println!("commands: r X Y (reveal), f X Y (flag), n (new game), q (quit)");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new((args.width, args.height), args.mine_rate)
        .context("invalid board settings")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut game = Game::new(config, seed);
    println!("{}", render::draw(&game.snapshot()));
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = parse_command(&line) else {
            print_help();
            continue;
        };

        match command {
            Command::Quit => break,
            Command::New => {
                game.reset(rand::random());
                println!("{}", render::draw(&game.snapshot()));
            }
            Command::Reveal(x, y) => match game.reveal((x, y)) {
                Ok(outcome) => {
                    if outcome.has_update() {
                        println!("{}", render::draw(&game.snapshot()));
                    }
                    match game.state() {
                        GameState::Won => {
                            println!("You win!");
                            game.reset(rand::random());
                            println!("{}", render::draw(&game.snapshot()));
                        }
                        GameState::Lost => {
                            println!("Boom! Game over.");
                            game.reset(rand::random());
                            println!("{}", render::draw(&game.snapshot()));
                        }
                        _ => {}
                    }
                }
                Err(err) => println!("{err}"),
            },
            Command::Flag(x, y) => match game.toggle_flag((x, y)) {
                Ok(outcome) => {
                    if outcome.has_update() {
                        println!("{}", render::draw(&game.snapshot()));
                    }
                }
                Err(err) => println!("{err}"),
            },
        }
    }

    Ok(())
}
