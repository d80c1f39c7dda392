#![allow(dead_code)]

#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;

mod clock;
mod config;
mod coordinates;
mod error;
mod food;
mod game;
mod input;
mod numbers;
mod render;
mod snake;
mod store;
mod terminal;
mod text;

use std::fs::File;
use std::path::PathBuf;
use std::process;

use simplelog::{Config, LevelFilter, WriteLogger};
use structopt::StructOpt;

use crate::config::{Difficulty, GameConfig};
use crate::error::{Result, SnakeError};
use crate::game::GameLoop;
use crate::store::{JsonFileStore, MemoryStore, ScoreStore, HIGH_SCORE_KEY};
use crate::terminal::TerminalRenderer;

#[derive(StructOpt, Debug)]
#[structopt(name = "snake_loop", about = "Snake on a wrapping board, in the terminal.")]
struct Options {
    /// Game settings as JSON; command line values override it
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Playfield width in pixels
    #[structopt(long)]
    width: Option<i32>,
    /// Playfield height in pixels
    #[structopt(long)]
    height: Option<i32>,
    /// Size of one cell in pixels
    #[structopt(long)]
    cell_size: Option<i32>,
    /// extreme, hard, medium or easy
    #[structopt(long)]
    difficulty: Option<Difficulty>,
    /// Where the high score is kept
    #[structopt(long, default_value = "snake_highscore.json", parse(from_os_str))]
    score_file: PathBuf,
    /// Keep the high score in memory only
    #[structopt(long)]
    ephemeral: bool,
    /// Where log lines are written
    #[structopt(long, default_value = "snake_loop.log", parse(from_os_str))]
    log_file: PathBuf,
    /// off, error, warn, info, debug or trace
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Options {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.grid.cell_size = cell_size;
        }
        if let Some(difficulty) = self.difficulty {
            config.speed_level = difficulty.speed_level();
        }
        config.validate()?;
        Ok(config)
    }
}

fn play<S: ScoreStore>(config: GameConfig, store: S) -> Result<()> {
    let renderer = TerminalRenderer::new(config.grid);
    let mut game = GameLoop::new(config, renderer, store, rand::rng())?;
    terminal::run(&mut game)
}

fn run(options: &Options) -> Result<()> {
    let config = options.game_config()?;
    info!(
        "{}x{} board, {}px cells, speed level {}",
        config.grid.columns(),
        config.grid.rows(),
        config.grid.cell_size,
        config.speed_level
    );
    if options.ephemeral {
        play(config, MemoryStore::default())
    } else {
        play(config, JsonFileStore::new(&options.score_file, HIGH_SCORE_KEY)?)
    }
}

fn main() {
    let options = Options::from_args();

    // Set up logging before anything else
    let log_file = match File::create(&options.log_file) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot create {}: {}", options.log_file.display(), err);
            process::exit(1);
        }
    };
    if let Err(err) = WriteLogger::init(options.log_level, Config::default(), log_file) {
        eprintln!("cannot initialize logging: {}", err);
        process::exit(1);
    }
    info!("starting snake_loop");

    if let Err(err) = run(&options) {
        error!("{}", err);
        eprintln!("{}", err);
        process::exit(match err {
            SnakeError::InvalidArgument(_) => 2,
            _ => 1,
        });
    }
}
