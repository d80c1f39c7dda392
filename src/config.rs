use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coordinates::{Coordinates, Direction, Grid};
use crate::error::{Result, SnakeError};
use crate::snake::MIN_SNAKE_SIZE;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Extreme,
    Hard,
    Medium,
    Easy,
}

impl Difficulty {
    /// Index into the speed table, slowest last.
    pub fn speed_level(&self) -> i64 {
        match self {
            Difficulty::Extreme => 0, // 20 ms per tick
            Difficulty::Hard => 1,    // 40 ms
            Difficulty::Medium => 2,  // 80 ms
            Difficulty::Easy => 3,    // 160 ms
        }
    }
}

impl FromStr for Difficulty {
    type Err = SnakeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "extreme" => Ok(Difficulty::Extreme),
            "hard" => Ok(Difficulty::Hard),
            "medium" => Ok(Difficulty::Medium),
            "easy" => Ok(Difficulty::Easy),
            other => Err(SnakeError::InvalidArgument(format!(
                "unknown difficulty `{}`",
                other
            ))),
        }
    }
}

/// Spawn defaults and timing of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: Grid,
    pub spawn: Vec<Coordinates>,
    pub spawn_direction: Direction,
    pub speed_level: i64,
    /// Milliseconds between ticks, one entry per speed level.
    pub speeds: Vec<u64>,
    pub reset_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: Grid {
                width: 580,
                height: 340,
                cell_size: 20,
            },
            spawn: vec![
                Coordinates::new(150, 90),
                Coordinates::new(130, 90),
                Coordinates::new(110, 90),
            ],
            spawn_direction: Direction::Right,
            speed_level: 2,
            speeds: vec![20, 40, 80, 160],
            reset_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.spawn.len() < MIN_SNAKE_SIZE {
            return Err(SnakeError::InvalidArgument(format!(
                "spawn body needs at least {} segments",
                MIN_SNAKE_SIZE
            )));
        }
        if let Some(cell) = self.spawn.iter().find(|cell| !self.grid.contains(**cell)) {
            return Err(SnakeError::InvalidArgument(format!(
                "spawn segment ({}, {}) is not a cell centre of the playfield",
                cell.x(),
                cell.y()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(cell) = self.spawn.iter().find(|cell| !seen.insert(**cell)) {
            return Err(SnakeError::InvalidArgument(format!(
                "spawn segment ({}, {}) appears twice",
                cell.x(),
                cell.y()
            )));
        }
        let adjacent = |a: Coordinates, b: Coordinates| {
            DIRECTIONS
                .iter()
                .any(|direction| self.grid.step(a, *direction) == b)
        };
        if let Some(pair) = self.spawn.windows(2).find(|pair| !adjacent(pair[0], pair[1])) {
            return Err(SnakeError::InvalidArgument(format!(
                "spawn segments ({}, {}) and ({}, {}) are not neighbours",
                pair[0].x(),
                pair[0].y(),
                pair[1].x(),
                pair[1].y()
            )));
        }
        if self.grid.step(self.spawn[0], self.spawn_direction) == self.spawn[1] {
            return Err(SnakeError::InvalidArgument(format!(
                "spawn direction {:?} runs into the body",
                self.spawn_direction
            )));
        }
        if self.speeds.is_empty() {
            return Err(SnakeError::InvalidArgument("empty speed table".to_string()));
        }
        if self.spawn.len() >= self.grid.cell_count() {
            return Err(SnakeError::InvalidArgument(
                "the spawn body fills the whole playfield".to_string(),
            ));
        }
        Ok(())
    }
}
