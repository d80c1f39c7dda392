// one tick: apply the buffered turn, move, draw, eat, then check for death.
// a death or a full board locks input until the reset delay has passed
use std::time::Instant;

use rand::Rng;

use crate::clock::GameClock;
use crate::config::GameConfig;
use crate::coordinates::{Coordinates, Direction};
use crate::error::{skip_on_error, Result};
use crate::food::RandomPositionPicker;
use crate::input::{InputMapper, Key, KeyAction};
use crate::render::{Color, Renderer, Shape, Status};
use crate::snake::SnakeBody;
use crate::store::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Playing,
    Dead { reset_at: Instant },
    Won { reset_at: Instant },
}

/// What a call to `GameLoop::frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Waiting,
    Moved,
    Ate,
    Died,
    Won,
    Locked,
    Reset,
}

pub struct GameLoop<R: Renderer, S: ScoreStore, G: Rng> {
    config: GameConfig,
    renderer: R,
    store: S,
    rng: G,
    mapper: InputMapper,
    picker: RandomPositionPicker,
    clock: GameClock,
    snake: SnakeBody,
    direction: Direction,
    pending_turn: Option<Direction>,
    food: Option<Coordinates>,
    state: GameState,
    score: u32,
    high_score: u32,
}

impl<R: Renderer, S: ScoreStore, G: Rng> GameLoop<R, S, G> {
    pub fn new(config: GameConfig, renderer: R, store: S, rng: G) -> Result<Self> {
        config.validate()?;
        let snake = SnakeBody::new(&config.spawn)?;
        let clock = GameClock::new(&config.speeds, config.speed_level);
        let high_score = skip_on_error("reading the high score", store.get())
            .flatten()
            .unwrap_or(0);
        let mut game = GameLoop {
            direction: config.spawn_direction,
            config,
            renderer,
            store,
            rng,
            mapper: InputMapper,
            picker: RandomPositionPicker,
            clock,
            snake,
            pending_turn: None,
            food: None,
            state: GameState::Idle,
            score: 0,
            high_score,
        };
        game.init();
        Ok(game)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn food(&self) -> Option<Coordinates> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed_level(&self) -> usize {
        self.clock.level()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle_key(&mut self, key: Key) {
        if matches!(self.state, GameState::Dead { .. } | GameState::Won { .. }) {
            return;
        }
        let action = match self.mapper.map(key) {
            Some(action) => action,
            None => return,
        };
        match action {
            KeyAction::Start => {
                if self.state == GameState::Idle {
                    self.state = GameState::Playing;
                    self.clock.reset();
                    skip_on_error("status", self.renderer.show_status(Status::Playing));
                    info!("game started");
                }
            }
            // checked against the committed direction, so two turns between
            // ticks can never add up to a reversal
            KeyAction::Turn {
                direction,
                forbidden,
            } => {
                if self.state == GameState::Playing && self.direction != forbidden {
                    self.pending_turn = Some(direction);
                }
            }
            KeyAction::Faster => self.change_speed(-1),
            KeyAction::Slower => self.change_speed(1),
        }
    }

    /// Runs on every host frame; at most one logical tick happens per call.
    pub fn frame(&mut self, now: Instant) -> TickOutcome {
        match self.state {
            GameState::Idle => return TickOutcome::Idle,
            GameState::Dead { reset_at } | GameState::Won { reset_at } => {
                if now < reset_at {
                    return TickOutcome::Locked;
                }
                self.reset();
                return TickOutcome::Reset;
            }
            GameState::Playing => {}
        }
        if !self.clock.poll(now) {
            return TickOutcome::Waiting;
        }

        skip_on_error("clearing the frame", self.renderer.clear(None));
        if let Some(turn) = self.pending_turn.take() {
            self.direction = turn;
        }
        self.snake.advance_head(self.direction, &self.config.grid);
        self.draw_scene();

        let mut outcome = TickOutcome::Moved;
        if let Some(food) = self.food {
            if self.snake.collides_with_head(food) {
                outcome = self.eat(now);
            }
        }
        if self.state == GameState::Playing && self.snake.self_collision() {
            self.die(now);
            outcome = TickOutcome::Died;
        }
        outcome
    }

    fn init(&mut self) {
        self.place_food();
        self.draw_scene();
        self.show_scores();
        skip_on_error("status", self.renderer.show_status(Status::Ready));
    }

    fn place_food(&mut self) -> Option<Coordinates> {
        let occupied = self.snake.occupied();
        self.food = self
            .picker
            .pick(&mut self.rng, &self.config.grid, &occupied);
        self.food
    }

    fn eat(&mut self, now: Instant) -> TickOutcome {
        self.snake.grow();
        self.score += self.config.grid.cell_size as u32;
        if self.score > self.high_score {
            self.high_score = self.score;
            skip_on_error("saving the high score", self.store.set(self.high_score));
        }
        self.show_scores();
        debug!("ate, score {} length {}", self.score, self.snake.len());

        match self.place_food() {
            Some(food) => {
                let size = self.config.grid.cell_size;
                skip_on_error(
                    "drawing food",
                    self.renderer.draw(food, size, Shape::Arc, true, Color::Red),
                );
                TickOutcome::Ate
            }
            None => {
                info!("board full with a score of {}", self.score);
                self.state = GameState::Won {
                    reset_at: now + self.config.reset_delay(),
                };
                self.pending_turn = None;
                skip_on_error("status", self.renderer.show_status(Status::Won));
                TickOutcome::Won
            }
        }
    }

    fn die(&mut self, now: Instant) {
        info!("snake bit itself with a score of {}", self.score);
        self.state = GameState::Dead {
            reset_at: now + self.config.reset_delay(),
        };
        self.pending_turn = None;
        let size = self.config.grid.cell_size;
        skip_on_error(
            "drawing the death marker",
            self.renderer
                .draw(self.snake.head(), size, Shape::Rect, false, Color::Purple),
        );
        skip_on_error("status", self.renderer.show_status(Status::Dead));
    }

    fn reset(&mut self) {
        if let Some(snake) = skip_on_error("respawning", SnakeBody::new(&self.config.spawn)) {
            self.snake = snake;
        }
        self.direction = self.config.spawn_direction;
        self.pending_turn = None;
        self.score = 0;
        self.clock.reset();
        self.clock.set_level(self.config.speed_level);
        self.food = None;
        self.state = GameState::Idle;
        skip_on_error("clearing the frame", self.renderer.clear(None));
        self.init();
        info!("game reset, high score {}", self.high_score);
    }

    fn change_speed(&mut self, delta: i64) {
        let level = self.clock.set_level(self.clock.level() as i64 + delta);
        debug!("speed level {} ({:?} per tick)", level, self.clock.delay());
    }

    fn show_scores(&mut self) {
        skip_on_error(
            "showing scores",
            self.renderer.show_scores(self.score, self.high_score),
        );
    }

    // food goes first so the head covers it on the tick it is eaten
    fn draw_scene(&mut self) {
        let size = self.config.grid.cell_size;
        if let Some(food) = self.food {
            skip_on_error(
                "drawing food",
                self.renderer.draw(food, size, Shape::Arc, true, Color::Red),
            );
        }
        let head = self.snake.head();
        for segment in self.snake.segments() {
            let color = if *segment == head {
                Color::Yellow
            } else {
                Color::Green
            };
            let drawn = self.renderer.draw(*segment, size, Shape::Arc, true, color);
            if skip_on_error("drawing the snake", drawn).is_none() {
                break;
            }
        }
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Coordinates) {
        self.food = Some(food);
    }
}
