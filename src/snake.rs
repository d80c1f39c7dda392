// the body moves from tail to head: every segment takes the place of the one
// in front of it, then the head steps one cell
use std::collections::{HashSet, VecDeque};

use crate::coordinates::{Coordinates, Direction, Grid};
use crate::error::{Result, SnakeError};

pub const MIN_SNAKE_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct SnakeBody {
    segments: VecDeque<Coordinates>, // The head is the first element
    vacated_tail: Option<Coordinates>,
}

impl SnakeBody {
    pub fn new(segments: &[Coordinates]) -> Result<Self> {
        if segments.len() < MIN_SNAKE_SIZE {
            return Err(SnakeError::InvalidArgument(format!(
                "a snake needs at least {} segments, got {}",
                MIN_SNAKE_SIZE,
                segments.len()
            )));
        }
        Ok(SnakeBody {
            segments: segments.iter().copied().collect(),
            vacated_tail: None,
        })
    }

    pub fn head(&self) -> Coordinates {
        self.segments[0]
    }

    pub fn tail(&self) -> Coordinates {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coordinates> {
        self.segments.iter()
    }

    pub fn occupied(&self) -> HashSet<Coordinates> {
        self.segments.iter().copied().collect()
    }

    /// Shifts the body forward by one cell. Leaving the grid wraps the head to
    /// the opposite edge.
    pub fn advance_head(&mut self, direction: Direction, grid: &Grid) -> Coordinates {
        let new_head = grid.step(self.head(), direction);
        // the body never drops below its spawn length, so there is always a tail
        self.vacated_tail = self.segments.pop_back();
        self.segments.push_front(new_head);
        new_head
    }

    /// Adds one trailing segment on the cell the tail left during the last
    /// advance, or on top of the tail before the first one.
    pub fn grow(&mut self) {
        let segment = self.vacated_tail.take().unwrap_or_else(|| self.tail());
        self.segments.push_back(segment);
    }

    pub fn collides_with_head(&self, point: Coordinates) -> bool {
        self.head() == point
    }

    pub fn self_collision(&self) -> bool {
        let head = self.head();
        // skip the head, which is always at the front
        self.segments.iter().skip(1).any(|segment| *segment == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(580, 340, 20).unwrap()
    }

    fn spawn() -> SnakeBody {
        SnakeBody::new(&[
            Coordinates::new(150, 90),
            Coordinates::new(130, 90),
            Coordinates::new(110, 90),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_short_bodies() {
        assert!(SnakeBody::new(&[Coordinates::new(10, 10), Coordinates::new(30, 10)]).is_err());
    }

    #[test]
    fn advance_shifts_every_segment() {
        let mut snake = spawn();
        let head = snake.advance_head(Direction::Right, &grid());
        assert_eq!(head, Coordinates::new(170, 90));
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Coordinates::new(170, 90),
                Coordinates::new(150, 90),
                Coordinates::new(130, 90),
            ]
        );
    }

    #[test]
    fn advance_wraps_the_head() {
        let mut snake = SnakeBody::new(&[
            Coordinates::new(570, 10),
            Coordinates::new(550, 10),
            Coordinates::new(530, 10),
        ])
        .unwrap();
        snake.advance_head(Direction::Right, &grid());
        assert_eq!(snake.head(), Coordinates::new(10, 10));
        snake.advance_head(Direction::Up, &grid());
        assert_eq!(snake.head(), Coordinates::new(10, 330));
    }

    #[test]
    fn grow_reoccupies_the_vacated_tail() {
        let mut snake = spawn();
        snake.advance_head(Direction::Right, &grid());
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Coordinates::new(110, 90));
        assert_eq!(snake.occupied().len(), 4);

        snake.advance_head(Direction::Right, &grid());
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Coordinates::new(190, 90),
                Coordinates::new(170, 90),
                Coordinates::new(150, 90),
                Coordinates::new(130, 90),
            ]
        );
    }

    #[test]
    fn grows_by_one_per_call() {
        let mut snake = spawn();
        for eaten in 1..=5 {
            snake.advance_head(Direction::Down, &grid());
            snake.grow();
            assert_eq!(snake.len(), MIN_SNAKE_SIZE + eaten);
        }
        assert!(!snake.self_collision());
    }

    #[test]
    fn detects_head_collisions() {
        let snake = spawn();
        assert!(snake.collides_with_head(Coordinates::new(150, 90)));
        assert!(!snake.collides_with_head(Coordinates::new(130, 90)));
    }

    #[test]
    fn detects_self_collision() {
        let mut snake = SnakeBody::new(&[
            Coordinates::new(50, 50),
            Coordinates::new(30, 50),
            Coordinates::new(30, 70),
            Coordinates::new(50, 70),
            Coordinates::new(70, 70),
        ])
        .unwrap();
        assert!(!snake.self_collision());
        snake.advance_head(Direction::Down, &grid());
        assert!(snake.self_collision());
    }

    #[test]
    fn moving_into_the_vacated_tail_is_safe() {
        let mut snake = SnakeBody::new(&[
            Coordinates::new(50, 50),
            Coordinates::new(30, 50),
            Coordinates::new(30, 70),
            Coordinates::new(50, 70),
        ])
        .unwrap();
        snake.advance_head(Direction::Down, &grid());
        assert_eq!(snake.head(), Coordinates::new(50, 70));
        assert!(!snake.self_collision());
    }
}
