use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

/// Largest number of columns or rows a playfield may have.
pub const MAX_CELLS_PER_SIDE: i32 = 500;
/// Largest playfield side in pixels, keeps every step well inside `i32`.
pub const MAX_DIMENSION: i32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A position on the playfield, in pixels. Values on the grid are always cell
/// centres, i.e. `cell_size / 2 + k * cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    x: i32,
    y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn get_left(&self, distance: i32) -> Coordinates {
        Coordinates::new(self.x - distance, self.y)
    }
    pub fn get_right(&self, distance: i32) -> Coordinates {
        Coordinates::new(self.x + distance, self.y)
    }
    pub fn get_up(&self, distance: i32) -> Coordinates {
        Coordinates::new(self.x, self.y - distance)
    }
    pub fn get_down(&self, distance: i32) -> Coordinates {
        Coordinates::new(self.x, self.y + distance)
    }

    pub fn get_towards(&self, direction: Direction, distance: i32) -> Coordinates {
        match direction {
            Direction::Up => self.get_up(distance),
            Direction::Down => self.get_down(distance),
            Direction::Left => self.get_left(distance),
            Direction::Right => self.get_right(distance),
        }
    }
}

/// Pixel dimensions of the playfield and the size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Result<Grid> {
        let grid = Grid {
            width,
            height,
            cell_size,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(SnakeError::InvalidArgument(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(SnakeError::InvalidArgument(format!(
                "a {}x{} playfield exceeds {}px per side",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if self.columns() > MAX_CELLS_PER_SIDE || self.rows() > MAX_CELLS_PER_SIDE {
            return Err(SnakeError::InvalidArgument(format!(
                "a {}x{} cell playfield exceeds {} cells per side",
                self.columns(),
                self.rows(),
                MAX_CELLS_PER_SIDE
            )));
        }
        if self.columns() < 1 || self.rows() < 1 {
            return Err(SnakeError::InvalidArgument(format!(
                "a {}x{} playfield holds no {}px cell",
                self.width, self.height, self.cell_size
            )));
        }
        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        let columns = self.columns().max(0) as usize;
        let rows = self.rows().max(0) as usize;
        columns.saturating_mul(rows)
    }

    pub fn half_cell(&self) -> i32 {
        self.cell_size / 2
    }

    pub fn cell_center(&self, column: i32, row: i32) -> Coordinates {
        Coordinates::new(
            self.half_cell() + column * self.cell_size,
            self.half_cell() + row * self.cell_size,
        )
    }

    /// Column and row of a cell centre, `None` for anything off the grid.
    pub fn cell_of(&self, point: Coordinates) -> Option<(i32, i32)> {
        if !self.contains(point) {
            return None;
        }
        Some((
            (point.x() - self.half_cell()) / self.cell_size,
            (point.y() - self.half_cell()) / self.cell_size,
        ))
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        let aligned = (point.x() - self.half_cell()) % self.cell_size == 0
            && (point.y() - self.half_cell()) % self.cell_size == 0;
        aligned
            && point.x() >= self.half_cell()
            && point.x() <= self.last_center_x()
            && point.y() >= self.half_cell()
            && point.y() <= self.last_center_y()
    }

    pub fn cells(&self) -> impl Iterator<Item = Coordinates> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |column| self.cell_center(column, row)))
    }

    /// Moves one cell towards `direction`, re-entering from the opposite edge
    /// when the move leaves the playfield.
    pub fn step(&self, from: Coordinates, direction: Direction) -> Coordinates {
        let next = from.get_towards(direction, self.cell_size);
        if next.x() < self.half_cell() {
            Coordinates::new(self.last_center_x(), next.y())
        } else if next.x() > self.last_center_x() {
            Coordinates::new(self.half_cell(), next.y())
        } else if next.y() < self.half_cell() {
            Coordinates::new(next.x(), self.last_center_y())
        } else if next.y() > self.last_center_y() {
            Coordinates::new(next.x(), self.half_cell())
        } else {
            next
        }
    }

    fn last_center_x(&self) -> i32 {
        self.cell_center(self.columns() - 1, 0).x()
    }

    fn last_center_y(&self) -> i32 {
        self.cell_center(0, self.rows() - 1).y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(580, 340, 20).unwrap()
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }

    #[test]
    fn default_playfield_dimensions() {
        let grid = grid();
        assert_eq!(grid.columns(), 29);
        assert_eq!(grid.rows(), 17);
        assert_eq!(grid.cell_count(), 29 * 17);
        assert_eq!(grid.cells().count(), 29 * 17);
        assert_eq!(grid.cell_center(7, 4), Coordinates::new(150, 90));
        assert_eq!(grid.cell_of(Coordinates::new(150, 90)), Some((7, 4)));
    }

    #[test]
    fn contains_rejects_misaligned_and_outside_points() {
        let grid = grid();
        assert!(grid.contains(Coordinates::new(10, 10)));
        assert!(grid.contains(Coordinates::new(570, 330)));
        assert!(!grid.contains(Coordinates::new(0, 10)));
        assert!(!grid.contains(Coordinates::new(15, 10)));
        assert!(!grid.contains(Coordinates::new(590, 10)));
        assert!(!grid.contains(Coordinates::new(10, 350)));
    }

    #[test]
    fn step_wraps_on_every_edge() {
        let grid = grid();
        assert_eq!(
            grid.step(Coordinates::new(570, 90), Direction::Right),
            Coordinates::new(10, 90)
        );
        assert_eq!(
            grid.step(Coordinates::new(10, 90), Direction::Left),
            Coordinates::new(570, 90)
        );
        assert_eq!(
            grid.step(Coordinates::new(150, 10), Direction::Up),
            Coordinates::new(150, 330)
        );
        assert_eq!(
            grid.step(Coordinates::new(150, 330), Direction::Down),
            Coordinates::new(150, 10)
        );
        assert_eq!(
            grid.step(Coordinates::new(150, 90), Direction::Right),
            Coordinates::new(170, 90)
        );
    }

    #[test]
    fn step_stays_on_the_grid() {
        let grid = Grid::new(60, 40, 20).unwrap();
        for start in grid.cells().collect::<Vec<_>>() {
            for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
                let next = grid.step(start, direction);
                assert!(grid.contains(next), "{:?} -> {:?}", start, next);
                assert!(next.x() >= 0 && next.x() < grid.width);
                assert!(next.y() >= 0 && next.y() < grid.height);
            }
        }
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert!(matches!(
            Grid::new(1_000_000, 1_000_000, 1),
            Err(SnakeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Grid::new(i32::MAX, 40, 1 << 30),
            Err(SnakeError::InvalidArgument(_))
        ));
        assert!(Grid::new(10_000, 10_000, 20).is_ok());
        assert_eq!(
            Grid {
                width: i32::MAX,
                height: i32::MAX,
                cell_size: 1
            }
            .cell_count(),
            (i32::MAX as usize) * (i32::MAX as usize)
        );
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(matches!(
            Grid::new(580, 340, 0),
            Err(SnakeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Grid::new(10, 340, 20),
            Err(SnakeError::InvalidArgument(_))
        ));
    }
}
