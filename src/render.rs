use crate::coordinates::Coordinates;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Blue,
    Purple,
    Yellow,
}

/// What the status line says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Playing,
    Dead,
    Won,
}

/// Drawing surface used by the game. Points are cell centres in pixels.
pub trait Renderer {
    fn draw(
        &mut self,
        point: Coordinates,
        size: i32,
        shape: Shape,
        fill: bool,
        color: Color,
    ) -> Result<()>;

    /// Clears a square of `size` pixels centred on `point`, or everything.
    fn clear(&mut self, area: Option<(Coordinates, i32)>) -> Result<()>;

    fn show_scores(&mut self, score: u32, high_score: u32) -> Result<()>;

    fn show_status(&mut self, status: Status) -> Result<()>;
}
