// Terminal host for the game: raw stdin, a colored frame buffer and the frame
// scheduler standing in for the browser's animation-frame callback.
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use circular_buffer::CircularBuffer;
use colored::Colorize;
use rand::Rng;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

use crate::coordinates::{Coordinates, Direction, Grid};
use crate::error::{Result, SnakeError};
use crate::game::GameLoop;
use crate::input::Key;
use crate::render::{Color, Renderer, Shape, Status};
use crate::store::ScoreStore;
use crate::text::format_text;

type InputBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

const FRAME_INTERVAL: Duration = Duration::from_millis(3);
const QUIT_KEY: Key = Key::Char('x');
const ESC: u8 = 27;
const CSI: u8 = 91;

fn clear_screen() -> String {
    format!("{}[2J{}[1;1H", ESC as char, ESC as char)
}

/// Switches stdin to unbuffered, silent input and restores it on drop.
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        // 0 is the file descriptor for stdin
        let original = Termios::from_fd(0).map_err(|err| {
            SnakeError::MissingElement(format!("stdin is not a terminal: {}", err))
        })?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(0, TCSANOW, &raw)?;
        Ok(RawMode { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = tcsetattr(0, TCSANOW, &self.original) {
            error!("failed to restore the terminal: {}", err);
        }
    }
}

fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer: [u8; 1] = [0; 1];
        // read one byte at a time until stdin closes or the game stops listening
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

/// Turns raw stdin bytes into keys. Arrow keys arrive as `ESC [ A..D`.
pub struct KeyDecoder {
    buffer: InputBuffer,
}

impl KeyDecoder {
    pub fn new() -> Self {
        KeyDecoder {
            buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, byte: u8) {
        // if the buffer is full, ignore the input
        if self.buffer.is_full() {
            return;
        }
        self.buffer.push_back(byte);
    }

    pub fn next_key(&mut self) -> Option<Key> {
        loop {
            let first = *self.buffer.front()?;
            if first != ESC {
                self.buffer.pop_front();
                if first.is_ascii_graphic() || first == b' ' {
                    return Some(Key::Char(first as char));
                }
                continue;
            }
            match self.buffer.nth_front(1).copied() {
                // wait for the rest of the sequence
                None => return None,
                Some(CSI) => {}
                Some(_) => {
                    self.buffer.pop_front();
                    continue;
                }
            }
            let last = *self.buffer.nth_front(2)?;
            // remove the whole sequence from the buffer
            for _ in 0..3 {
                self.buffer.pop_front();
            }
            let direction = match last {
                65 => Direction::Up,
                66 => Direction::Down,
                67 => Direction::Right,
                68 => Direction::Left,
                _ => continue, // not an arrow
            };
            return Some(Key::Arrow(direction));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mark {
    shape: Shape,
    fill: bool,
    color: Color,
}

/// Frame buffer with one slot per grid cell, printed as a bordered board.
pub struct TerminalRenderer {
    grid: Grid,
    cells: Vec<Vec<Option<Mark>>>,
    score: u32,
    high_score: u32,
    status: Status,
    dirty: bool,
}

impl TerminalRenderer {
    pub fn new(grid: Grid) -> Self {
        TerminalRenderer {
            grid,
            cells: vec![vec![None; grid.rows() as usize]; grid.columns() as usize],
            score: 0,
            high_score: 0,
            status: Status::Ready,
            dirty: true,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    fn status_line(&self) -> String {
        match self.status {
            Status::Ready => format_text("press-space-to-play"),
            Status::Playing => format_text("playing"),
            Status::Dead => "💀".to_string(),
            Status::Won => format_text("board-full"),
        }
    }

    fn glyph(mark: &Mark) -> String {
        let symbol = match (mark.shape, mark.fill) {
            (Shape::Arc, true) => "⏺ ",
            (Shape::Arc, false) => "○ ",
            (Shape::Rect, true) => "■ ",
            (Shape::Rect, false) => "□ ",
        };
        let color = match mark.color {
            Color::Black => colored::Color::Black,
            Color::Red => colored::Color::Red,
            Color::Green => colored::Color::Green,
            Color::Blue => colored::Color::Blue,
            Color::Purple => colored::Color::Magenta,
            Color::Yellow => colored::Color::Yellow,
        };
        symbol.color(color).to_string()
    }

    pub fn render_frame(&self) -> String {
        let columns = self.grid.columns() as usize;
        let mut frame = String::new();
        //border up
        frame.push('▗');
        frame.push_str(&"▄▄".repeat(columns));
        frame.push_str("▖\n");
        for row in 0..self.grid.rows() as usize {
            frame.push('▐');
            for column in 0..columns {
                match &self.cells[column][row] {
                    Some(mark) => frame.push_str(&Self::glyph(mark)),
                    None => frame.push_str("  "),
                }
            }
            frame.push_str("▌\n");
        }
        //border down
        frame.push('▝');
        frame.push_str(&"▀▀".repeat(columns));
        frame.push_str("▘\n");
        frame.push_str(&format!(
            "Score: {}    High score: {}\n",
            self.score, self.high_score
        ));
        frame.push_str(&self.status_line());
        frame.push('\n');
        frame
    }

    /// Prints the frame if anything changed since the last call.
    pub fn present(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        write!(out, "{}{}", clear_screen(), self.render_frame())?;
        out.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn cell_index(&self, point: Coordinates) -> Result<(usize, usize)> {
        self.grid
            .cell_of(point)
            .map(|(column, row)| (column as usize, row as usize))
            .ok_or_else(|| {
                SnakeError::InvalidArgument(format!(
                    "({}, {}) is not a cell of the playfield",
                    point.x(),
                    point.y()
                ))
            })
    }
}

impl Renderer for TerminalRenderer {
    fn draw(
        &mut self,
        point: Coordinates,
        size: i32,
        shape: Shape,
        fill: bool,
        color: Color,
    ) -> Result<()> {
        if size <= 0 {
            return Err(SnakeError::InvalidArgument(format!("invalid size {}", size)));
        }
        let (column, row) = self.cell_index(point)?;
        self.cells[column][row] = Some(Mark { shape, fill, color });
        self.dirty = true;
        Ok(())
    }

    fn clear(&mut self, area: Option<(Coordinates, i32)>) -> Result<()> {
        match area {
            None => self.cells.iter_mut().for_each(|column| column.fill(None)),
            Some((point, size)) => {
                if size <= 0 {
                    return Err(SnakeError::InvalidArgument(format!("invalid size {}", size)));
                }
                let half = size / 2;
                let covered: Vec<(usize, usize)> = self
                    .grid
                    .cells()
                    .filter(|cell| {
                        cell.x() >= point.x() - half
                            && cell.x() < point.x() - half + size
                            && cell.y() >= point.y() - half
                            && cell.y() < point.y() - half + size
                    })
                    .filter_map(|cell| self.grid.cell_of(cell))
                    .map(|(column, row)| (column as usize, row as usize))
                    .collect();
                for (column, row) in covered {
                    self.cells[column][row] = None;
                }
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn show_scores(&mut self, score: u32, high_score: u32) -> Result<()> {
        self.score = score;
        self.high_score = high_score;
        self.dirty = true;
        Ok(())
    }

    fn show_status(&mut self, status: Status) -> Result<()> {
        self.status = status;
        self.dirty = true;
        Ok(())
    }
}

/// Drives the game from the terminal until the quit key is pressed.
pub fn run<S: ScoreStore, G: Rng>(game: &mut GameLoop<TerminalRenderer, S, G>) -> Result<()> {
    let raw_mode = RawMode::enable()?;
    let stdin_channel = spawn_stdin_channel();
    let mut decoder = KeyDecoder::new();
    let mut stdout = io::stdout();
    info!("terminal host started");

    'frames: loop {
        // receive input from pipe
        loop {
            match stdin_channel.try_recv() {
                Ok(byte) => decoder.push(byte),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(SnakeError::RuntimeFailure("stdin closed".to_string()))
                }
            }
        }
        while let Some(key) = decoder.next_key() {
            if key == QUIT_KEY {
                break 'frames;
            }
            game.handle_key(key);
        }

        let outcome = game.frame(Instant::now());
        trace!("frame: {:?}", outcome);
        game.renderer_mut().present(&mut stdout)?;
        thread::sleep(FRAME_INTERVAL);
    }

    drop(raw_mode);
    let renderer = game.renderer();
    println!("Game Over!");
    println!("Final Score: {}", renderer.score());
    println!("High Score: {}", renderer.high_score());
    info!("terminal host stopped");
    Ok(())
}
