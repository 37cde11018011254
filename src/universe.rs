use std::fmt;
use std::time::Instant;

use clap::ValueEnum;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

use crate::buffer::CellBuffer;
use crate::buffer::CellLayout;
use crate::buffer::Dimensions;
use crate::buffer::bit_is_set;

/// A cellular automaton whose state can be drawn and poked at.
///
/// The visualizer only reads cells through [`Universe::cells`], which borrows the universe: the
/// view has to be requested again after any call that mutates it.
pub trait Universe {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// How [`Universe::cells`] lays out its bytes
    fn layout(&self) -> CellLayout;

    /// Raw cell storage, `layout().buffer_len(width * height)` bytes long
    fn cells(&self) -> &[u8];

    /// Advances the universe by one generation.
    fn tick(&mut self);

    /// Flips a single cell between alive and dead.
    fn toggle_cell(&mut self, row: u32, col: u32);

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    fn cell_buffer(&self) -> CellBuffer<'_> {
        CellBuffer::new(self.layout(), self.cells())
    }
}

/// How a fresh [`Life`] universe is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Pattern {
    Empty,

    /// Cell `i` is alive when `i % 2 == 0 || i % 7 == 0`
    Alternating,

    /// Every cell is alive with probability 1/2. A seed makes the pattern reproducible.
    #[default]
    Random,
}

/// Conway's Game of Life (B3/S23) on a torus: the edges wrap around on both axes.
#[derive(Debug, Clone)]
pub struct Life {
    width: u32,
    height: u32,
    layout: CellLayout,
    cells: Vec<u8>,
    generation: u64,
}

impl Life {
    /// Create a universe where every cell is dead
    pub fn new(width: u32, height: u32, layout: CellLayout) -> Self {
        let n = width as usize * height as usize;

        Self {
            width,
            height,
            layout,
            cells: vec![0; layout.buffer_len(n)],
            generation: 0,
        }
    }

    pub fn with_pattern(
        width: u32,
        height: u32,
        layout: CellLayout,
        pattern: Pattern,
        seed: Option<u64>,
    ) -> Self {
        let mut life = Self::new(width, height, layout);

        match pattern {
            Pattern::Empty => {}
            Pattern::Alternating => {
                for i in 0..life.len() {
                    life.set(i, i % 2 == 0 || i % 7 == 0);
                }
            }
            Pattern::Random => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };

                for i in 0..life.len() {
                    life.set(i, rng.gen_bool(0.5));
                }
            }
        }

        life
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        self.get(self.index(row, col))
    }

    /// Mark every cell in `cells`, given as `(row, col)`, alive
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            let i = self.index(row, col);
            self.set(i, true);
        }
    }

    /// Resize horizontally. Every cell dies.
    pub fn set_width(&mut self, width: u32) {
        *self = Self::new(width, self.height, self.layout);
    }

    /// Resize vertically. Every cell dies.
    pub fn set_height(&mut self, height: u32) {
        *self = Self::new(self.width, height, self.layout);
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(row < self.height, "row is out of bounds");
        assert!(col < self.width, "col is out of bounds");

        self.dimensions().index(row, col)
    }

    fn get(&self, i: usize) -> bool {
        match self.layout {
            CellLayout::Packed => bit_is_set(&self.cells, i),
            CellLayout::Bytes => self.cells[i] != 0,
        }
    }

    fn set(&mut self, i: usize, alive: bool) {
        set_cell(self.layout, &mut self.cells, i, alive);
    }

    /// Count how many of the 8 neighbors are alive, wrapping around the edges
    fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        let mut count = 0;

        for dr in [self.height - 1, 0, 1] {
            for dc in [self.width - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = (row + dr) % self.height;
                let c = (col + dc) % self.width;
                count += self.get(self.dimensions().index(r, c)) as u8;
            }
        }

        count
    }
}

fn set_cell(layout: CellLayout, cells: &mut [u8], i: usize, alive: bool) {
    match layout {
        CellLayout::Packed => {
            let mask = 1u8 << (i % 8);
            if alive {
                cells[i / 8] |= mask;
            } else {
                cells[i / 8] &= !mask;
            }
        }
        CellLayout::Bytes => cells[i] = alive as u8,
    }
}

impl Universe for Life {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn layout(&self) -> CellLayout {
        self.layout
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn tick(&mut self) {
        let _timer = Timer::new("Life::tick");

        let mut next = self.cells.clone();

        for row in 0..self.height {
            for col in 0..self.width {
                let i = self.dimensions().index(row, col);
                let alive = self.get(i);

                let next_alive = matches!(
                    (alive, self.live_neighbor_count(row, col)),
                    (true, 2) | (true, 3) | (false, 3)
                );

                set_cell(self.layout, &mut next, i, next_alive);
            }
        }

        self.cells = next;
        self.generation += 1;
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        let i = self.index(row, col);
        let alive = self.get(i);
        self.set(i, !alive);
    }
}

impl fmt::Display for Life {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.is_alive(row, col) { '◼' } else { '◻' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Logs how long it lived once dropped
struct Timer<'a> {
    name: &'a str,
    start: Instant,
}

impl<'a> Timer<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        trace!(name = self.name, elapsed = ?self.start.elapsed(), "timer");
    }
}
