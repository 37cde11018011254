use clap::ValueEnum;

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells in the grid
    pub const fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major linear index of `(row, col)`
    pub const fn index(&self, row: u32, col: u32) -> usize {
        get_index(self.width, row, col)
    }
}

/// Row-major linear index of `(row, col)` in a grid `width` cells wide.
pub const fn get_index(width: u32, row: u32, col: u32) -> usize {
    row as usize * width as usize + col as usize
}

/// How a universe lays out its cells in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CellLayout {
    /// One bit per cell, least significant bit first.
    #[default]
    Packed,

    /// One byte per cell, `0` is dead and anything else is alive.
    Bytes,
}

impl CellLayout {
    /// Number of bytes needed to hold `cells` cells.
    pub const fn buffer_len(self, cells: usize) -> usize {
        match self {
            CellLayout::Packed => cells.div_ceil(8),
            CellLayout::Bytes => cells,
        }
    }
}

/// A borrowed, read-only view over a universe's cell storage.
///
/// The view borrows the universe, so it cannot outlive a call to `tick` or `toggle_cell`. It
/// has to be requested again after every such call.
#[derive(Debug, Clone, Copy)]
pub struct CellBuffer<'a> {
    layout: CellLayout,
    bytes: &'a [u8],
}

impl<'a> CellBuffer<'a> {
    pub const fn new(layout: CellLayout, bytes: &'a [u8]) -> Self {
        Self { layout, bytes }
    }

    /// Whether cell `i` is alive.
    ///
    /// # Panics
    /// If `i` lies past the end of the buffer. Callers derive `i` from the same dimensions that
    /// sized the buffer, so this is a bug rather than a recoverable condition.
    #[inline]
    pub fn is_alive(&self, i: usize) -> bool {
        match self.layout {
            CellLayout::Packed => bit_is_set(self.bytes, i),
            CellLayout::Bytes => self.bytes[i] != 0,
        }
    }
}

/// Checks bit `n` of a LSB-first bitmap.
#[inline]
pub fn bit_is_set(bytes: &[u8], n: usize) -> bool {
    let mask = 1u8 << (n % 8);
    bytes[n / 8] & mask == mask
}
