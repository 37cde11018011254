use crate::buffer::CellBuffer;
use crate::buffer::Dimensions;
use crate::surface::Color;
use crate::surface::Surface;

/// Colors used to draw the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub grid: Color,
    pub dead: Color,
    pub alive: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color::rgb(0xCC, 0xCC, 0xCC),
            dead: Color::WHITE,
            alive: Color::BLACK,
        }
    }
}

/// Draws a universe as a lattice of `cell_size` squares separated by 1 pixel grid lines.
///
/// Grid line `i` sits on pixel `i * (cell_size + 1)`. The cell at `(row, col)` fills the square
/// starting at `(col * (cell_size + 1) + 1, row * (cell_size + 1) + 1)`.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    cell_size: u32,
    palette: Palette,
}

impl GridRenderer {
    pub fn new(cell_size: u32, palette: Palette) -> Self {
        assert!(cell_size > 0, "cell size must be positive");

        Self { cell_size, palette }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Distance between two consecutive grid lines
    pub fn pitch(&self) -> u32 {
        self.cell_size + 1
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Pixel size of a surface that fits the whole grid
    pub fn surface_size(&self, dims: Dimensions) -> (u32, u32) {
        (
            self.pitch() * dims.width + 1,
            self.pitch() * dims.height + 1,
        )
    }

    /// Draws `width + 1` vertical and `height + 1` horizontal lines in a single stroke.
    pub fn draw_grid<S: Surface>(&self, surface: &mut S, dims: Dimensions) {
        let pitch = self.pitch() as i32;
        let (right, bottom) = (pitch * dims.width as i32, pitch * dims.height as i32);

        surface.begin_path();
        surface.set_stroke_style(self.palette.grid);

        // vertical lines
        for i in 0..=dims.width as i32 {
            surface.move_to(i * pitch, 0);
            surface.line_to(i * pitch, bottom);
        }

        // horizontal lines
        for j in 0..=dims.height as i32 {
            surface.move_to(0, j * pitch);
            surface.line_to(right, j * pitch);
        }

        surface.stroke();
    }

    /// Fills every cell. Changing fill styles can be expensive, so alive cells are all drawn in
    /// one pass and dead cells in another, with a single style change before each.
    pub fn draw_cells<S: Surface>(&self, surface: &mut S, dims: Dimensions, cells: &CellBuffer) {
        surface.set_fill_style(self.palette.alive);
        self.fill_where(surface, dims, |i| cells.is_alive(i));

        surface.set_fill_style(self.palette.dead);
        self.fill_where(surface, dims, |i| !cells.is_alive(i));
    }

    fn fill_where<S, F>(&self, surface: &mut S, dims: Dimensions, f: F)
    where
        S: Surface,
        F: Fn(usize) -> bool,
    {
        for row in 0..dims.height {
            for col in 0..dims.width {
                if !f(dims.index(row, col)) {
                    continue;
                }

                let (x, y) = self.cell_origin(row, col);
                surface.fill_rect(x, y, self.cell_size, self.cell_size);
            }
        }
    }

    /// Top left pixel of the cell at `(row, col)`
    pub fn cell_origin(&self, row: u32, col: u32) -> (i32, i32) {
        let pitch = self.pitch() as i32;
        (col as i32 * pitch + 1, row as i32 * pitch + 1)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::buffer::CellLayout;
    use crate::surface::Brush;
    use crate::surface::PixelCanvas;

    /// Counts fill style changes on top of a real canvas
    struct CountingCanvas {
        inner: PixelCanvas,
        fill_switches: usize,
        strokes: usize,
    }

    impl Surface for CountingCanvas {
        fn size(&self) -> (u32, u32) {
            self.inner.size()
        }

        fn plot(&mut self, x: u32, y: u32, color: Color) {
            self.inner.plot(x, y, color)
        }

        fn brush(&mut self) -> &mut Brush {
            self.inner.brush()
        }

        fn set_fill_style(&mut self, color: Color) {
            self.fill_switches += 1;
            self.inner.set_fill_style(color);
        }

        fn stroke(&mut self) {
            self.strokes += 1;
            self.inner.stroke();
        }
    }

    fn pack(alive: &[bool]) -> Vec<u8> {
        let mut bytes = vec![0; CellLayout::Packed.buffer_len(alive.len())];
        for (i, _) in alive.iter().enumerate().filter(|(_, a)| **a) {
            bytes[i / 8] |= 1 << (i % 8);
        }
        bytes
    }

    /// Reference renderer: switches fill style for every cell.
    fn draw_cells_single_pass<S: Surface>(
        renderer: &GridRenderer,
        surface: &mut S,
        dims: Dimensions,
        cells: &CellBuffer,
    ) {
        let palette = *renderer.palette();

        for row in 0..dims.height {
            for col in 0..dims.width {
                let color = if cells.is_alive(dims.index(row, col)) {
                    palette.alive
                } else {
                    palette.dead
                };

                let (x, y) = renderer.cell_origin(row, col);
                surface.set_fill_style(color);
                surface.fill_rect(x, y, renderer.cell_size(), renderer.cell_size());
            }
        }
    }

    #[test]
    fn surface_size_fits_lattice() {
        let renderer = GridRenderer::new(5, Palette::default());
        assert_eq!(renderer.surface_size(Dimensions::new(64, 64)), (385, 385));
    }

    #[test]
    fn grid_lines_land_on_pitch_multiples() {
        let renderer = GridRenderer::new(2, Palette::default());
        let dims = Dimensions::new(2, 1);
        let (w, h) = renderer.surface_size(dims);
        let mut canvas = PixelCanvas::new(w, h);

        renderer.draw_grid(&mut canvas, dims);

        let grid = renderer.palette().grid;
        for y in 0..h {
            assert_eq!(canvas.pixel(0, y), grid);
            assert_eq!(canvas.pixel(3, y), grid);
            assert_eq!(canvas.pixel(6, y), grid);
        }
        for x in 0..w {
            assert_eq!(canvas.pixel(x, 0), grid);
            assert_eq!(canvas.pixel(x, 3), grid);
        }
        assert_eq!(canvas.pixel(1, 1), Color::WHITE);
    }

    #[test]
    fn cells_use_two_fill_styles_and_one_stroke() {
        let renderer = GridRenderer::new(3, Palette::default());
        let dims = Dimensions::new(4, 3);
        let (w, h) = renderer.surface_size(dims);
        let mut canvas = CountingCanvas {
            inner: PixelCanvas::new(w, h),
            fill_switches: 0,
            strokes: 0,
        };

        let bytes = pack(&[
            true, false, true, false, false, true, true, true, false, false, false, true,
        ]);
        let cells = CellBuffer::new(CellLayout::Packed, &bytes);

        renderer.draw_grid(&mut canvas, dims);
        renderer.draw_cells(&mut canvas, dims, &cells);

        assert_eq!(canvas.fill_switches, 2);
        assert_eq!(canvas.strokes, 1);
    }

    #[test]
    fn cell_squares_sit_inside_the_lattice() {
        let renderer = GridRenderer::new(2, Palette::default());
        let dims = Dimensions::new(2, 2);
        let (w, h) = renderer.surface_size(dims);
        let mut canvas = PixelCanvas::new(w, h);

        // only (1, 0) alive
        let bytes = [0b0100];
        let cells = CellBuffer::new(CellLayout::Packed, &bytes);

        renderer.draw_grid(&mut canvas, dims);
        renderer.draw_cells(&mut canvas, dims, &cells);

        let palette = renderer.palette();
        for (x, y) in [(1, 4), (2, 4), (1, 5), (2, 5)] {
            assert_eq!(canvas.pixel(x, y), palette.alive);
        }
        assert_eq!(canvas.pixel(4, 4), palette.dead);
        assert_eq!(canvas.pixel(3, 4), palette.grid);
        assert_eq!(canvas.pixel(1, 3), palette.grid);
    }

    proptest! {
        #[test]
        fn two_pass_matches_single_pass(
            width in 1u32..12,
            height in 1u32..12,
            cell_size in 1u32..4,
            seed in prop::collection::vec(any::<bool>(), 144),
        ) {
            let dims = Dimensions::new(width, height);
            let alive = &seed[..dims.cells()];
            let bytes = pack(alive);
            let cells = CellBuffer::new(CellLayout::Packed, &bytes);

            let renderer = GridRenderer::new(cell_size, Palette::default());
            let (w, h) = renderer.surface_size(dims);

            let mut two_pass = PixelCanvas::new(w, h);
            renderer.draw_grid(&mut two_pass, dims);
            renderer.draw_cells(&mut two_pass, dims, &cells);

            let mut single_pass = PixelCanvas::new(w, h);
            renderer.draw_grid(&mut single_pass, dims);
            draw_cells_single_pass(&renderer, &mut single_pass, dims, &cells);

            prop_assert_eq!(two_pass.pixels(), single_pass.pixels());
        }

        #[test]
        fn layouts_render_identically(
            width in 1u32..10,
            height in 1u32..10,
            seed in prop::collection::vec(any::<bool>(), 100),
        ) {
            let dims = Dimensions::new(width, height);
            let alive = &seed[..dims.cells()];

            let packed = pack(alive);
            let bytes: Vec<u8> = alive.iter().map(|&a| a as u8).collect();

            let renderer = GridRenderer::new(1, Palette::default());
            let (w, h) = renderer.surface_size(dims);

            let mut a = PixelCanvas::new(w, h);
            renderer.draw_cells(&mut a, dims, &CellBuffer::new(CellLayout::Packed, &packed));

            let mut b = PixelCanvas::new(w, h);
            renderer.draw_cells(&mut b, dims, &CellBuffer::new(CellLayout::Bytes, &bytes));

            prop_assert_eq!(a.pixels(), b.pixels());
        }
    }
}
