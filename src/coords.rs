use crate::buffer::Dimensions;

/// An on-page rectangle, in the same units as pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.left..self.left + self.width).contains(&x)
            && (self.top..self.top + self.height).contains(&y)
    }
}

/// Translates pointer positions into logical `(row, col)` grid coordinates.
///
/// The surface may be displayed at a different size than its intrinsic pixel size (CSS scaling,
/// or terminal cells covering several pixels each), so positions are scaled before they are
/// divided into cells.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    dims: Dimensions,
    cell_size: u32,
}

impl CoordinateMapper {
    pub fn new(dims: Dimensions, cell_size: u32) -> Self {
        Self { dims, cell_size }
    }

    /// Maps a page-relative pointer position to `(row, col)`.
    ///
    /// `bounds` is where the surface is displayed and `intrinsic` its `(width, height)` in
    /// pixels. The result is clamped into the grid, so a pointer on the very last pixel (or a
    /// little past it, after rounding) still lands on the last row or column.
    pub fn cell_at(
        &self,
        x: f64,
        y: f64,
        bounds: BoundingBox,
        intrinsic: (u32, u32),
    ) -> (u32, u32) {
        let scale_x = intrinsic.0 as f64 / bounds.width;
        let scale_y = intrinsic.1 as f64 / bounds.height;

        let canvas_left = (x - bounds.left) * scale_x;
        let canvas_top = (y - bounds.top) * scale_y;

        let pitch = (self.cell_size + 1) as f64;

        // `as` saturates, so positions left of or above the surface land on 0
        let row = ((canvas_top / pitch).floor() as u32).min(self.dims.height.saturating_sub(1));
        let col = ((canvas_left / pitch).floor() as u32).min(self.dims.width.saturating_sub(1));

        (row, col)
    }
}
