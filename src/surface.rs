#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 255]` (Rec. 601 weights)
    pub fn luma(&self) -> u8 {
        let y = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        y.round() as u8
    }

    pub fn is_dark(&self) -> bool {
        self.luma() < 128
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Drawing state shared by every [`Surface`]: current styles and the path being built.
#[derive(Debug, Clone)]
pub struct Brush {
    stroke: Color,
    fill: Color,
    cursor: Option<Point>,
    segments: Vec<(Point, Point)>,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            fill: Color::BLACK,
            cursor: None,
            segments: Vec::new(),
        }
    }
}

/// A 2D raster drawing surface.
///
/// Implementors only provide pixel access and their [`Brush`]. Paths, strokes and fills are
/// built on top of those. Anything drawn outside of the surface is clipped.
pub trait Surface {
    /// `(width, height)` in pixels
    fn size(&self) -> (u32, u32);

    fn plot(&mut self, x: u32, y: u32, color: Color);

    fn brush(&mut self) -> &mut Brush;

    fn begin_path(&mut self) {
        let brush = self.brush();
        brush.cursor = None;
        brush.segments.clear();
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.brush().stroke = color;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.brush().fill = color;
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.brush().cursor = Some(Point { x, y });
    }

    fn line_to(&mut self, x: i32, y: i32) {
        let to = Point { x, y };
        let brush = self.brush();

        if let Some(from) = brush.cursor {
            brush.segments.push((from, to));
        }

        brush.cursor = Some(to);
    }

    /// Strokes every segment of the current path, 1 pixel wide, in a single pass.
    fn stroke(&mut self) {
        let brush = self.brush();
        let color = brush.stroke;
        let segments = std::mem::take(&mut brush.segments);

        for &(from, to) in &segments {
            plot_line(self, from, to, color);
        }

        // the path survives a stroke, just like a canvas path does
        self.brush().segments = segments;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        let color = self.brush().fill;
        let (sw, sh) = self.size();

        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(sw as i64);
        let y1 = (y as i64 + h as i64).min(sh as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px as u32, py as u32, color);
            }
        }
    }
}

/// Bresenham's line, clipped to the surface.
fn plot_line<S: Surface + ?Sized>(surface: &mut S, from: Point, to: Point, color: Color) {
    let (w, h) = surface.size();

    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i64).contains(&x) && (0..h as i64).contains(&y) {
            surface.plot(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// RGB raster kept in memory. Useful headless, and for comparing renders pixel by pixel.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    brush: Brush,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0xFF; width as usize * height as usize * 3],
            width,
            height,
            brush: Brush::default(),
        }
    }

    /// Raw RGB bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.offset(x, y);
        Color::rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        (y as usize * self.width as usize + x as usize) * 3
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn plot(&mut self, x: u32, y: u32, color: Color) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&[color.r, color.g, color.b]);
    }

    fn brush(&mut self) -> &mut Brush {
        &mut self.brush
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RED: Color = Color::rgb(0xFF, 0, 0);

    #[test]
    fn stroke_draws_every_segment_of_the_path() {
        let mut canvas = PixelCanvas::new(5, 5);

        canvas.begin_path();
        canvas.set_stroke_style(RED);
        canvas.move_to(0, 0);
        canvas.line_to(4, 0);
        canvas.move_to(2, 0);
        canvas.line_to(2, 4);
        canvas.stroke();

        for x in 0..5 {
            assert_eq!(canvas.pixel(x, 0), RED);
        }
        for y in 0..5 {
            assert_eq!(canvas.pixel(2, y), RED);
        }
        assert_eq!(canvas.pixel(0, 1), Color::WHITE);
    }

    #[test]
    fn nothing_is_drawn_before_stroke() {
        let mut canvas = PixelCanvas::new(3, 3);

        canvas.begin_path();
        canvas.move_to(0, 1);
        canvas.line_to(2, 1);

        assert!(canvas.pixels().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn shapes_are_clipped_to_the_surface() {
        let mut canvas = PixelCanvas::new(4, 4);

        canvas.set_fill_style(Color::BLACK);
        canvas.fill_rect(-2, 2, 10, 10);

        canvas.begin_path();
        canvas.move_to(-5, 0);
        canvas.line_to(10, 0);
        canvas.stroke();

        assert_eq!(canvas.pixel(0, 0), Color::BLACK);
        assert_eq!(canvas.pixel(3, 0), Color::BLACK);
        assert_eq!(canvas.pixel(0, 1), Color::WHITE);
        assert_eq!(canvas.pixel(3, 3), Color::BLACK);
    }

    #[test]
    fn luma_splits_light_and_dark() {
        assert!(Color::BLACK.is_dark());
        assert!(Color::rgb(60, 60, 60).is_dark());
        assert!(!Color::rgb(0xCC, 0xCC, 0xCC).is_dark());
        assert!(!Color::WHITE.is_dark());
    }
}
