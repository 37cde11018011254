use crate::surface::Brush;
use crate::surface::Color;
use crate::surface::Surface;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A raster surface backed by braille characters. Each character covers a 2x4 block of pixels,
/// and a pixel is lit when it was last painted with a dark color.
pub struct Camera {
    /// The pixel buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    brush: Brush,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // Each braille character is 3 bytes in UTF-8, and each newline one byte. With
        // `bw = ceil(w / 2)` and `bh = ceil(h / 4)`, that's `3 * (bw * bh) + bh` bytes.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
            brush: Brush::default(),
        }
    }

    /// Width of the rendered frame, in terminal columns
    pub fn cols(&self) -> usize {
        self.w.div_ceil(2)
    }

    /// Height of the rendered frame, in terminal rows
    pub fn rows(&self) -> usize {
        self.h.div_ceil(4)
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        self.cb[self.xy_from(x, y)]
    }

    /// Encodes the pixel buffer as lines of braille, each line terminated by `'\n'`.
    pub fn render(&mut self) -> &str {
        let bw = self.cols();

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint lies within U+2800..=U+28FF
            let ch = char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER);
            self.fb.push(ch);
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Surface for Camera {
    fn size(&self) -> (u32, u32) {
        (self.w as u32, self.h as u32)
    }

    fn plot(&mut self, x: u32, y: u32, color: Color) {
        let (x, y) = (x as usize, y as usize);
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);
        self.cb[i] = color.is_dark();
    }

    fn brush(&mut self) -> &mut Brush {
        &mut self.brush
    }
}
