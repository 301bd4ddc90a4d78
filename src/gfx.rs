//! Chunky 8-bit indexed raster backend. One byte per pixel, so a
//! screen byte offset is simply `y * width + x`, which keeps the
//! projectile undraw history a plain offset array.

#[derive(Clone)]
pub struct Bitmap {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: u16, height: u16, color: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn offset_of(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    pub fn get(&self, x: u16, y: u16) -> u8 {
        self.pixels[self.offset_of(x, y)]
    }

    pub fn put(&mut self, x: u16, y: u16, color: u8) {
        if x < self.width && y < self.height {
            let offset = self.offset_of(x, y);
            self.pixels[offset] = color;
        }
    }

    pub fn get_at_offset(&self, offset: usize) -> u8 {
        self.pixels[offset]
    }

    pub fn put_at_offset(&mut self, offset: usize, color: u8) {
        self.pixels[offset] = color;
    }

    /// Restores one pixel from `source` at the same byte offset. The
    /// projectile undraw path leans on this being valid for any offset
    /// recorded from the same-sized buffer.
    pub fn restore_at_offset(&mut self, source: &Bitmap, offset: usize) {
        self.pixels[offset] = source.pixels[offset];
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u8) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y..y_end {
            let start = self.offset_of(x, row);
            let end = start + usize::from(x_end - x);
            self.pixels[start..end].fill(color);
        }
    }

    pub fn blit_copy(&mut self, src: &Bitmap, sx: u16, sy: u16, dx: u16, dy: u16, w: u16, h: u16) {
        let w = w.min(src.width.saturating_sub(sx)).min(self.width.saturating_sub(dx));
        let h = h.min(src.height.saturating_sub(sy)).min(self.height.saturating_sub(dy));
        for row in 0..h {
            let src_start = src.offset_of(sx, sy + row);
            let dst_start = self.offset_of(dx, dy + row);
            let width = usize::from(w);
            self.pixels[dst_start..dst_start + width]
                .copy_from_slice(&src.pixels[src_start..src_start + width]);
        }
    }

    /// Cookie-cut blit: pixels where `mask` is zero stay untouched.
    pub fn blit_masked(
        &mut self,
        src: &Bitmap,
        mask: &Bitmap,
        sx: u16,
        sy: u16,
        dx: u16,
        dy: u16,
        w: u16,
        h: u16,
    ) {
        let w = w.min(src.width.saturating_sub(sx)).min(self.width.saturating_sub(dx));
        let h = h.min(src.height.saturating_sub(sy)).min(self.height.saturating_sub(dy));
        for row in 0..h {
            for col in 0..w {
                if mask.get(sx + col, sy + row) != 0 {
                    let offset = self.offset_of(dx + col, dy + row);
                    self.pixels[offset] = src.get(sx + col, sy + row);
                }
            }
        }
    }
}

const DIGIT_WIDTH: u16 = 5;
const DIGIT_HEIGHT: u16 = 7;

// 5x7 digit glyphs, one bit per pixel, MSB leftmost.
const DIGIT_GLYPHS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
    [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b01110, 0b10000, 0b11110, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],
];

/// Draws `value` in decimal, left-aligned at `(x, y)`. Returns the
/// width consumed so callers can chain labels.
pub fn draw_number(target: &mut Bitmap, x: u16, y: u16, value: u32, color: u8) -> u16 {
    let text = value.to_string();
    let mut cursor = x;
    for ch in text.bytes() {
        let glyph = &DIGIT_GLYPHS[usize::from(ch - b'0')];
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..DIGIT_WIDTH {
                if bits & (1 << (DIGIT_WIDTH - 1 - col)) != 0 {
                    target.put(cursor + col, y + row as u16, color);
                }
            }
        }
        cursor += DIGIT_WIDTH + 1;
    }
    cursor - x
}
