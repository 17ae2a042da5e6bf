use wolfcast_common::Color;

/// Render-resolution pixel buffer of packed `0xAARRGGBB` colors, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color(self.pixels[x + y * self.width]))
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[x + y * self.width] = color.0;
        }
    }

    /// Paint rows `top..bottom` of column `x`. Rows outside the buffer are
    /// clipped, never wrapped. Returns the number of pixels written.
    pub fn fill_column(&mut self, x: usize, top: i64, bottom: i64, color: Color) -> usize {
        if x >= self.width {
            return 0;
        }
        let top = top.max(0);
        let bottom = bottom.min(self.height as i64);
        if top >= bottom {
            return 0;
        }
        for y in top as usize..bottom as usize {
            self.pixels[x + y * self.width] = color.0;
        }
        (bottom - top) as usize
    }

    /// Copy into an RGBA8 byte buffer such as a presentation surface.
    /// Copies as many whole pixels as both buffers hold.
    pub fn write_rgba8(&self, out: &mut [u8]) {
        for (dst, &src) in out.chunks_exact_mut(4).zip(&self.pixels) {
            dst.copy_from_slice(&Color(src).to_rgba8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Color::DARK_GREY);
        assert!(fb.pixels().iter().all(|&p| p == Color::DARK_GREY.0));
        assert_eq!(fb.pixels().len(), 12);
    }

    #[test]
    fn fill_column_is_half_open() {
        let mut fb = Framebuffer::new(2, 6);
        fb.clear(Color::BLACK);
        let written = fb.fill_column(1, 2, 4, Color::WHITE);
        assert_eq!(written, 2);
        for y in 0..6 {
            let expected = if (2..4).contains(&y) { Color::WHITE } else { Color::BLACK };
            assert_eq!(fb.get(1, y), Some(expected), "row {y}");
            assert_eq!(fb.get(0, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn fill_column_clips_instead_of_wrapping() {
        let mut fb = Framebuffer::new(3, 4);
        fb.clear(Color::BLACK);
        let written = fb.fill_column(0, -10, 10, Color::WHITE);
        assert_eq!(written, 4);
        // Neighbouring columns untouched.
        assert!((0..4).all(|y| fb.get(1, y) == Some(Color::BLACK)));
        assert_eq!(fb.fill_column(5, 0, 4, Color::WHITE), 0);
        assert_eq!(fb.fill_column(0, 3, 3, Color::WHITE), 0);
    }

    #[test]
    fn out_of_range_access() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set(5, 5, Color::WHITE);
        assert_eq!(fb.get(2, 0), None);
        assert_eq!(fb.get(0, 2), None);
    }

    #[test]
    fn rgba8_conversion() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set(0, 0, Color::from_rgb(1, 2, 3));
        fb.set(1, 0, Color::DARK_GREY);
        let mut out = [0u8; 8];
        fb.write_rgba8(&mut out);
        assert_eq!(out, [1, 2, 3, 255, 0x40, 0x40, 0x40, 255]);
    }
}
