//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use fontdue::Font;

use super::{GlyphCache, Rect};

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color
/// with full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced to
    /// fit so nothing indexes past the end.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 {
            height.min(buffer.len() / width)
        } else {
            0
        };
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let x1 = (rect.x + rect.width).min(self.width);
        let y1 = (rect.y + rect.height).min(self.height);

        for y in rect.y.min(y1)..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + rect.x.min(x1)..row_start + x1].fill(color);
        }
    }

    /// Alpha-blend `color` onto the pixel at (x, y), ignoring out-of-bounds pixels
    fn blend_pixel(&mut self, x: isize, y: isize, color: u32, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
        }
    }
}

/// Text rendering context wrapping font and glyph cache.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
}

impl<'a> TextPainter<'a> {
    pub fn new(font: &'a Font, glyph_cache: &'a mut GlyphCache, font_size: f32, ascent: f32) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
        }
    }

    /// Draw text with its top-left corner at (x, y); returns the advance in pixels
    pub fn draw(&mut self, frame: &mut Frame, x: isize, y: isize, text: &str, color: u32) -> f32 {
        let mut current_x = x as f32;
        let baseline = y as f32 + self.ascent;

        for ch in text.chars() {
            let key = (ch, self.font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha > 0 {
                        let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                        let py = (glyph_top + bitmap_y as f32) as isize;
                        frame.blend_pixel(px, py, color, alpha as f32 / 255.0);
                    }
                }
            }

            current_x += metrics.advance_width;
        }

        current_x - x as f32
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str) -> f32 {
        let mut width = 0.0;
        for ch in text.chars() {
            let key = (ch, self.font_size.to_bits());
            let (metrics, _) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));
            width += metrics.advance_width;
        }
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);
        frame.fill_rect(Rect::new(2, 2, 3, 3), 0xFFFF0000);

        assert_eq!(buffer[0], 0);
        assert_eq!(buffer[2 * 10 + 2], 0xFFFF0000);
        assert_eq!(buffer[4 * 10 + 4], 0xFFFF0000);
        assert_eq!(buffer[5 * 10 + 5], 0);
    }

    #[test]
    fn test_frame_out_of_bounds_is_clipped() {
        let mut buffer = vec![0u32; 4 * 4];
        let mut frame = Frame::new(&mut buffer, 4, 4);
        frame.fill_rect(Rect::new(2, 2, 10, 10), 0xFF00FF00);
        frame.fill_rect(Rect::new(9, 9, 2, 2), 0xFFFFFFFF);
        frame.blend_pixel(-1, 0, 0xFFFFFFFF, 1.0);

        assert_eq!(buffer[3 * 4 + 3], 0xFF00FF00);
        assert_eq!(buffer.iter().filter(|&&p| p == 0xFF00FF00).count(), 4);
    }

    #[test]
    fn test_short_buffer_shrinks_height() {
        let mut buffer = vec![0u32; 4 * 2];
        let mut frame = Frame::new(&mut buffer, 4, 10);
        frame.fill_rect(Rect::new(0, 0, 4, 10), 0xFF000001);
        assert!(buffer.iter().all(|&p| p == 0xFF000001));
    }

    #[test]
    fn test_blend_colors_extremes() {
        assert_eq!(blend_colors(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        assert_eq!(blend_colors(0xFF102030, 0xFFFFFFFF, 0.0), 0xFF102030);
    }
}
