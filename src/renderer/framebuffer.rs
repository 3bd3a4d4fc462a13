// ── Software framebuffer ──────────────────────────────────────────────────────
//
// A plain RGBA8 pixel grid with the handful of primitives the game view
// needs: filled rectangles, vertical wall strips, circles and lines. Pixels
// are `Pod`, so the whole buffer can be handed to an uploader or encoder as
// bytes without copying.

use std::path::Path;

use crate::error::Result;

// ── Color ─────────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const RED: Self = Self([255, 0, 0, 255]);
    pub const GREEN: Self = Self([0, 228, 48, 255]);
    pub const BLUE: Self = Self([0, 121, 241, 255]);
    pub const YELLOW: Self = Self([253, 249, 0, 255]);
    pub const GOLD: Self = Self([255, 203, 0, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Scale the colour channels toward black by `fog ∈ [0, 1]`.
    pub fn fogged(self, fog: f32) -> Self {
        let k = 1.0 - fog.clamp(0.0, 1.0);
        let [r, g, b, a] = self.0;
        Self([
            (r as f32 * k) as u8,
            (g as f32 * k) as u8,
            (b as f32 * k) as u8,
            a,
        ])
    }

    /// Source-over blend of `self` onto `dst`, using `self`'s alpha.
    fn over(self, dst: Color) -> Color {
        let a = self.0[3] as u16;
        if a == 255 {
            return self;
        }
        let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8;
        Color([
            mix(self.0[0], dst.0[0]),
            mix(self.0[1], dst.0[1]),
            mix(self.0[2], dst.0[2]),
            255,
        ])
    }
}

// ── Framebuffer ───────────────────────────────────────────────────────────────

/// Pixel count of a `width` x `height` buffer, computed without `u32` overflow.
#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![Color::BLACK; pixel_count(width, height)] }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Blend one pixel; coordinates outside the buffer are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    /// Filled rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Vertical strip from `y0` to `y1` inclusive in column `x`.
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in lo.max(0)..=hi.min(self.height as i32 - 1) {
            self.put(x, y, color);
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r_sq {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line including both endpoints.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };

        let mut x = x1;
        let mut y = y1;
        let mut err = dx - dy;

        loop {
            self.put(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;

            if e2 > -dy {
                err -= dy;
                x += sx;
            }

            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Nested rectangle outlines fading in from the edges.
    pub fn vignette(&mut self, depth: i32, color: Color, alpha_step: f32) {
        let (w, h) = (self.width as i32, self.height as i32);
        for i in 0..depth {
            let alpha = ((depth - i) as f32 * alpha_step).min(255.0) as u8;
            let c = Color::rgba(color.0[0], color.0[1], color.0[2], alpha);
            self.fill_rect(i, i, w - 2 * i, 1, c);
            self.fill_rect(i, h - 1 - i, w - 2 * i, 1, c);
            self.fill_rect(i, i + 1, 1, h - 2 * i - 2, c);
            self.fill_rect(w - 1 - i, i + 1, 1, h - 2 * i - 2, c);
        }
    }

    /// Encode the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        image::save_buffer(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_scales_channels() {
        let c = Color::rgb(120, 70, 70).fogged(0.5);
        assert_eq!(c, Color::rgb(60, 35, 35));
        assert_eq!(Color::rgb(120, 70, 70).fogged(2.0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn put_out_of_bounds_is_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.put(-1, 0, Color::WHITE);
        fb.put(4, 4, Color::WHITE);
        assert!(fb.pixels().iter().all(|&p| p == Color::BLACK));
    }

    #[test]
    fn bytes_are_rgba() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(Color::rgb(1, 2, 3));
        assert_eq!(fb.as_bytes(), &[1, 2, 3, 255]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_count_does_not_wrap() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(Framebuffer::new(7, 3).pixels().len(), 21);
    }
}
