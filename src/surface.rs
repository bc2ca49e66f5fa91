// Pixel surfaces. Two are used per frame: the persistent "art" surface that
// gets presented, and a transparent scratch surface that draw calls render
// into before the dirty region is composited across.

use crate::color::{Color, blend_over};
use crate::rect::Rect;

#[derive(Clone)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // 0xAARRGGBB
}

impl Surface {
    /// New fully transparent surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.pack(); width * height],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    /// Write a raw pixel, no blending. Out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, px: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = px;
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.pack());
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let Some(r) = rect.intersect(&self.bounds()) else {
            return;
        };
        let px = color.pack();
        for y in r.y..r.bottom() {
            let row = y as usize * self.width;
            self.pixels[row + r.x as usize..row + r.right() as usize].fill(px);
        }
    }

    /// Erase only the given region back to transparent. Pixels outside the
    /// rect are left untouched.
    pub fn clear_rect(&mut self, rect: &Rect) {
        self.fill_rect(rect, Color::CLEAR);
    }

    /// Alpha-blend the sub-region `rect` of `src` onto the same coordinates
    /// of `self`. This is the minimal-bounding-rectangle copy: nothing
    /// outside the rect is read or written.
    pub fn blit_rect(&mut self, src: &Surface, rect: &Rect) {
        let Some(r) = rect.intersect(&self.bounds()).and_then(|r| r.intersect(&src.bounds()))
        else {
            return;
        };
        for y in r.y..r.bottom() {
            let srow = y as usize * src.width;
            let drow = y as usize * self.width;
            for x in r.x..r.right() {
                let s = src.pixels[srow + x as usize];
                if s >> 24 == 0 {
                    continue; // transparent scratch pixel
                }
                let d = &mut self.pixels[drow + x as usize];
                *d = blend_over(s, *d);
            }
        }
    }
}
