// Dirty-rect compositor. All game artwork goes through here: each operation
// draws on the transparent scratch surface, copies only the returned
// bounding rectangle onto the persistent art surface (with alpha blending),
// then erases that same rectangle from the scratch surface. Full-surface
// copies and clears never happen in the per-frame path.
//
// If the scratch region is not erased, the next blit of an overlapping rect
// blends the stale alpha artwork a second time and it shows up darker.

use crate::color::Color;
use crate::draw;
use crate::rect::Rect;
use crate::surface::Surface;

pub struct Canvas {
    pub art: Surface,
    scratch: Surface,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            art: Surface::new(width, height),
            scratch: Surface::new(width, height),
        }
    }

    /// Recreate both surfaces, e.g. after a window resize.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.art = Surface::new(width, height);
        self.scratch = Surface::new(width, height);
    }

    pub fn size(&self) -> (usize, usize) {
        (self.art.width, self.art.height)
    }

    /// Start the frame: full art fill. This is the only whole-surface write.
    pub fn fill_background(&mut self, color: Color) {
        self.art.fill(color);
    }

    /// Copy the dirty region across and erase it from the scratch surface.
    fn composite(&mut self, rect: Option<Rect>) {
        if let Some(r) = rect {
            self.art.blit_rect(&self.scratch, &r);
            self.scratch.clear_rect(&r);
        }
    }

    pub fn line(&mut self, a: (i32, i32), b: (i32, i32), width: i32, color: Color) {
        let r = draw::line(&mut self.scratch, a, b, width, color);
        self.composite(r);
    }

    pub fn dot(&mut self, center: (i32, i32), radius: i32, color: Color) {
        let r = draw::filled_circle(&mut self.scratch, center, radius, color);
        self.composite(r);
    }

    pub fn ring(&mut self, center: (i32, i32), radius: i32, stroke: i32, color: Color) {
        let r = draw::circle_outline(&mut self.scratch, center, radius, stroke, color);
        self.composite(r);
    }

    pub fn text(&mut self, x: i32, y: i32, s: &str, color: Color) {
        let r = draw::text(&mut self.scratch, x, y, s, color);
        self.composite(r);
    }

    /// Draw a line segment as a vector: a shaft plus an isosceles arrow head
    /// with its tip at `head`. Arrow proportions scale with `box_size`, the
    /// pixel length of one grid box. Composited as a single dirty region so
    /// shaft and head cannot tear apart.
    pub fn vector_arrow(&mut self, tail: (f32, f32), head: (f32, f32), box_size: f32, color: Color) {
        let v = (head.0 - tail.0, head.1 - tail.1);
        let dist = (v.0 * v.0 + v.1 * v.1).sqrt();
        let unit = if dist == 0.0 {
            (0.0, 0.0)
        } else {
            (v.0 / dist, v.1 / dist)
        };
        let perp = (-unit.1, unit.0);

        // Arrow head: height 2/3 of a grid box, base 1/5 of a grid box
        let a = box_size * 2.0 / 3.0;
        let b = box_size / 5.0;
        let head_v = (a * unit.0, a * unit.1);
        let base = (head.0 - head_v.0, head.1 - head_v.1);
        let tri = [
            (head.0.round() as i32, head.1.round() as i32),
            (
                (base.0 - b * perp.0).round() as i32,
                (base.1 - b * perp.1).round() as i32,
            ),
            (
                (base.0 + b * perp.0).round() as i32,
                (base.1 + b * perp.1).round() as i32,
            ),
        ];
        let head_rect = draw::filled_triangle(&mut self.scratch, tri, color);

        // Extend the shaft halfway into the arrow head so no gap shows
        let shaft_end = (head.0 - head_v.0 / 2.0, head.1 - head_v.1 / 2.0);
        let width = ((box_size / 6.0) as i32).max(1);
        let shaft_rect = draw::line(
            &mut self.scratch,
            (tail.0.round() as i32, tail.1.round() as i32),
            (shaft_end.0.round() as i32, shaft_end.1.round() as i32),
            width,
            color,
        );

        let dirty = match (head_rect, shaft_rect) {
            (Some(h), Some(s)) => Some(h.union(&s)),
            (r, None) | (None, r) => r,
        };
        self.composite(dirty);
    }

    /// Erase the whole scratch surface. Needed only outside the normal
    /// draw/copy/erase cycle, e.g. after drawing a batch directly.
    pub fn clean(&mut self) {
        self.scratch.fill(Color::CLEAR);
    }

    #[cfg(test)]
    pub fn scratch_is_blank(&self) -> bool {
        self.scratch.pixels.iter().all(|&px| px == 0)
    }
}
