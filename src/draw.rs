// Software rasterizer. Every draw call writes raw pixels (no blending within
// a single call, blending happens when the dirty region is composited) and
// returns the smallest rect bounding the pixels it actually touched, already
// clipped to the surface. A call that touches nothing returns None.

use crate::color::Color;
use crate::rect::Rect;
use crate::surface::Surface;

/// Running bounding box of in-bounds pixels touched by one draw call.
struct Touched {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    any: bool,
}

impl Touched {
    fn new() -> Self {
        Self {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            any: false,
        }
    }

    #[inline]
    fn put(&mut self, surf: &mut Surface, x: i32, y: i32, px: u32) {
        if x < 0 || y < 0 || x >= surf.width as i32 || y >= surf.height as i32 {
            return;
        }
        surf.pixels[y as usize * surf.width + x as usize] = px;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.any = true;
    }

    fn rect(&self) -> Option<Rect> {
        if self.any {
            Some(Rect::from_points(
                (self.min_x, self.min_y),
                (self.max_x, self.max_y),
            ))
        } else {
            None
        }
    }
}

/// Stamp a filled square of side `width` centered on (x,y).
/// A 1-wide stamp is a single pixel.
#[inline]
fn stamp(t: &mut Touched, surf: &mut Surface, x: i32, y: i32, width: i32, px: u32) {
    if width <= 1 {
        t.put(surf, x, y, px);
        return;
    }
    let lo = -(width / 2);
    let hi = lo + width - 1;
    for dy in lo..=hi {
        for dx in lo..=hi {
            t.put(surf, x + dx, y + dy, px);
        }
    }
}

/// Bresenham line from `a` to `b`, thickened to `width` pixels.
pub fn line(
    surf: &mut Surface,
    a: (i32, i32),
    b: (i32, i32),
    width: i32,
    color: Color,
) -> Option<Rect> {
    let px = color.pack();
    let mut t = Touched::new();
    let (mut x0, mut y0) = a;
    let (x1, y1) = b;
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(&mut t, surf, x0, y0, width, px);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    t.rect()
}

pub fn filled_circle(
    surf: &mut Surface,
    center: (i32, i32),
    radius: i32,
    color: Color,
) -> Option<Rect> {
    if radius <= 0 {
        return None;
    }
    let px = color.pack();
    let mut t = Touched::new();
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                t.put(surf, center.0 + dx, center.1 + dy, px);
            }
        }
    }
    t.rect()
}

/// Ring of thickness `stroke` with outer radius `radius`.
pub fn circle_outline(
    surf: &mut Surface,
    center: (i32, i32),
    radius: i32,
    stroke: i32,
    color: Color,
) -> Option<Rect> {
    if radius <= 0 || stroke <= 0 {
        return None;
    }
    let px = color.pack();
    let mut t = Touched::new();
    let outer2 = radius * radius;
    let inner = (radius - stroke).max(0);
    let inner2 = inner * inner;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 <= outer2 && d2 >= inner2 {
                t.put(surf, center.0 + dx, center.1 + dy, px);
            }
        }
    }
    t.rect()
}

/// Filled triangle via edge functions over the bounding box.
/// Used for vector arrow heads, so triangles are small.
pub fn filled_triangle(
    surf: &mut Surface,
    pts: [(i32, i32); 3],
    color: Color,
) -> Option<Rect> {
    let px = color.pack();
    let mut t = Touched::new();
    let [p0, p1, p2] = pts;
    let min_x = p0.0.min(p1.0).min(p2.0);
    let max_x = p0.0.max(p1.0).max(p2.0);
    let min_y = p0.1.min(p1.1).min(p2.1);
    let max_y = p0.1.max(p1.1).max(p2.1);

    let edge = |a: (i32, i32), b: (i32, i32), x: i32, y: i32| -> i64 {
        (b.0 - a.0) as i64 * (y - a.1) as i64 - (b.1 - a.1) as i64 * (x - a.0) as i64
    };

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let w0 = edge(p0, p1, x, y);
            let w1 = edge(p1, p2, x, y);
            let w2 = edge(p2, p0, x, y);
            // Accept either winding order
            if (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0) {
                t.put(surf, x, y, px);
            }
        }
    }
    t.rect()
}

/* ---------- 5x7 bitmap font for the HUD and component labels ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Advance per character: glyph width plus 1 pixel spacing.
pub const GLYPH_ADVANCE: i32 = GLYPH_W + 1;

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the
/// pixels (bit 4 = leftmost). Lowercase letters render as uppercase.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '/' => g!(0b00001,0b00001,0b00010,0b00100,0b01000,0b10000,0b10000),

        _ => None,
    }
}

fn draw_char_5x7(t: &mut Touched, surf: &mut Surface, x: i32, y: i32, ch: char, px: u32) {
    let Some(rows) = glyph5x7(ch) else {
        return;
    };
    let shadow = Color::rgb(0, 0, 0).pack();
    // Shadow pass offset by (1,1) for contrast against the artwork
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (GLYPH_W - 1 - rx))) != 0 {
                t.put(surf, x + rx + 1, y + ry as i32 + 1, shadow);
            }
        }
    }
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (GLYPH_W - 1 - rx))) != 0 {
                t.put(surf, x + rx, y + ry as i32, px);
            }
        }
    }
}

/// Draw a text string with the 5x7 font, 1 pixel spacing between glyphs.
pub fn text(surf: &mut Surface, mut x: i32, y: i32, s: &str, color: Color) -> Option<Rect> {
    let px = color.pack();
    let mut t = Touched::new();
    for ch in s.chars() {
        draw_char_5x7(&mut t, surf, x, y, ch, px);
        x += GLYPH_ADVANCE;
    }
    t.rect()
}

/// Pixel width of `s` when rendered with `text`.
pub fn text_width(s: &str) -> i32 {
    s.chars().count() as i32 * GLYPH_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pixel that differs from a blank surface must be inside the
    /// returned rect -- the containment property the compositor relies on.
    fn assert_contained(surf: &Surface, rect: Option<Rect>) {
        let blank = Surface::new(surf.width, surf.height);
        for y in 0..surf.height as i32 {
            for x in 0..surf.width as i32 {
                if surf.get(x, y) != blank.get(x, y) {
                    let r = rect.expect("pixels touched but no rect returned");
                    assert!(r.contains(x, y), "touched pixel {x},{y} outside {r:?}");
                }
            }
        }
    }

    #[test]
    fn line_rect_contains_all_touched_pixels() {
        let mut s = Surface::new(64, 64);
        let r = line(&mut s, (3, 50), (60, 7), 5, Color::rgb(255, 255, 0));
        assert_contained(&s, r);
        assert!(r.is_some());
    }

    #[test]
    fn line_degenerate_is_one_stamp() {
        let mut s = Surface::new(32, 32);
        let r = line(&mut s, (10, 10), (10, 10), 1, Color::rgb(1, 2, 3));
        assert_eq!(r, Some(Rect::new(10, 10, 1, 1)));
    }

    #[test]
    fn line_fully_offscreen_returns_none() {
        let mut s = Surface::new(16, 16);
        let r = line(&mut s, (-30, -5), (-2, -9), 3, Color::rgb(1, 2, 3));
        assert_eq!(r, None);
        assert!(s.pixels.iter().all(|&px| px == 0));
    }

    #[test]
    fn line_clipped_rect_stays_on_surface() {
        let mut s = Surface::new(20, 20);
        let r = line(&mut s, (-10, 5), (30, 12), 3, Color::rgb(9, 9, 9));
        assert_contained(&s, r);
        let r = r.unwrap();
        assert!(s.bounds().contains(r.x, r.y));
        assert!(s.bounds().contains(r.right() - 1, r.bottom() - 1));
    }

    #[test]
    fn filled_circle_rect_contains_all_touched_pixels() {
        let mut s = Surface::new(48, 48);
        let r = filled_circle(&mut s, (20, 25), 9, Color::rgb(0, 200, 255));
        assert_contained(&s, r);
        // Center pixel is part of the disc
        assert_ne!(s.get(20, 25), Some(0));
    }

    #[test]
    fn filled_circle_zero_radius_is_noop() {
        let mut s = Surface::new(8, 8);
        assert_eq!(filled_circle(&mut s, (4, 4), 0, Color::rgb(1, 1, 1)), None);
    }

    #[test]
    fn circle_outline_leaves_interior_untouched() {
        let mut s = Surface::new(64, 64);
        let r = circle_outline(&mut s, (32, 32), 14, 2, Color::rgb(10, 220, 200));
        assert_contained(&s, r);
        assert_eq!(s.get(32, 32), Some(0));
    }

    #[test]
    fn filled_triangle_rect_contains_all_touched_pixels() {
        let mut s = Surface::new(40, 40);
        let r = filled_triangle(&mut s, [(5, 5), (30, 12), (12, 33)], Color::rgb(220, 10, 200));
        assert_contained(&s, r);
        assert!(r.is_some());
    }

    #[test]
    fn filled_triangle_winding_does_not_matter() {
        let mut cw = Surface::new(40, 40);
        let mut ccw = Surface::new(40, 40);
        let c = Color::rgb(7, 7, 7);
        filled_triangle(&mut cw, [(5, 5), (30, 12), (12, 33)], c);
        filled_triangle(&mut ccw, [(12, 33), (30, 12), (5, 5)], c);
        assert_eq!(cw.pixels, ccw.pixels);
    }

    #[test]
    fn text_rect_contains_all_touched_pixels() {
        let mut s = Surface::new(128, 16);
        let r = text(&mut s, 2, 2, "FPS: 59.9 | (-3, 12)", Color::rgb(255, 255, 255));
        assert_contained(&s, r);
    }

    #[test]
    fn text_lowercase_renders_as_uppercase() {
        let mut lower = Surface::new(64, 16);
        let mut upper = Surface::new(64, 16);
        let c = Color::rgb(255, 255, 255);
        text(&mut lower, 0, 0, "gravity", c);
        text(&mut upper, 0, 0, "GRAVITY", c);
        assert_eq!(lower.pixels, upper.pixels);
    }

    #[test]
    fn text_unknown_glyphs_are_skipped() {
        let mut s = Surface::new(64, 16);
        assert_eq!(text(&mut s, 0, 0, "\u{e9}\u{3b5}", Color::rgb(1, 1, 1)), None);
    }
}
