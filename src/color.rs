// ARGB color, source-over blending, and the dark/light palettes.
// Pixels are packed 0xAARRGGBB; minifb ignores the top byte on present.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black, the "erased" value of the scratch surface.
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn unpack(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }
}

/// Source-over blend of packed pixel `src` onto packed pixel `dst`
/// (straight alpha). Matches what the blit step does per pixel.
#[inline]
pub fn blend_over(src: u32, dst: u32) -> u32 {
    let sa = (src >> 24) & 0xFF;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = (dst >> 24) & 0xFF;
    let inv = 255 - sa;

    let sr = (src >> 16) & 0xFF;
    let sg = (src >> 8) & 0xFF;
    let sb = src & 0xFF;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;

    let r = (sr * sa + dr * inv) / 255;
    let g = (sg * sa + dg * inv) / 255;
    let b = (sb * sa + db * inv) / 255;
    let a = sa + da * inv / 255;

    (a << 24) | (r << 16) | (g << 8) | b
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Color roles looked up through the active theme.
/// Constants carried over from the original color scheme.
pub struct Palette;

impl Palette {
    pub fn debug_hud(theme: Theme) -> Color {
        match theme {
            Theme::Dark => Color::rgb(255, 255, 255),
            Theme::Light => Color::rgb(0, 0, 0),
        }
    }

    pub fn graph_paper_bgnd(theme: Theme) -> Color {
        match theme {
            Theme::Dark => Color::rgb(20, 20, 20),
            Theme::Light => Color::rgb(180, 200, 255),
        }
    }

    pub fn graph_paper_lines(_theme: Theme) -> Color {
        Color::rgba(100, 100, 255, 50)
    }

    /// High-contrast accent used for x/y component guides.
    pub fn pop(theme: Theme) -> Color {
        match theme {
            Theme::Dark => Color::rgb(200, 255, 220),
            Theme::Light => Color::rgb(50, 30, 0),
        }
    }

    pub fn mouse_dot(_theme: Theme) -> Color {
        Color::rgb(200, 50, 50)
    }

    /// Force vectors are always drawn in this color.
    pub fn force_vector(theme: Theme) -> Color {
        match theme {
            Theme::Dark => Color::rgb(180, 180, 0),
            Theme::Light => Color::rgb(50, 30, 0),
        }
    }

    /// Muted per-player color for the velocity vector of each move.
    pub fn player_line(theme: Theme, n: u8) -> Color {
        match (theme, n) {
            (Theme::Dark, 1) => Color::rgb(150, 50, 130),
            (Theme::Dark, 2) => Color::rgb(50, 150, 130),
            (Theme::Dark, _) => Color::rgb(150, 170, 50),
            (Theme::Light, 1) => Color::rgb(160, 40, 90),
            (Theme::Light, 2) => Color::rgb(40, 130, 60),
            (Theme::Light, _) => Color::rgb(100, 140, 40),
        }
    }

    /// Popping per-player color for the resulting vector and the satellite.
    pub fn player_final(theme: Theme, n: u8) -> Color {
        match (theme, n) {
            (Theme::Dark, 1) => Color::rgb(220, 10, 200),
            (Theme::Dark, 2) => Color::rgb(10, 220, 200),
            (Theme::Dark, _) => Color::rgb(200, 220, 10),
            (Theme::Light, 1) => Color::rgb(220, 10, 100),
            (Theme::Light, 2) => Color::rgb(10, 170, 120),
            (Theme::Light, _) => Color::rgb(200, 220, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        let c = Color::rgba(12, 34, 56, 78);
        assert_eq!(Color::unpack(c.pack()), c);
    }

    #[test]
    fn blend_opaque_src_replaces_dst() {
        let src = Color::rgb(10, 20, 30).pack();
        let dst = Color::rgb(200, 200, 200).pack();
        assert_eq!(blend_over(src, dst), src);
    }

    #[test]
    fn blend_transparent_src_keeps_dst() {
        let dst = Color::rgb(200, 100, 50).pack();
        assert_eq!(blend_over(Color::CLEAR.pack(), dst), dst);
    }

    #[test]
    fn blend_half_alpha_mixes_channels() {
        let src = Color::rgba(255, 0, 0, 128).pack();
        let dst = Color::rgb(0, 0, 0).pack();
        let out = Color::unpack(blend_over(src, dst));
        // 255 * 128 / 255 = 128
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 0);
        assert_eq!(out.b, 0);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn blend_onto_opaque_stays_opaque() {
        let src = Color::rgba(100, 100, 255, 50).pack();
        let dst = Color::rgb(20, 20, 20).pack();
        assert_eq!(Color::unpack(blend_over(src, dst)).a, 255);
    }
}
