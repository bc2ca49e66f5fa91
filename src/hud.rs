// Debug HUD: a block of 5x7 text in the top-left corner.
// The first line always shows FPS, window size, and the mouse grid
// coordinate; callers append whatever else they want below it.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::draw::GLYPH_H;

const MARGIN: i32 = 8;
const LINE_SPACING: i32 = GLYPH_H + 3;

pub struct DebugHud {
    lines: Vec<String>,
}

impl DebugHud {
    pub fn new(fps: f32, window: (usize, usize), mouse_grid: (i32, i32)) -> Self {
        Self {
            lines: vec![format!(
                "FPS: {:.1} | Window: ({}, {}) | Mouse: ({}, {})",
                fps, window.0, window.1, mouse_grid.0, mouse_grid.1
            )],
        }
    }

    pub fn add_text(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn render(&self, canvas: &mut Canvas, color: Color) {
        let mut y = MARGIN;
        for line in &self.lines {
            canvas.text(MARGIN, y, line, color);
            y += LINE_SPACING;
        }
    }

    #[cfg(test)]
    fn line_count(&self) -> usize {
        self.lines.len()
    }
}
