// OS window layer: the only module that talks to minifb. Each frame it
// presents the art surface and distills the raw input state into a
// `FrameInput`, so the game logic never sees windowing types and can be
// driven headless in tests.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::surface::Surface;

/// The keys the game reacts to, mirrored away from the minifb type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameKey {
    Q,
    Escape,
    D,
    F2,
    F10,
    F12,
    Tab,
    Space,
    N,
    U,
    R,
    S,
    L,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Mods {
    pub shift: bool,
    pub ctrl: bool,
}

/// Everything the game consumes for one frame. Key presses and mouse
/// clicks are edge-triggered; `n_held` is level-triggered (hold to run).
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub window_size: (usize, usize),
    pub mouse_pos: (f32, f32),
    pub left_click: bool,
    pub pan_press: bool,
    pub pan_release: bool,
    pub scroll_y: f32,
    pub keys: Vec<(GameKey, Mods)>,
    pub n_held: bool,
}

const POLLED_KEYS: [(Key, GameKey); 13] = [
    (Key::Q, GameKey::Q),
    (Key::Escape, GameKey::Escape),
    (Key::D, GameKey::D),
    (Key::F2, GameKey::F2),
    (Key::F10, GameKey::F10),
    (Key::F12, GameKey::F12),
    (Key::Tab, GameKey::Tab),
    (Key::Space, GameKey::Space),
    (Key::N, GameKey::N),
    (Key::U, GameKey::U),
    (Key::R, GameKey::R),
    (Key::S, GameKey::S),
    (Key::L, GameKey::L),
];

pub struct GameWindow {
    window: Window,
    // Previous-frame button state for edge detection
    was_left_down: bool,
    was_pan_down: bool,
}

impl GameWindow {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            was_left_down: false,
            was_pan_down: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Push the art surface to the screen. This is also what pumps the
    /// window's event queue, so call it every frame.
    pub fn present(&mut self, surface: &Surface) -> Result<(), Error> {
        self.window
            .update_with_buffer(&surface.pixels, surface.width, surface.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn mods(&self) -> Mods {
        Mods {
            shift: self.window.is_key_down(Key::LeftShift)
                || self.window.is_key_down(Key::RightShift),
            ctrl: self.window.is_key_down(Key::LeftCtrl)
                || self.window.is_key_down(Key::RightCtrl),
        }
    }

    pub fn poll_input(&mut self) -> FrameInput {
        let mods = self.mods();
        let mouse_pos = self
            .window
            .get_mouse_pos(MouseMode::Clamp)
            .unwrap_or((0.0, 0.0));

        let left_down = self.window.get_mouse_down(MouseButton::Left);
        let middle_down = self.window.get_mouse_down(MouseButton::Middle);
        let right_down = self.window.get_mouse_down(MouseButton::Right);

        // Middle- or right-drag pans; Shift+left-drag is the trackpad
        // fallback for the same thing.
        let pan_down = middle_down || right_down || (left_down && mods.shift);
        let pan_press = pan_down && !self.was_pan_down;
        let pan_release = !pan_down && self.was_pan_down;
        let left_click = left_down && !self.was_left_down && !mods.shift;
        self.was_left_down = left_down;
        self.was_pan_down = pan_down;

        let mut keys = Vec::new();
        for (raw, key) in POLLED_KEYS {
            if self.window.is_key_pressed(raw, KeyRepeat::No) {
                keys.push((key, mods));
            }
        }

        FrameInput {
            window_size: self.window.get_size(),
            mouse_pos,
            left_click,
            pan_press,
            pan_release,
            scroll_y: self.window.get_scroll_wheel().map_or(0.0, |(_, y)| y),
            keys,
            n_held: self.window.is_key_down(Key::N),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GameWindow itself needs a display; FrameInput is what the rest of the
    // game depends on, so pin down its defaults.
    #[test]
    fn default_frame_input_is_inert() {
        let input = FrameInput::default();
        assert!(!input.left_click);
        assert!(!input.pan_press);
        assert!(!input.pan_release);
        assert!(!input.n_held);
        assert!(input.keys.is_empty());
        assert_eq!(input.scroll_y, 0.0);
    }
}
