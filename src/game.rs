// Game rules, input handling, and the per-frame render pass.
//
// The flow per player: pick a position (satellite follows the snapped
// mouse), aim an initial velocity vector, then step the simulation. Each
// step translates the previous resulting vector forward and adds the
// quantized gravity vector to its head. Every move lands in the player's
// undo/redo history.

use std::path::PathBuf;

use crate::canvas::Canvas;
use crate::color::{Color, Palette, Theme};
use crate::draw;
use crate::geometry::{GridPoint, GridVector, LineSeg};
use crate::grid::Grid;
use crate::history::PhysicsStep;
use crate::hud::DebugHud;
use crate::player::{Player, PlayerState, gravity_toward_origin, next_player};
use crate::save::{self, SaveState, Settings};
use crate::window::{FrameInput, GameKey, Mods};

pub const WINDOW_TITLE: &str = "Vector race";
pub const WINDOW_W: usize = 1600;
pub const WINDOW_H: usize = 900;
pub const GRID_N: i32 = 40;
pub const NUM_PLAYERS: u8 = 2;
pub const SAVE_FILE: &str = "game_state.json";
pub const SCREENSHOT_FILE: &str = "screenshot.png";

pub struct Game {
    pub settings: Settings,
    grid: Grid,
    players: Vec<Player>,
    active_player: u8,
    canvas: Canvas,
    mouse_pos: (f32, f32),
    is_stepping: bool,
    should_quit: bool,
    save_path: PathBuf,
}

impl Game {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            settings: Settings::default(),
            grid: Grid::new(GRID_N, (width, height)),
            players: (1..=NUM_PLAYERS).map(Player::new).collect(),
            active_player: 1,
            canvas: Canvas::new(width, height),
            mouse_pos: (0.0, 0.0),
            is_stepping: false,
            should_quit: false,
            save_path: PathBuf::from(SAVE_FILE),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn art(&self) -> &crate::surface::Surface {
        &self.canvas.art
    }

    pub fn active_player(&self) -> u8 {
        self.active_player
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn set_save_path(&mut self, path: PathBuf) {
        self.save_path = path;
    }

    fn theme(&self) -> Theme {
        if self.settings.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn player(&self) -> &Player {
        &self.players[self.active_player as usize - 1]
    }

    fn player_mut(&mut self) -> &mut Player {
        &mut self.players[self.active_player as usize - 1]
    }

    fn mouse_grid(&self) -> GridPoint {
        self.grid.xfm_pg(self.mouse_pos)
    }

    /// Advance one frame: apply input, run the simulation, redraw.
    pub fn frame(&mut self, input: &FrameInput, fps: f32) {
        // Window resize invalidates both surfaces and the view transform
        if input.window_size != self.canvas.size()
            && input.window_size.0 > 0
            && input.window_size.1 > 0
        {
            log::debug!("Window resized to {:?}", input.window_size);
            self.canvas.resize(input.window_size.0, input.window_size.1);
            self.grid.reset(input.window_size);
        }

        self.mouse_pos = input.mouse_pos;

        if input.scroll_y > 0.0 {
            self.grid.zoom_in();
        } else if input.scroll_y < 0.0 {
            self.grid.zoom_out();
        }
        if input.pan_press {
            self.grid.begin_pan(input.mouse_pos);
        }
        if input.pan_release {
            self.grid.end_pan();
        }
        if self.grid.is_panning() {
            self.grid.pan(input.mouse_pos);
        }

        for &(key, mods) in &input.keys {
            self.handle_key(key, mods);
        }
        if input.left_click {
            self.handle_left_click();
        }

        // Hold n to run the simulation
        self.is_stepping = input.n_held;
        if self.is_stepping {
            self.step_physics();
        }

        // An unplaced satellite follows the snapped mouse
        if self.player().state == PlayerState::PickPosition {
            let pos = self.mouse_grid();
            self.player_mut().pos = pos;
        }

        self.render(fps, input.window_size);
    }

    fn handle_key(&mut self, key: GameKey, mods: Mods) {
        match key {
            GameKey::Q => self.should_quit = true,
            GameKey::Escape => {
                // Cancel the aim, back to picking a position
                if self.player().state == PlayerState::PickVelocity {
                    self.player_mut().state = PlayerState::PickPosition;
                }
            }
            GameKey::D => {
                self.settings.dark_mode = !self.settings.dark_mode;
                log::debug!("Dark mode: {}", self.settings.dark_mode);
            }
            GameKey::F2 => {
                self.settings.debug_hud = !self.settings.debug_hud;
                log::debug!("Debug HUD: {}", self.settings.debug_hud);
            }
            GameKey::F10 => {
                self.settings.gravity_on = !self.settings.gravity_on;
                log::debug!("Gravity: {}", self.settings.gravity_on);
            }
            GameKey::F12 => {
                let shot = save::write_png(std::path::Path::new(SCREENSHOT_FILE), &self.canvas.art);
                if let Err(e) = shot {
                    log::error!("{e}");
                }
            }
            GameKey::Tab => {
                self.active_player = next_player(self.active_player, NUM_PLAYERS);
                log::debug!("Go player {}", self.active_player);
            }
            GameKey::Space => self.step_physics(),
            GameKey::N => {} // level-triggered via FrameInput::n_held
            GameKey::U => {
                if mods.shift {
                    self.player_mut().history.undo_all();
                } else {
                    self.player_mut().history.undo();
                }
                self.restore_from_history();
            }
            GameKey::R => {
                if mods.ctrl {
                    self.reset_game();
                } else if mods.shift {
                    let size = self.canvas.size();
                    self.grid.reset(size);
                } else {
                    self.player_mut().history.redo();
                    self.restore_from_history();
                }
            }
            GameKey::S => {
                if mods.ctrl {
                    let state = self.to_save_state();
                    if let Err(e) = save::save_game(&self.save_path, &state) {
                        log::error!("{e}");
                    }
                }
            }
            GameKey::L => {
                // A missing or corrupt save file should not kill a running game
                if mods.ctrl {
                    match save::load_game(&self.save_path) {
                        Ok(state) => self.apply_save_state(state),
                        Err(e) => log::error!("{e}"),
                    }
                }
            }
        }
    }

    fn handle_left_click(&mut self) {
        let mouse = self.mouse_grid();
        let gravity_on = self.settings.gravity_on;
        let player = self.player_mut();
        match player.state {
            PlayerState::PickPosition => {
                player.init_pos = mouse;
                player.pos = mouse;
                player.state = PlayerState::PickVelocity;
                log::debug!("Player {} placed at {:?}", player.n, mouse);
            }
            PlayerState::PickVelocity => {
                let line_seg = LineSeg::new(player.pos, mouse);
                let force = if gravity_on {
                    gravity_toward_origin(player.pos)
                } else {
                    GridVector::ZERO
                };
                let final_seg = LineSeg::new(line_seg.start, line_seg.end.translated(force));
                player.history.record(PhysicsStep {
                    line_seg,
                    force,
                    final_seg,
                });
                player.pos = final_seg.end;
                player.state = PlayerState::StepPhysics;
                log::debug!(
                    "Player {} launched with velocity {:?}",
                    player.n,
                    line_seg.vector()
                );
            }
            PlayerState::StepPhysics => {}
        }
    }

    /// One turn for the active player: carry the previous resulting vector
    /// forward and add gravity (computed at the pre-move position) to it.
    fn step_physics(&mut self) {
        if self.player().state != PlayerState::StepPhysics {
            return;
        }
        let Some(last) = self.player().history.current().copied() else {
            return;
        };
        let gravity_on = self.settings.gravity_on;
        let pre_move_pos = self.player().pos;
        let next_l = last.final_seg.translated(last.final_seg.vector());
        let force = if gravity_on {
            gravity_toward_origin(pre_move_pos)
        } else {
            GridVector::ZERO
        };
        let next_f = LineSeg::new(next_l.start, next_l.end.translated(force));
        log::debug!("STEP player {}: {:?}", self.active_player, next_f);
        let player = self.player_mut();
        player.pos = next_f.end;
        player.history.record(PhysicsStep {
            line_seg: next_l,
            force,
            final_seg: next_f,
        });
    }

    /// Put the satellite where the history head says it is. Undoing past
    /// the first move returns the player to aiming from the start position.
    fn restore_from_history(&mut self) {
        let player = self.player_mut();
        if player.state == PlayerState::PickPosition {
            return;
        }
        match player.history.current().copied() {
            None => {
                player.pos = player.init_pos;
                player.state = PlayerState::PickVelocity;
            }
            Some(step) => {
                player.pos = step.final_seg.end;
                player.state = PlayerState::StepPhysics;
            }
        }
    }

    fn reset_game(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.active_player = 1;
        log::debug!("Game reset");
    }

    pub fn to_save_state(&self) -> SaveState {
        SaveState {
            settings: self.settings,
            grid_n: self.grid.n,
            active_player: self.active_player,
            players: self.players.clone(),
        }
    }

    pub fn apply_save_state(&mut self, state: SaveState) {
        self.settings = state.settings;
        self.grid = Grid::new(state.grid_n, self.canvas.size());
        self.active_player = state.active_player.clamp(1, NUM_PLAYERS);
        let mut players = state.players;
        players.truncate(NUM_PLAYERS as usize);
        while players.len() < NUM_PLAYERS as usize {
            players.push(Player::new(players.len() as u8 + 1));
        }
        for player in &mut players {
            let head = player.history.head();
            player.history.set_head(head);
        }
        self.players = players;
    }

    /* ------------------------------ rendering ------------------------------ */

    fn render(&mut self, fps: f32, window_size: (usize, usize)) {
        let theme = self.theme();
        self.canvas
            .fill_background(Palette::graph_paper_bgnd(theme));
        self.draw_graph_paper(theme);
        self.draw_mouse_dot(theme);
        self.draw_mouse_vector(theme);
        self.draw_game_history(theme);
        self.draw_players(theme);
        if self.settings.debug_hud {
            self.draw_debug_hud(theme, fps, window_size);
        }
    }

    fn draw_graph_paper(&mut self, theme: Theme) {
        let color = Palette::graph_paper_lines(theme);
        let segs: Vec<LineSeg> = self
            .grid
            .h_line_segs()
            .into_iter()
            .chain(self.grid.v_line_segs())
            .collect();
        for seg in segs {
            let a = self.grid.to_pix(seg.start);
            let b = self.grid.to_pix(seg.end);
            self.canvas.line(a, b, 1, color);
        }
    }

    fn draw_mouse_dot(&mut self, theme: Theme) {
        let box_size = self.grid.box_size();
        let player = self.player();
        // While aiming, the dot stays anchored at the satellite
        let (center, radius, color) = match player.state {
            PlayerState::PickVelocity => (
                self.grid.to_pix(player.pos),
                box_size / 4.0,
                Palette::player_final(theme, self.active_player),
            ),
            _ => (
                self.grid.snap(self.mouse_pos),
                box_size / 3.0,
                Palette::mouse_dot(theme),
            ),
        };
        self.canvas.dot(center, radius.max(2.0) as i32, color);
    }

    /// The aim line from the satellite to the snapped mouse, drawn as a
    /// vector with its x/y components alongside.
    fn draw_mouse_vector(&mut self, theme: Theme) {
        if self.player().state != PlayerState::PickVelocity {
            return;
        }
        let seg = LineSeg::new(self.player().pos, self.mouse_grid());
        self.draw_vector(seg, Palette::player_line(theme, self.active_player));
        self.draw_xy_components(seg, Palette::pop(theme));
    }

    fn draw_game_history(&mut self, theme: Theme) {
        for i in 0..self.players.len() {
            let steps: Vec<PhysicsStep> = self.players[i].history.up_to_head().to_vec();
            let n = self.players[i].n;
            for step in steps {
                self.draw_vector(step.line_seg, Palette::player_line(theme, n));
                // Translate the force vector to the head of the velocity vector
                let force_seg = LineSeg::new(
                    step.line_seg.end,
                    step.line_seg.end.translated(step.force),
                );
                self.draw_vector(force_seg, Palette::force_vector(theme));
                self.draw_vector(step.final_seg, Palette::player_final(theme, n));
            }
        }
    }

    fn draw_players(&mut self, theme: Theme) {
        let box_size = self.grid.box_size();
        for i in 0..self.players.len() {
            let player = &self.players[i];
            if player.state == PlayerState::PickPosition {
                continue;
            }
            let color = Palette::player_final(theme, player.n);
            let center = self.grid.to_pix(player.pos);
            // Satellite: two concentric rings
            let radius = (box_size * 4.0 / 5.0) as i32;
            let stroke = (radius / 10).max(1);
            self.canvas.ring(center, radius, stroke, color);
            self.canvas.ring(center, radius / 2, (stroke / 2).max(1), color);
        }
    }

    fn draw_vector(&mut self, seg: LineSeg, color: Color) {
        let tail = self.grid.xfm_gp(seg.start);
        let head = self.grid.xfm_gp(seg.end);
        self.canvas
            .vector_arrow(tail, head, self.grid.box_size(), color);
    }

    /// Dashed-out x and y legs of the vector with per-box tick marks and
    /// component-length labels, so the arithmetic can be read off the art.
    fn draw_xy_components(&mut self, seg: LineSeg, color: Color) {
        let v = seg.vector();
        let start = self.grid.to_pix(seg.start);
        let end = self.grid.to_pix(seg.end);
        let corner = (end.0, start.1);

        self.canvas.line(start, corner, 1, color);
        self.canvas.line(corner, end, 1, color);

        let box_size = self.grid.box_size();
        let tick_len = (box_size / 6.0) as i32;
        let tick_width = ((box_size / 20.0) as i32).max(1);

        // One tick per grid box along the x leg (one extra when the vector
        // is horizontal, so the leg reads as a ruler)
        let x_stop = if v.y == 0 { v.x.abs() + 1 } else { v.x.abs() };
        for i in 1..x_stop {
            let p = self
                .grid
                .to_pix(GridPoint::new(seg.start.x + v.x.signum() * i, seg.start.y));
            self.canvas.line(
                (p.0, p.1 - tick_len),
                (p.0, p.1 + tick_len),
                tick_width,
                color,
            );
        }
        for i in 1..v.y.abs() {
            let p = self
                .grid
                .to_pix(GridPoint::new(seg.end.x, seg.end.y - v.y.signum() * i));
            self.canvas.line(
                (p.0 - tick_len, p.1),
                (p.0 + tick_len, p.1),
                tick_width,
                color,
            );
        }

        if v.x != 0 {
            let label = format!("{}", v.x);
            let w = draw::text_width(&label);
            let mid = ((start.0 + corner.0) / 2, start.1);
            // Below the x leg when the vector points up, above otherwise
            let y = if v.y < 0 {
                mid.1 - draw::GLYPH_H - 2
            } else {
                mid.1 + 2
            };
            self.canvas.text(mid.0 - w / 2, y, &label, color);
        }
        if v.y != 0 {
            let label = format!("{}", v.y);
            let w = draw::text_width(&label);
            let mid = (corner.0, (corner.1 + end.1) / 2);
            let x = if v.x < 0 { mid.0 - w - 3 } else { mid.0 + 3 };
            self.canvas.text(x, mid.1 - draw::GLYPH_H / 2, &label, color);
        }
    }

    fn draw_debug_hud(&mut self, theme: Theme, fps: f32, window_size: (usize, usize)) {
        let mouse = self.mouse_grid();
        let mut hud = DebugHud::new(fps, window_size, (mouse.x, mouse.y));
        hud.add_text(if self.settings.gravity_on {
            "Gravity on"
        } else {
            "Gravity off"
        });
        hud.add_text(format!("Go player {}", self.active_player));
        hud.add_text(format!("Player state: {}", self.player().state.label()));
        if let Some(step) = self.player().history.current() {
            let v = step.final_seg.vector();
            hud.add_text(format!(
                "Velocity: ({}, {}) | Moves: {}",
                v.x,
                v.y,
                self.player().history.up_to_head().len()
            ));
        }
        hud.render(&mut self.canvas, Palette::debug_hud(theme));
    }
}
