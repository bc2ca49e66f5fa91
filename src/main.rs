// Entry point: window setup, logging, and the frame loop.
//
// Controls:
// • Left click: place your satellite, then click again to launch it.
// • Space steps the simulation one turn; hold N to let it run.
// • u/Shift+U undo, r redo, Tab next player.
// • Mouse wheel zooms, middle/right drag (or Shift+left drag) pans.
// • d dark mode, F2 HUD, F10 gravity, F12 screenshot.
// • Ctrl+S / Ctrl+L save and load, Ctrl+R reset, q quits.

use std::time::{Duration, Instant};

use vector_race::error::Error;
use vector_race::game::{Game, WINDOW_H, WINDOW_TITLE, WINDOW_W};
use vector_race::window::GameWindow;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Startup");

    let mut window = GameWindow::new(WINDOW_TITLE, WINDOW_W, WINDOW_H)?;
    let mut game = Game::new(WINDOW_W, WINDOW_H);

    // FPS is measured over one-second windows and fed to the HUD
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps = 0.0f32;

    while window.is_open() && !game.should_quit() {
        let input = window.poll_input();
        game.frame(&input, fps);
        window.present(game.art())?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    log::info!("Shutdown");
    Ok(())
}
