// End-to-end game flow driven headless through FrameInput: both players
// place, launch, and fly; undo/redo; save to disk and resume.

use std::path::PathBuf;

use vector_race::game::{Game, WINDOW_H, WINDOW_W};
use vector_race::geometry::GridPoint;
use vector_race::grid::Grid;
use vector_race::player::PlayerState;
use vector_race::window::{FrameInput, GameKey, Mods};

const SIZE: (usize, usize) = (WINDOW_W, WINDOW_H);

fn idle() -> FrameInput {
    FrameInput {
        window_size: SIZE,
        ..FrameInput::default()
    }
}

/// Pixel position of a grid point under the default view transform.
fn at(x: i32, y: i32) -> (f32, f32) {
    Grid::new(40, SIZE).xfm_gp(GridPoint::new(x, y))
}

fn click(game: &mut Game, pos: (f32, f32)) {
    let input = FrameInput {
        mouse_pos: pos,
        left_click: true,
        ..idle()
    };
    game.frame(&input, 60.0);
}

fn press(game: &mut Game, key: GameKey, mods: Mods) {
    let input = FrameInput {
        keys: vec![(key, mods)],
        ..idle()
    };
    game.frame(&input, 60.0);
}

fn tmp(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vector-race-flow-{}-{name}", std::process::id()))
}

#[test]
fn two_players_race_save_and_resume() {
    let mut game = Game::new(WINDOW_W, WINDOW_H);
    let save_path = tmp("race.json");
    game.set_save_path(save_path.clone());

    // Player 1: place at (8, 2), launch with velocity (0, 2)
    click(&mut game, at(8, 2));
    click(&mut game, at(8, 4));
    assert_eq!(game.players()[0].state, PlayerState::StepPhysics);

    // Player 2: place at (-6, -6), launch with velocity (2, 0)
    press(&mut game, GameKey::Tab, Mods::default());
    assert_eq!(game.active_player(), 2);
    click(&mut game, at(-6, -6));
    click(&mut game, at(-4, -6));
    assert_eq!(game.players()[1].state, PlayerState::StepPhysics);

    // Fly player 2 a few turns, then hand the turn back
    press(&mut game, GameKey::Space, Mods::default());
    press(&mut game, GameKey::Space, Mods::default());
    assert_eq!(game.players()[1].history.up_to_head().len(), 3);
    press(&mut game, GameKey::Tab, Mods::default());

    // Save, keep playing, then load: the post-save moves are gone
    press(&mut game, GameKey::S, Mods { shift: false, ctrl: true });
    assert!(save_path.exists());
    let saved_pos = game.players()[0].pos;
    press(&mut game, GameKey::Space, Mods::default());
    assert_ne!(game.players()[0].pos, saved_pos);
    press(&mut game, GameKey::L, Mods { shift: false, ctrl: true });
    assert_eq!(game.players()[0].pos, saved_pos);
    assert_eq!(game.active_player(), 1);
    assert_eq!(game.players()[1].history.up_to_head().len(), 3);

    std::fs::remove_file(&save_path).ok();
}

#[test]
fn loading_into_a_fresh_process_restores_the_race() {
    let save_path = tmp("resume.json");
    {
        let mut game = Game::new(WINDOW_W, WINDOW_H);
        game.set_save_path(save_path.clone());
        click(&mut game, at(0, 10));
        click(&mut game, at(0, 12));
        press(&mut game, GameKey::Space, Mods::default());
        press(&mut game, GameKey::S, Mods { shift: false, ctrl: true });
    }

    let mut game = Game::new(WINDOW_W, WINDOW_H);
    game.set_save_path(save_path.clone());
    press(&mut game, GameKey::L, Mods { shift: false, ctrl: true });
    std::fs::remove_file(&save_path).ok();

    let p1 = &game.players()[0];
    assert_eq!(p1.init_pos, GridPoint::new(0, 10));
    assert_eq!(p1.state, PlayerState::StepPhysics);
    assert_eq!(p1.history.up_to_head().len(), 2);
    // And the loaded game keeps stepping from where it left off
    let before = p1.pos;
    press(&mut game, GameKey::Space, Mods::default());
    assert_ne!(game.players()[0].pos, before);
}

#[test]
fn hold_n_runs_the_simulation() {
    let mut game = Game::new(WINDOW_W, WINDOW_H);
    game.settings.gravity_on = false;
    click(&mut game, at(-10, 0));
    click(&mut game, at(-9, 0));
    let input = FrameInput {
        n_held: true,
        ..idle()
    };
    for _ in 0..5 {
        game.frame(&input, 60.0);
    }
    // Launch move plus five held-n turns, one per frame
    assert_eq!(game.players()[0].history.up_to_head().len(), 6);
    assert_eq!(game.players()[0].pos, GridPoint::new(-4, 0));
}

#[test]
fn zoom_and_pan_do_not_disturb_the_race_state() {
    let mut game = Game::new(WINDOW_W, WINDOW_H);
    click(&mut game, at(5, 5));
    click(&mut game, at(6, 5));
    let pos = game.players()[0].pos;

    let zoom = FrameInput {
        scroll_y: 1.0,
        ..idle()
    };
    game.frame(&zoom, 60.0);
    let pan_start = FrameInput {
        mouse_pos: (200.0, 200.0),
        pan_press: true,
        ..idle()
    };
    game.frame(&pan_start, 60.0);
    let pan_end = FrameInput {
        mouse_pos: (320.0, 260.0),
        pan_release: true,
        ..idle()
    };
    game.frame(&pan_end, 60.0);

    assert_eq!(game.players()[0].pos, pos);
    assert_eq!(game.players()[0].history.up_to_head().len(), 1);
}

#[test]
fn identical_frames_render_identical_art() {
    let mut game = Game::new(640, 480);
    let input = FrameInput {
        window_size: (640, 480),
        mouse_pos: (100.0, 100.0),
        ..FrameInput::default()
    };
    game.frame(&input, 60.0);
    let first = game.art().pixels.clone();
    for _ in 0..4 {
        game.frame(&input, 60.0);
    }
    assert_eq!(game.art().pixels, first);
}
