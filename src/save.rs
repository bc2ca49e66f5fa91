// Persistence: JSON save files for game state and PNG screenshots of the
// art surface.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::player::Player;
use crate::surface::Surface;

/// Runtime toggles, all reachable from the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub debug_hud: bool,
    pub dark_mode: bool,
    pub gravity_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_hud: true,
            dark_mode: true,
            gravity_on: true,
        }
    }
}

/// Everything needed to resume a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub settings: Settings,
    pub grid_n: i32,
    pub active_player: u8,
    pub players: Vec<Player>,
}

pub fn save_game(path: &Path, state: &SaveState) -> Result<(), Error> {
    let json = serde_json::to_string(state).map_err(|e| Error::SaveGame(e.to_string()))?;
    fs::write(path, json).map_err(|e| Error::SaveGame(format!("{}: {e}", path.display())))?;
    log::debug!("Game saved to {:?}", path);
    Ok(())
}

pub fn load_game(path: &Path) -> Result<SaveState, Error> {
    let json =
        fs::read_to_string(path).map_err(|e| Error::LoadGame(format!("{}: {e}", path.display())))?;
    let state = serde_json::from_str(&json).map_err(|e| Error::LoadGame(e.to_string()))?;
    log::debug!("Game loaded from {:?}", path);
    Ok(state)
}

/// Screenshot: encode the art surface as RGBA and write a PNG.
pub fn write_png(path: &Path, surface: &Surface) -> Result<(), Error> {
    let mut bytes = Vec::with_capacity(surface.pixels.len() * 4);
    for &px in &surface.pixels {
        bytes.push((px >> 16) as u8); // R
        bytes.push((px >> 8) as u8); // G
        bytes.push(px as u8); // B
        bytes.push(255); // art surface is presented opaque
    }
    let img = image::RgbaImage::from_raw(surface.width as u32, surface.height as u32, bytes)
        .ok_or_else(|| Error::Screenshot("pixel buffer size mismatch".to_string()))?;
    img.save(path)
        .map_err(|e| Error::Screenshot(format!("{}: {e}", path.display())))?;
    log::info!("Screenshot written to {:?}", path);
    Ok(())
}
