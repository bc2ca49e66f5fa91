// One error type for the whole game.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Pushing the frame buffer to the window failed
    SaveGame(String),     // Writing the JSON save file failed
    LoadGame(String),     // Reading or parsing the JSON save file failed
    Screenshot(String),   // Encoding or writing the PNG failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::SaveGame(s) => write!(f, "Save game error: {s}"),
            Error::LoadGame(s) => write!(f, "Load game error: {s}"),
            Error::Screenshot(s) => write!(f, "Screenshot error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
