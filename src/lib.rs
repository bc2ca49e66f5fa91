//! Turn-based vector racing on graph paper.
//!
//! Everything is rendered in software into a 32-bit pixel buffer: draw
//! calls land on a transparent scratch surface and only the dirty
//! bounding rectangle is alpha-blended onto the persistent art surface,
//! then erased from the scratch surface (see [`canvas`]). The game rules
//! live in [`game`], the windowing layer in [`window`].

pub mod canvas;
pub mod color;
pub mod draw;
pub mod error;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod hud;
pub mod player;
pub mod rect;
pub mod save;
pub mod surface;
pub mod window;
