//! Fixed-timestep survival-shooter core: a 25Hz simulation over an
//! 8-bit indexed playfield with a dirty-rectangle redraw pipeline. The
//! `display` feature adds the raylib window, input sampling and frame
//! presentation; everything else is deterministic and headless.

pub mod assets;
pub mod config;
pub mod diag;
pub mod entities;
pub mod game;
pub mod gfx;
pub mod grid;
pub mod hiscore;
pub mod math;
pub mod state;
pub mod world;

#[cfg(feature = "display")]
pub mod display;
