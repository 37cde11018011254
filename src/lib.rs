pub mod animation;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod coords;
pub mod error;
pub mod events;
pub mod fps;
pub mod frame;
pub mod input;
pub mod io;
pub mod render;
pub mod surface;
pub mod universe;
pub mod visualizer;

pub use error::Error;

/// Terminal coordinates and sizes, in character cells
pub type ScreenSize = u16;
