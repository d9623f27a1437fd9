pub mod board;
pub mod camera;
pub mod grid;
pub mod hud;
pub mod store;

pub use board::Board;
