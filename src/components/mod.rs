pub mod app;
pub mod board_view;

pub use app::App;
