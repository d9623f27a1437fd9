use crate::config::ClientConfig;
use crate::model::{Cell, UserColor};
use crate::sync::SyncEvent;

use super::camera::{Camera, Point};
use super::hud::HudState;
use super::store::CellStore;

/// All client-side state of one board session.
#[derive(Debug, Clone)]
pub struct Board {
    pub camera: Camera,
    pub store: CellStore,
    pub hud: HudState,
    pub color: UserColor,
    pub board_radius: i32,
}

impl Board {
    pub fn new(config: &ClientConfig, color: UserColor) -> Self {
        Self {
            camera: Camera::new(config.square_size),
            store: CellStore::default(),
            hud: HudState::new(config.hud_enabled(), config.show_hud),
            color,
            board_radius: config.board_radius,
        }
    }

    pub fn square_size(&self) -> f64 {
        self.camera.square_size
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.camera.pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.camera.pointer_move(Point::new(x, y));
    }

    /// Ends a drag; a click yields the cell the caller should send.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<Cell> {
        self.camera
            .pointer_up(Point::new(x, y))
            .map(|pos| Cell::at(pos, self.color))
    }

    pub fn apply(&mut self, event: SyncEvent, now_ms: f64) {
        match event {
            SyncEvent::Cells(cells) => self.store.replace(cells, now_ms),
            SyncEvent::Info(info) => self.hud.info = Some(info),
        }
    }
}
