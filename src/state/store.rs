use std::rc::Rc;

use crate::model::Cell;

/// Last synced cell list. Replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct CellStore {
    cells: Rc<[Cell]>,
    last_update_ms: Option<f64>,
}

impl Default for CellStore {
    fn default() -> Self {
        Self {
            cells: Rc::from(Vec::new()),
            last_update_ms: None,
        }
    }
}

impl CellStore {
    pub fn replace(&mut self, cells: Vec<Cell>, now_ms: f64) {
        self.cells = Rc::from(cells);
        self.last_update_ms = Some(now_ms);
    }

    /// Current list for one frame; unaffected by later `replace` calls.
    pub fn snapshot(&self) -> Rc<[Cell]> {
        self.cells.clone()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn last_update_ms(&self) -> Option<f64> {
        self.last_update_ms
    }
}

/// Pixel origin of a cell for the given unbounded scroll.
pub fn cell_origin(cell: &Cell, real_scroll_x: f64, real_scroll_y: f64, square: f64) -> (f64, f64) {
    (
        cell.x as f64 * square + real_scroll_x,
        cell.y as f64 * square + real_scroll_y,
    )
}
