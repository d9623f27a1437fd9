// Camera / drag state for the board view
use crate::model::GridPos;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan state. `scroll_*` is folded into one cell so the grid can be tiled
/// from a fixed index window; `real_scroll_*` accumulates without bound and
/// anchors cells to pixel space.
#[derive(Debug, Clone)]
pub struct Camera {
    pub square_size: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub real_scroll_x: f64,
    pub real_scroll_y: f64,
    pub dragging: bool,
    pub drag_start: Point,
    pub drag_pos: Point,
    pub mouse_pos: Point,
}

impl Camera {
    pub fn new(square_size: f64) -> Self {
        Self {
            square_size,
            scroll_x: 0.0,
            scroll_y: 0.0,
            real_scroll_x: 0.0,
            real_scroll_y: 0.0,
            dragging: false,
            drag_start: Point::default(),
            drag_pos: Point::default(),
            mouse_pos: Point::default(),
        }
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.dragging = true;
        self.drag_start = p;
        self.drag_pos = p;
        self.mouse_pos = p;
    }

    pub fn pointer_move(&mut self, p: Point) {
        self.mouse_pos = p;
    }

    /// Ends the drag. Returns the clicked grid cell when the pointer never
    /// moved away from where it went down.
    pub fn pointer_up(&mut self, p: Point) -> Option<GridPos> {
        self.mouse_pos = p;
        let was_dragging = self.dragging;
        self.dragging = false;
        if was_dragging && self.drag_start == self.mouse_pos {
            Some(self.grid_pos_at(p))
        } else {
            None
        }
    }

    pub fn grid_pos_at(&self, p: Point) -> GridPos {
        GridPos {
            x: ((p.x - self.real_scroll_x) / self.square_size).floor() as i32,
            y: ((p.y - self.real_scroll_y) / self.square_size).floor() as i32,
        }
    }

    /// Applies the pointer delta accumulated since the previous frame.
    pub fn advance_frame(&mut self) {
        if !self.dragging {
            return;
        }
        let dx = self.mouse_pos.x - self.drag_pos.x;
        let dy = self.mouse_pos.y - self.drag_pos.y;
        self.scroll_x += dx;
        self.scroll_y += dy;
        self.real_scroll_x += dx;
        self.real_scroll_y += dy;
        self.drag_pos = self.mouse_pos;
    }

    /// Folds the tiling offset back into `[-square_size, square_size]`.
    pub fn wrap_scroll(&mut self) {
        self.scroll_x = wrap_axis(self.scroll_x, self.square_size);
        self.scroll_y = wrap_axis(self.scroll_y, self.square_size);
    }
}

fn wrap_axis(v: f64, size: f64) -> f64 {
    if v.abs() > size { v % size } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_without_movement_maps_to_grid() {
        let mut cam = Camera::new(40.0);
        let p = Point::new(83.0, 161.0);
        cam.pointer_down(p);
        assert_eq!(cam.pointer_up(p), Some(GridPos { x: 2, y: 4 }));
        assert!(!cam.dragging);
    }

    #[test]
    fn moved_pointer_is_not_a_click() {
        let mut cam = Camera::new(40.0);
        cam.pointer_down(Point::new(10.0, 10.0));
        cam.pointer_move(Point::new(30.0, 10.0));
        assert_eq!(cam.pointer_up(Point::new(30.0, 10.0)), None);
    }

    #[test]
    fn wandering_back_to_start_still_clicks() {
        let mut cam = Camera::new(40.0);
        cam.pointer_down(Point::new(10.0, 10.0));
        cam.pointer_move(Point::new(30.0, 10.0));
        assert!(cam.pointer_up(Point::new(10.0, 10.0)).is_some());
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut cam = Camera::new(40.0);
        assert_eq!(cam.pointer_up(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn negative_coordinates_floor_toward_minus_infinity() {
        let mut cam = Camera::new(40.0);
        cam.real_scroll_x = 100.0;
        cam.real_scroll_y = 0.0;
        assert_eq!(cam.grid_pos_at(Point::new(99.0, 0.0)), GridPos { x: -1, y: 0 });
        assert_eq!(cam.grid_pos_at(Point::new(100.0, 39.9)), GridPos { x: 0, y: 0 });
    }

    #[test]
    fn frame_deltas_are_incremental() {
        let mut cam = Camera::new(40.0);
        cam.pointer_down(Point::new(0.0, 0.0));
        cam.pointer_move(Point::new(5.0, -3.0));
        cam.advance_frame();
        cam.advance_frame();
        assert_eq!(cam.real_scroll_x, 5.0);
        assert_eq!(cam.real_scroll_y, -3.0);
        cam.pointer_move(Point::new(7.0, -3.0));
        cam.advance_frame();
        assert_eq!(cam.real_scroll_x, 7.0);
        assert_eq!(cam.drag_pos, Point::new(7.0, -3.0));
    }

    #[test]
    fn no_pan_when_not_dragging() {
        let mut cam = Camera::new(40.0);
        cam.pointer_move(Point::new(50.0, 50.0));
        cam.advance_frame();
        assert_eq!(cam.real_scroll_x, 0.0);
    }

    #[test]
    fn wrap_holds_for_large_drags() {
        let mut cam = Camera::new(40.0);
        cam.pointer_down(Point::new(0.0, 0.0));
        for step in [137.0, -913.0, 41.0, 4000.5, -39.0] {
            let next = Point::new(cam.mouse_pos.x + step, cam.mouse_pos.y - step);
            cam.pointer_move(next);
            cam.advance_frame();
            cam.wrap_scroll();
            assert!(cam.scroll_x.abs() <= 40.0, "scroll_x {}", cam.scroll_x);
            assert!(cam.scroll_y.abs() <= 40.0, "scroll_y {}", cam.scroll_y);
            let rx = (cam.real_scroll_x - cam.scroll_x) % 40.0;
            let ry = (cam.real_scroll_y - cam.scroll_y) % 40.0;
            assert!(rx.abs() < 1e-9 && ry.abs() < 1e-9);
        }
    }

    #[test]
    fn wrap_leaves_in_range_offsets_alone() {
        let mut cam = Camera::new(40.0);
        cam.scroll_x = 40.0;
        cam.scroll_y = -12.5;
        cam.wrap_scroll();
        assert_eq!((cam.scroll_x, cam.scroll_y), (40.0, -12.5));
    }
}
