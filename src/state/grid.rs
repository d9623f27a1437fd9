// Background grid geometry
pub const BACKGROUND: &str = "#000000";
pub const LINE_COLOR: &str = "#111111";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Whether a grid line at `index` lands (at least partly) on a surface of
/// `extent` pixels once shifted by `scroll`.
fn on_surface(index: i32, scroll: f64, square: f64, extent: f64) -> bool {
    let px = index as f64 * square + scroll;
    px < extent && px > -square
}

/// Indices in `[-radius, radius)` visible along one axis.
fn visible_range(scroll: f64, square: f64, extent: f64, radius: i32) -> impl Iterator<Item = i32> {
    let lo = (((-square - scroll) / square).floor() as i32).max(-radius);
    let hi = (((extent - scroll) / square).ceil() as i32).min(radius - 1);
    (lo..=hi).filter(move |&i| on_surface(i, scroll, square, extent))
}

/// Outlines to stroke for a `width` x `height` surface.
pub fn visible_squares(
    scroll_x: f64,
    scroll_y: f64,
    width: f64,
    height: f64,
    square: f64,
    radius: i32,
) -> Vec<Square> {
    let ys: Vec<i32> = visible_range(scroll_y, square, height, radius).collect();
    let mut out = Vec::new();
    for x in visible_range(scroll_x, square, width, radius) {
        for &y in &ys {
            out.push(Square {
                x: x as f64 * square + scroll_x,
                y: y as f64 * square + scroll_y,
                size: square,
            });
        }
    }
    out
}
