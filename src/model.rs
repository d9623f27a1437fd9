//! Wire-level data shared by the board, the renderer and both sync transports.

use serde::{Deserialize, Serialize};

/// One colored square on the shared board, in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Cell {
    pub fn at(pos: GridPos, color: UserColor) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    pub fn fill_style(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// Per-session color stamped on every cell this client creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl UserColor {
    pub const MIN_CHANNEL: u8 = 150;
    pub const MAX_CHANNEL: u8 = 255;

    /// Maps three samples from `[0, 1)` onto channels in `[150, 255]`.
    pub fn from_unit_samples(r: f64, g: f64, b: f64) -> Self {
        let channel = |s: f64| {
            let span = (Self::MAX_CHANNEL - Self::MIN_CHANNEL) as f64 + 1.0;
            let v = Self::MIN_CHANNEL as f64 + (s.clamp(0.0, 1.0) * span).floor();
            v.min(Self::MAX_CHANNEL as f64) as u8
        };
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    pub fn random() -> Self {
        Self::from_unit_samples(
            js_sys::Math::random(),
            js_sys::Math::random(),
            js_sys::Math::random(),
        )
    }
}

/// Body of `GET /info`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Seconds between authoritative server steps.
    pub update: f64,
    #[serde(default)]
    pub totalcells: Option<u64>,
}

/// Cell list as served by `/api/getcells` or the `cells` socket event.
///
/// Servers answer either with a plain array or with an object keyed by
/// index (`{"0": {...}, "1": {...}}`). Elements are kept as raw JSON so one
/// bad record never sinks the whole list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellsPayload {
    List(Vec<serde_json::Value>),
    Keyed(serde_json::Map<String, serde_json::Value>),
}

/// Canonical JS array index (`"0"`, `"17"`), as opposed to `"01"` or `"+1"`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

fn lenient_cells(values: impl IntoIterator<Item = serde_json::Value>) -> Vec<Cell> {
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Cell>(v).ok())
        .collect()
}

impl CellsPayload {
    /// Flattens into paint order, skipping entries that are not cells.
    /// Keyed entries follow JS property order: array-index keys ascending,
    /// then the remaining keys sorted.
    pub fn into_cells(self) -> Vec<Cell> {
        match self {
            CellsPayload::List(values) => lenient_cells(values),
            CellsPayload::Keyed(map) => {
                let mut entries: Vec<(Option<u32>, String, serde_json::Value)> = map
                    .into_iter()
                    .map(|(k, v)| (array_index(&k), k, v))
                    .collect();
                entries.sort_by(|a, b| match (a.0, b.0) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.1.cmp(&b.1),
                });
                lenient_cells(entries.into_iter().map(|(_, _, v)| v))
            }
        }
    }
}
