// HUD overlay state (polling transport only)
use crate::model::ServerInfo;

pub const FRESH_WINDOW_MS: f64 = 200.0;
pub const PANEL_FILL: &str = "rgba(255, 255, 255, .3)";
pub const FRESH_COLOR: &str = "rgb(100, 255, 100)";
pub const TEXT_COLOR: &str = "rgb(255, 255, 255)";

const HINTS: [&str; 3] = [
    "click: to place cell",
    "click + drag: move point of view",
    "press H to toggle this message",
];

/// Row 0 is reserved for the interval line, the hints always sit on rows
/// 1..=3, and the server cell count comes after them.
pub const INTERVAL_ROW: usize = 0;
pub const FIRST_HINT_ROW: usize = 1;
pub const COUNT_ROW: usize = FIRST_HINT_ROW + HINTS.len();

#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub row: usize,
    pub text: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct HudState {
    /// False for transports that have no HUD at all.
    pub enabled: bool,
    pub visible: bool,
    pub info: Option<ServerInfo>,
}

impl HudState {
    pub fn new(enabled: bool, visible: bool) -> Self {
        Self {
            enabled,
            visible,
            info: None,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn shown(&self) -> bool {
        self.enabled && self.visible
    }

    pub fn interval_color(last_sync_ms: Option<f64>, now_ms: f64) -> &'static str {
        match last_sync_ms {
            Some(t) if now_ms - t < FRESH_WINDOW_MS => FRESH_COLOR,
            _ => TEXT_COLOR,
        }
    }

    pub fn lines(&self, last_sync_ms: Option<f64>, now_ms: f64) -> Vec<HudLine> {
        let mut out = Vec::new();
        if let Some(info) = self.info {
            out.push(HudLine {
                row: INTERVAL_ROW,
                text: format!("server update interval: {} sec", info.update),
                color: Self::interval_color(last_sync_ms, now_ms),
            });
            if let Some(total) = info.totalcells {
                out.push(HudLine {
                    row: COUNT_ROW,
                    text: format!("cells on server: {}", total),
                    color: TEXT_COLOR,
                });
            }
        }
        out.extend(HINTS.iter().enumerate().map(|(i, h)| HudLine {
            row: FIRST_HINT_ROW + i,
            text: h.to_string(),
            color: TEXT_COLOR,
        }));
        out
    }

    /// Rows the panel must cover; never fewer than interval + hints.
    pub fn row_count(lines: &[HudLine]) -> usize {
        lines.iter().map(|l| l.row + 1).max().unwrap_or(0).max(COUNT_ROW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_sync_is_green() {
        assert_eq!(HudState::interval_color(Some(1000.0), 1150.0), FRESH_COLOR);
        assert_eq!(HudState::interval_color(Some(1000.0), 1200.0), TEXT_COLOR);
        assert_eq!(HudState::interval_color(None, 0.0), TEXT_COLOR);
    }

    #[test]
    fn hint_rows_do_not_move_when_info_arrives() {
        let mut hud = HudState::new(true, true);
        let rows = |lines: Vec<HudLine>| -> Vec<(usize, String)> {
            lines
                .into_iter()
                .filter(|l| l.row >= FIRST_HINT_ROW && l.row < COUNT_ROW)
                .map(|l| (l.row, l.text))
                .collect()
        };
        let before = rows(hud.lines(None, 0.0));
        hud.info = Some(ServerInfo { update: 5.0, totalcells: Some(7) });
        let after = rows(hud.lines(None, 0.0));
        assert_eq!(before, after);
        assert_eq!(before[0].0, FIRST_HINT_ROW);
    }

    #[test]
    fn panel_grows_only_for_cell_count() {
        let mut hud = HudState::new(true, true);
        assert_eq!(HudState::row_count(&hud.lines(None, 0.0)), 4);
        hud.info = Some(ServerInfo { update: 5.0, totalcells: None });
        assert_eq!(HudState::row_count(&hud.lines(None, 0.0)), 4);
        hud.info = Some(ServerInfo { update: 5.0, totalcells: Some(1) });
        assert_eq!(HudState::row_count(&hud.lines(None, 0.0)), 5);
    }

    #[test]
    fn interval_line_waits_for_info() {
        let mut hud = HudState::new(true, true);
        assert_eq!(hud.lines(None, 0.0).len(), 3);
        hud.info = Some(ServerInfo { update: 2.0, totalcells: None });
        let lines = hud.lines(Some(0.0), 10.0);
        assert_eq!(lines[0].text, "server update interval: 2 sec");
        assert_eq!(lines[0].color, FRESH_COLOR);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn reports_server_cell_count() {
        let mut hud = HudState::new(true, true);
        hud.info = Some(ServerInfo { update: 5.0, totalcells: Some(12) });
        let lines = hud.lines(None, 0.0);
        assert_eq!(lines[1].text, "cells on server: 12");
        assert_eq!(lines[1].row, COUNT_ROW);
    }

    #[test]
    fn disabled_hud_never_shows() {
        let mut hud = HudState::new(false, true);
        assert!(!hud.shown());
        hud.toggle();
        hud.toggle();
        assert!(!hud.shown());
    }
}
