//! Startup configuration, read once from the page URL and `localStorage`.

pub const DEFAULT_SQUARE_SIZE: f64 = 40.0;
pub const DEFAULT_BOARD_RADIUS: i32 = 401;
pub const SOCKET_PATH: &str = "/socket";
pub const HUD_SETTING_KEY: &str = "lb_setting_show_hud";

const QUERY_KEYS: [&str; 6] = ["transport", "server", "socket", "square", "radius", "debug"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Periodic HTTP requests against `/api/getcells`.
    Poll,
    /// Socket receiving full `cells` pushes.
    Push,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub transport: Transport,
    /// Base URL for HTTP endpoints; empty means same origin.
    pub server: String,
    pub socket: String,
    pub square_size: f64,
    pub board_radius: i32,
    pub debug: bool,
    pub show_hud: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Poll,
            server: String::new(),
            socket: String::new(),
            square_size: DEFAULT_SQUARE_SIZE,
            board_radius: DEFAULT_BOARD_RADIUS,
            debug: false,
            show_hud: true,
        }
    }
}

/// `ws(s)://host/socket` for a page served from `protocol` + `host`.
pub fn socket_url_for(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{}://{}{}", scheme, host, SOCKET_PATH)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl ClientConfig {
    /// Applies one query parameter. Unknown keys and bad values keep the
    /// current setting.
    pub fn apply_param(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key {
            "transport" => match value.to_ascii_lowercase().as_str() {
                "poll" | "http" => self.transport = Transport::Poll,
                "push" | "socket" | "ws" => self.transport = Transport::Push,
                _ => {}
            },
            "server" => self.server = value.trim_end_matches('/').to_string(),
            "socket" if !value.is_empty() => self.socket = value.to_string(),
            "square" => {
                if let Ok(v) = value.parse::<f64>() {
                    if v.is_finite() && v > 0.0 {
                        self.square_size = v;
                    }
                }
            }
            "radius" => {
                if let Ok(v) = value.parse::<i32>() {
                    if v > 0 {
                        self.board_radius = v;
                    }
                }
            }
            "debug" => {
                if let Some(v) = parse_flag(value) {
                    self.debug = v;
                }
            }
            _ => {}
        }
    }

    pub fn hud_enabled(&self) -> bool {
        self.transport == Transport::Poll
    }

    /// Resolves the configuration from `window.location` and `localStorage`.
    pub fn from_page() -> Self {
        let mut cfg = Self::default();
        let Some(win) = web_sys::window() else {
            return cfg;
        };
        let location = win.location();
        if let (Ok(protocol), Ok(host)) = (location.protocol(), location.host()) {
            cfg.socket = socket_url_for(&protocol, &host);
        }
        if let Ok(search) = location.search() {
            if let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) {
                for key in QUERY_KEYS {
                    if let Some(v) = params.get(key) {
                        cfg.apply_param(key, &v);
                    }
                }
            }
        }
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(v)) = store.get_item(HUD_SETTING_KEY) {
                cfg.show_hud = !(v == "0" || v == "false");
            }
        }
        cfg
    }
}

pub fn persist_hud_visible(visible: bool) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.set_item(HUD_SETTING_KEY, if visible { "1" } else { "0" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_board() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.transport, Transport::Poll);
        assert_eq!(cfg.square_size, 40.0);
        assert_eq!(cfg.board_radius, 401);
        assert!(cfg.hud_enabled());
    }

    #[test]
    fn selects_push_transport() {
        let mut cfg = ClientConfig::default();
        cfg.apply_param("transport", "Push");
        assert_eq!(cfg.transport, Transport::Push);
        assert!(!cfg.hud_enabled());
    }

    #[test]
    fn ignores_bad_values() {
        let mut cfg = ClientConfig::default();
        cfg.apply_param("square", "-4");
        cfg.apply_param("square", "wide");
        cfg.apply_param("radius", "0");
        cfg.apply_param("transport", "carrier-pigeon");
        cfg.apply_param("debug", "maybe");
        cfg.apply_param("colour", "red");
        assert_eq!(cfg, ClientConfig::default());
    }

    #[test]
    fn accepts_numeric_overrides() {
        let mut cfg = ClientConfig::default();
        cfg.apply_param("square", "24");
        cfg.apply_param("radius", "50");
        cfg.apply_param("debug", "1");
        cfg.apply_param("server", "http://localhost:8000/");
        assert_eq!(cfg.square_size, 24.0);
        assert_eq!(cfg.board_radius, 50);
        assert!(cfg.debug);
        assert_eq!(cfg.server, "http://localhost:8000");
    }

    #[test]
    fn socket_scheme_follows_page() {
        assert_eq!(socket_url_for("https:", "example.org"), "wss://example.org/socket");
        assert_eq!(socket_url_for("http:", "localhost:8000"), "ws://localhost:8000/socket");
    }
}
