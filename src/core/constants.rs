//! Core constants derived from Leaflet defaults and the dashboard host's conventions.
//! Keeping them in a single place makes it easier to tweak plugin-wide magic numbers.

/// Initial view before any data or stored viewport arrives, as
/// `[north, west]`, `[south, east]`. Bounds the continental US.
pub const INITIAL_BOUNDS: [[f64; 2]; 2] = [[49.0, -126.0], [24.0, -65.0]];

/// OpenStreetMap tile URL template.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OSM tile usage policy.
pub const OSM_ATTRIBUTION: &str =
    "Map data © <a href=\"https://openstreetmap.org\">OpenStreetMap</a> contributors";

/// Zoom range the tile layer serves.
pub const TILE_MIN_ZOOM: i32 = 2;
pub const TILE_MAX_ZOOM: i32 = 20;

/// Fill opacity for circle markers.
pub const MARKER_FILL_OPACITY: f32 = 0.4;

/// Popup sizing (pixels).
pub const POPUP_MAX_WIDTH: u32 = 500;

/// Host event name used to push configuration patches upstream.
pub const UPDATE_CONFIG_EVENT: &str = "updateConfig";
