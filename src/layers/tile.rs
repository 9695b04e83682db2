use crate::core::constants::{OSM_ATTRIBUTION, OSM_TILE_URL, TILE_MAX_ZOOM, TILE_MIN_ZOOM};

/// A raster tile source, fetched and drawn by the map widget
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: i32,
    pub max_zoom: i32,
}

impl TileLayer {
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: attribution.into(),
            min_zoom: TILE_MIN_ZOOM,
            max_zoom: TILE_MAX_ZOOM,
        }
    }

    /// OpenStreetMap standard tiles
    pub fn openstreetmap() -> Self {
        Self::new(OSM_TILE_URL, OSM_ATTRIBUTION)
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.url_template,
            "minZoom": self.min_zoom,
            "maxZoom": self.max_zoom,
            "attribution": self.attribution,
        })
    }
}
