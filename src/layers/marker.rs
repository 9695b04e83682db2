use crate::{
    core::{
        config::VisConfig,
        constants::{MARKER_FILL_OPACITY, POPUP_MAX_WIDTH},
        geo::LatLng,
    },
    data::projection::GeoPoint,
};
use serde::{Deserialize, Serialize};

/// Style for circle markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStyle {
    /// Radius in screen pixels
    pub radius: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f32,
    pub stroke: bool,
    pub fill: bool,
    pub interactive: bool,
}

impl PointStyle {
    pub fn new(color: impl Into<String>, radius: f64) -> Self {
        let color = color.into();
        Self {
            radius,
            fill_color: color.clone(),
            color,
            fill_opacity: MARKER_FILL_OPACITY,
            stroke: false,
            fill: true,
            interactive: true,
        }
    }
}

/// Popup behaviour for markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub max_width: u32,
    pub auto_pan: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: POPUP_MAX_WIDTH,
            auto_pan: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: LatLng,
    pub style: PointStyle,
}

impl CircleMarker {
    pub fn new(position: LatLng, style: PointStyle) -> Self {
        Self { position, style }
    }
}

/// All markers for one render, replaced as a unit on every update
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub markers: Vec<CircleMarker>,
    /// Present when markers open a popup on click; content is built lazily
    pub popup: Option<PopupOptions>,
}

impl MarkerGroup {
    /// One marker per point; a point's own color wins over the configured one
    pub fn from_points(points: &[GeoPoint], config: &VisConfig) -> Self {
        let markers = points
            .iter()
            .map(|point| {
                let color = point.color.as_deref().unwrap_or(&config.point_color);
                CircleMarker::new(point.position, PointStyle::new(color, config.point_radius))
            })
            .collect();

        Self {
            markers,
            popup: config.show_popup.then(PopupOptions::default),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "markers": self
                .markers
                .iter()
                .map(|m| serde_json::json!({ "latlng": [m.position.lat, m.position.lng], "style": m.style }))
                .collect::<Vec<_>>(),
            "popup": self.popup,
        })
    }
}
