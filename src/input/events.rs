use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Events the map widget forwards to a plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapEvent {
    /// Pointer moved over the map container
    MouseMove {
        #[serde(rename = "containerPoint")]
        container_point: Point,
    },
    /// A zoom finished; carries the widget's new zoom level
    ZoomEnd { zoom: i32 },
    /// A pan (or zoom) finished; carries the widget's new center
    MoveEnd { center: LatLng },
    /// Pointer entered a marker
    MarkerOver {
        position: LatLng,
        #[serde(rename = "containerPoint")]
        container_point: Point,
    },
    /// A marker was clicked or tapped
    MarkerClick {
        position: LatLng,
        #[serde(rename = "containerPoint")]
        container_point: Point,
    },
}

/// Map-level event kinds a plugin subscribes to
///
/// Marker events are not listed: every interactive marker reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapEventKind {
    MouseMove,
    ZoomEnd,
    MoveEnd,
}

impl std::fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapEventKind::MouseMove => write!(f, "mousemove"),
            MapEventKind::ZoomEnd => write!(f, "zoomend"),
            MapEventKind::MoveEnd => write!(f, "moveend"),
        }
    }
}
