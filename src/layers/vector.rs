use crate::{core::geo::LatLng, spatial::nearest::RankedPoint};
use serde::{Deserialize, Serialize};

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
}

impl LineStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

/// A multi-segment polyline; each segment is drawn independently
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub segments: Vec<[LatLng; 2]>,
    pub style: LineStyle,
}

impl Polyline {
    pub fn new(segments: Vec<[LatLng; 2]>, style: LineStyle) -> Self {
        Self { segments, style }
    }

    /// Connector lines from `origin` to each ranked neighbour, closest first.
    ///
    /// Returns `None` when there are no neighbours so callers never register
    /// an empty layer.
    pub fn connectors(origin: LatLng, neighbors: &[RankedPoint], color: &str) -> Option<Self> {
        if neighbors.is_empty() {
            return None;
        }
        let segments = neighbors
            .iter()
            .map(|neighbor| [origin, neighbor.point.position])
            .collect();
        Some(Self::new(segments, LineStyle::new(color)))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "color": self.style.color,
            "latlngs": self
                .segments
                .iter()
                .map(|[a, b]| [[a.lat, a.lng], [b.lat, b.lng]])
                .collect::<Vec<_>>(),
        })
    }
}
