use crate::layers::{marker::MarkerGroup, tile::TileLayer, vector::Polyline};
use serde::{Deserialize, Serialize};

/// The role a layer plays on the map. At most one layer per role is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerRole {
    Tile,
    Points,
    Lines,
}

impl std::fmt::Display for LayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerRole::Tile => write!(f, "tile"),
            LayerRole::Points => write!(f, "points"),
            LayerRole::Lines => write!(f, "lines"),
        }
    }
}

/// Opaque handle the map widget returns for a registered layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

impl std::fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A complete description of a layer to hand to the map widget
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tile(TileLayer),
    Points(MarkerGroup),
    Lines(Polyline),
}

impl Layer {
    pub fn role(&self) -> LayerRole {
        match self {
            Layer::Tile(_) => LayerRole::Tile,
            Layer::Points(_) => LayerRole::Points,
            Layer::Lines(_) => LayerRole::Lines,
        }
    }

    /// Widget options for the layer, using Leaflet option names
    pub fn options(&self) -> serde_json::Value {
        match self {
            Layer::Tile(tile) => tile.options(),
            Layer::Points(group) => group.options(),
            Layer::Lines(lines) => lines.options(),
        }
    }

    /// Number of primitives (markers or segments) in the layer
    pub fn len(&self) -> usize {
        match self {
            Layer::Tile(_) => 1,
            Layer::Points(group) => group.len(),
            Layer::Lines(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::vector::LineStyle;

    #[test]
    fn test_layer_role_display() {
        assert_eq!(LayerRole::Tile.to_string(), "tile");
        assert_eq!(LayerRole::Points.to_string(), "points");
        assert_eq!(LayerRole::Lines.to_string(), "lines");
        assert_eq!(LayerHandle(3).to_string(), "layer#3");
    }

    #[test]
    fn test_layer_roles() {
        let tile = Layer::Tile(TileLayer::openstreetmap());
        assert_eq!(tile.role(), LayerRole::Tile);
        assert!(!tile.is_empty());

        let lines = Layer::Lines(Polyline::new(
            vec![[LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]],
            LineStyle::new("#FF0000"),
        ));
        assert_eq!(lines.role(), LayerRole::Lines);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.options()["color"], "#FF0000");
    }
}
