//! # mapvis
//!
//! Point map visualizations for dashboard hosts, in the style of Leaflet.
//!
//! Rows from the host's query engine are projected onto circle markers.
//! Hovering a marker draws connector lines to its nearest visible
//! neighbours, and user pans and zooms are pushed back to the host so the
//! view survives reloads. The map widget and the host are reached only
//! through the [`MapAdapter`] and [`HostBridge`] traits.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{OptionsSchema, VisConfig},
    geo::{LatLng, LatLngBounds, Point},
    viewport::{ConfigPatch, FlyTo, SyncPhase, ViewportState, ViewportSync},
};

pub use data::{GeoFieldSelector, GeoPoint, Row};

pub use input::{InteractionHandler, MapEvent, MapEventKind};

pub use layers::{
    base::{Layer, LayerHandle, LayerRole},
    manager::LayerManager,
};

pub use plugins::{MapVariant, NearestPointMap, PluginRegistry, QueryResponse, VisualizationPlugin};

pub use spatial::LineSelection;

pub use traits::{HostBridge, MapAdapter};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Map adapter error: {0}")]
    Adapter(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Visualization '{0}' is already registered")]
    DuplicatePlugin(String),
}

/// Error type alias for convenience
pub type Error = MapError;
