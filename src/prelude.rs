//! Prelude module for common mapvis types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapvis::prelude::*;`

pub use crate::core::{
    config::{OptionsSchema, VisConfig},
    geo::{LatLng, LatLngBounds, Point},
    viewport::{ConfigPatch, FlyTo, SyncPhase, ViewportState, ViewportSync},
};

pub use crate::data::{Cell, GeoFieldSelector, GeoPoint, Row};

pub use crate::input::{InteractionHandler, LinesAction, MapEvent, MapEventKind};

pub use crate::layers::{
    base::{Layer, LayerHandle, LayerRole},
    manager::LayerManager,
    marker::{CircleMarker, MarkerGroup, PointStyle, PopupOptions},
    tile::TileLayer,
    vector::{LineStyle, Polyline},
};

pub use crate::plugins::{
    MapVariant, NearestPointMap, PluginRegistry, QueryResponse, VisualizationPlugin,
};

pub use crate::spatial::{LineSelection, RankedPoint};

pub use crate::traits::{HostBridge, MapAdapter};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
