pub mod base;
pub mod nearest;
pub mod registry;

pub use base::{QueryResponse, VisualizationPlugin};
pub use nearest::{MapVariant, NearestPointMap};
pub use registry::PluginRegistry;
