//! Seams between the visualization logic and the outside world
//!
//! The plugins never talk to a concrete map widget or dashboard host. They go
//! through these two traits so the interaction and viewport logic can be
//! driven by a browser binding, a headless replay, or a test fake alike.

use crate::{
    core::{
        constants::UPDATE_CONFIG_EVENT,
        geo::LatLngBounds,
        viewport::{ConfigPatch, FlyTo},
    },
    input::events::MapEventKind,
    layers::base::{Layer, LayerHandle},
    Result,
};

/// Capabilities consumed from the map widget
pub trait MapAdapter {
    /// Binds the widget to the host-provided container element
    fn mount(&mut self, container: &str) -> Result<()>;

    /// Frames the given bounds
    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()>;

    /// Moves the view to a center and zoom
    fn fly_to(&mut self, target: &FlyTo) -> Result<()>;

    /// Registers a layer and returns the handle used to remove it later
    fn add_layer(&mut self, layer: Layer) -> Result<LayerHandle>;

    /// Unregisters a previously added layer
    fn remove_layer(&mut self, handle: LayerHandle) -> Result<()>;

    /// Geographic bounds currently visible in the widget
    fn visible_bounds(&self) -> LatLngBounds;

    /// Asks the widget to forward events of this kind to the plugin
    fn listen(&mut self, kind: MapEventKind) -> Result<()>;
}

/// Outbound channel to the dashboard host
pub trait HostBridge {
    /// Raises a named host event with its payload arguments
    fn trigger(&mut self, event: &str, payload: Vec<serde_json::Value>) -> Result<()>;

    /// Asks the host to persist a partial configuration change
    fn update_config(&mut self, patch: ConfigPatch) -> Result<()> {
        let payload = serde_json::to_value(patch)?;
        self.trigger(UPDATE_CONFIG_EVENT, vec![payload])
    }
}

impl<T: MapAdapter + ?Sized> MapAdapter for Box<T> {
    fn mount(&mut self, container: &str) -> Result<()> {
        (**self).mount(container)
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        (**self).fit_bounds(bounds)
    }

    fn fly_to(&mut self, target: &FlyTo) -> Result<()> {
        (**self).fly_to(target)
    }

    fn add_layer(&mut self, layer: Layer) -> Result<LayerHandle> {
        (**self).add_layer(layer)
    }

    fn remove_layer(&mut self, handle: LayerHandle) -> Result<()> {
        (**self).remove_layer(handle)
    }

    fn visible_bounds(&self) -> LatLngBounds {
        (**self).visible_bounds()
    }

    fn listen(&mut self, kind: MapEventKind) -> Result<()> {
        (**self).listen(kind)
    }
}

impl<T: HostBridge + ?Sized> HostBridge for Box<T> {
    fn trigger(&mut self, event: &str, payload: Vec<serde_json::Value>) -> Result<()> {
        (**self).trigger(event, payload)
    }
}
