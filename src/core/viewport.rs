use crate::core::{config::VisConfig, geo::LatLng};
use serde::{Deserialize, Serialize};

/// Live view of the map widget: center and integer zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: i32,
    pub lat: f64,
    pub lng: f64,
}

impl ViewportState {
    pub fn new(zoom: i32, center: LatLng) -> Self {
        Self {
            zoom,
            lat: center.lat,
            lng: center.lng,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(4, LatLng::default())
    }
}

/// Partial configuration pushed to the host for persistence
///
/// Serializes to exactly the keys it carries: `{"zoom": 7}` or
/// `{"lat": 10.0, "lng": 20.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigPatch {
    Zoom { zoom: i32 },
    Center { lat: f64, lng: f64 },
}

/// Programmatic view change requested of the widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub center: LatLng,
    pub zoom: i32,
    pub animate: bool,
}

/// Whether the stored viewport has been applied to the widget yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Uninitialized,
    Initialized,
}

/// Last viewport values known to be persisted by the host. `None` until the
/// host has echoed them back (or we pushed them).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PersistedViewport {
    zoom: Option<i32>,
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Reconciles the widget's viewport with the host-persisted configuration
///
/// The host delivers the stored viewport asynchronously, often several
/// `update` calls after `create`. The first update that carries a zoom level
/// moves the widget there; from then on the widget is the source of truth and
/// user pans/zooms flow back to the host as [`ConfigPatch`]es.
#[derive(Debug, Clone, Default)]
pub struct ViewportSync {
    phase: SyncPhase,
    live: ViewportState,
    persisted: PersistedViewport,
}

impl ViewportSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == SyncPhase::Initialized
    }

    /// Last viewport reported by the widget
    pub fn live(&self) -> ViewportState {
        self.live
    }

    /// Called on every host `update`.
    ///
    /// Returns the pending fly-to while the stored viewport has not been
    /// applied yet. The phase only advances through
    /// [`mark_initialized`](Self::mark_initialized), so a fly-to the widget
    /// rejected is offered again on the next update. Always records the
    /// configuration's viewport as the persisted values.
    pub fn on_update(&mut self, config: &VisConfig) -> Option<FlyTo> {
        let fly_to = match (self.phase, config.zoom) {
            (SyncPhase::Uninitialized, Some(zoom)) => Some(FlyTo {
                center: LatLng::new(config.lat.unwrap_or(0.0), config.lng.unwrap_or(0.0)),
                zoom,
                animate: false,
            }),
            _ => None,
        };

        self.persisted = PersistedViewport {
            zoom: config.zoom,
            lat: config.lat,
            lng: config.lng,
        };
        fly_to
    }

    /// Records that the widget has moved to the stored viewport
    pub fn mark_initialized(&mut self, applied: &FlyTo) {
        self.phase = SyncPhase::Initialized;
        self.live = ViewportState::new(applied.zoom, applied.center);
        log::info!(
            "applied stored viewport ({:.6}, {:.6}) at zoom {}",
            applied.center.lat,
            applied.center.lng,
            applied.zoom
        );
    }

    /// Called when the widget finishes a zoom
    pub fn on_zoom_end(&mut self, zoom: i32) -> Option<ConfigPatch> {
        self.live.zoom = zoom;
        if self.persisted.zoom == Some(zoom) {
            return None;
        }
        self.persisted.zoom = Some(zoom);
        log::debug!("zoom drifted to {}, pushing to host", zoom);
        Some(ConfigPatch::Zoom { zoom })
    }

    /// Called when the widget finishes a pan (Leaflet also fires this after zooms)
    pub fn on_move_end(&mut self, center: LatLng) -> Option<ConfigPatch> {
        self.live.lat = center.lat;
        self.live.lng = center.lng;
        if self.persisted.lat == Some(center.lat) && self.persisted.lng == Some(center.lng) {
            return None;
        }
        self.persisted.lat = Some(center.lat);
        self.persisted.lng = Some(center.lng);
        log::debug!(
            "center drifted to ({:.6}, {:.6}), pushing to host",
            center.lat,
            center.lng
        );
        Some(ConfigPatch::Center {
            lat: center.lat,
            lng: center.lng,
        })
    }
}
