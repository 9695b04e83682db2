#![allow(dead_code)]

use mapvis::prelude::*;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything a recording map saw, shared with the test body
#[derive(Debug, Default)]
pub struct MapRecord {
    pub mounted: Option<String>,
    pub fitted: Vec<LatLngBounds>,
    pub fly_tos: Vec<FlyTo>,
    pub added: Vec<(LayerHandle, Layer)>,
    pub removed: Vec<LayerHandle>,
    pub live: Vec<(LayerHandle, LayerRole)>,
    pub listening: Vec<MapEventKind>,
    /// Number of upcoming `fly_to` calls to reject
    pub failing_fly_tos: usize,
    /// Number of upcoming `add_layer` calls to reject
    pub failing_adds: usize,
}

impl MapRecord {
    pub fn live_of(&self, role: LayerRole) -> Vec<LayerHandle> {
        self.live
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(h, _)| *h)
            .collect()
    }

    pub fn last_added(&self, role: LayerRole) -> Option<&Layer> {
        self.added
            .iter()
            .rev()
            .find(|(_, layer)| layer.role() == role)
            .map(|(_, layer)| layer)
    }

    pub fn added_count(&self, role: LayerRole) -> usize {
        self.added.iter().filter(|(_, l)| l.role() == role).count()
    }
}

pub struct RecordingMap {
    pub record: Rc<RefCell<MapRecord>>,
    pub bounds: LatLngBounds,
    next: u64,
}

impl RecordingMap {
    pub fn new(bounds: LatLngBounds) -> (Self, Rc<RefCell<MapRecord>>) {
        let record = Rc::new(RefCell::new(MapRecord::default()));
        (
            Self {
                record: record.clone(),
                bounds,
                next: 0,
            },
            record,
        )
    }

    pub fn world() -> (Self, Rc<RefCell<MapRecord>>) {
        Self::new(LatLngBounds::from_coords(-90.0, -180.0, 90.0, 180.0))
    }
}

impl MapAdapter for RecordingMap {
    fn mount(&mut self, container: &str) -> Result<()> {
        self.record.borrow_mut().mounted = Some(container.to_string());
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        self.record.borrow_mut().fitted.push(bounds.clone());
        Ok(())
    }

    fn fly_to(&mut self, target: &FlyTo) -> Result<()> {
        let mut record = self.record.borrow_mut();
        if record.failing_fly_tos > 0 {
            record.failing_fly_tos -= 1;
            return Err(MapError::Adapter("map is not ready".to_string()));
        }
        record.fly_tos.push(*target);
        Ok(())
    }

    fn add_layer(&mut self, layer: Layer) -> Result<LayerHandle> {
        let mut record = self.record.borrow_mut();
        if record.failing_adds > 0 {
            record.failing_adds -= 1;
            return Err(MapError::Layer(format!("cannot add {} layer", layer.role())));
        }
        self.next += 1;
        let handle = LayerHandle(self.next);
        record.live.push((handle, layer.role()));
        record.added.push((handle, layer));
        Ok(handle)
    }

    fn remove_layer(&mut self, handle: LayerHandle) -> Result<()> {
        let mut record = self.record.borrow_mut();
        let before = record.live.len();
        record.live.retain(|(h, _)| *h != handle);
        if record.live.len() == before {
            return Err(MapError::Layer(format!("{} is not on the map", handle)));
        }
        record.removed.push(handle);
        Ok(())
    }

    fn visible_bounds(&self) -> LatLngBounds {
        self.bounds.clone()
    }

    fn listen(&mut self, kind: MapEventKind) -> Result<()> {
        self.record.borrow_mut().listening.push(kind);
        Ok(())
    }
}

/// Host bridge that records every triggered event
#[derive(Default)]
pub struct RecordingHost {
    pub events: Rc<RefCell<Vec<(String, Vec<Value>)>>>,
}

impl RecordingHost {
    pub fn new() -> (Self, Rc<RefCell<Vec<(String, Vec<Value>)>>>) {
        let host = Self::default();
        let events = host.events.clone();
        (host, events)
    }
}

impl HostBridge for RecordingHost {
    fn trigger(&mut self, event: &str, payload: Vec<Value>) -> Result<()> {
        self.events.borrow_mut().push((event.to_string(), payload));
        Ok(())
    }
}

/// A row holding a location cell whose filterable value is `"lat,lng"`
pub fn loc_row(lat: f64, lng: f64) -> Row {
    Row::new().with(
        "loc",
        Cell::new(serde_json::json!([lat, lng])).with_filterable_value(format!("{},{}", lat, lng)),
    )
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
