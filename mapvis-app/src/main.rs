use anyhow::{bail, Context};
use fxhash::FxHashMap;
use mapvis::{
    layers::base::{Layer, LayerHandle, LayerRole},
    plugins::QueryResponse,
    FlyTo, HostBridge, LatLng, LatLngBounds, MapAdapter, MapError, MapEvent, MapEventKind,
    NearestPointMap, Row, VisualizationPlugin,
};
use serde::Deserialize;
use serde_json::Value;

/// A recorded host session: lifecycle calls and widget events, in order
#[derive(Debug, Deserialize)]
struct Session {
    #[serde(default = "default_container")]
    container: String,
    #[serde(default)]
    visible_bounds: Option<LatLngBounds>,
    steps: Vec<Step>,
}

fn default_container() -> String {
    "vis".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
enum Step {
    Create {
        #[serde(default)]
        config: Value,
    },
    Update {
        rows: Vec<Row>,
        #[serde(default)]
        config: Value,
        #[serde(default)]
        query: QueryResponse,
    },
    Event {
        event: MapEvent,
    },
    Popup {
        position: LatLng,
    },
}

/// Map widget stand-in that logs every call and tracks live layers
struct HeadlessMap {
    next_handle: u64,
    live: FxHashMap<LayerHandle, LayerRole>,
    bounds: LatLngBounds,
}

impl HeadlessMap {
    fn new(bounds: LatLngBounds) -> Self {
        Self {
            next_handle: 0,
            live: FxHashMap::default(),
            bounds,
        }
    }
}

impl MapAdapter for HeadlessMap {
    fn mount(&mut self, container: &str) -> mapvis::Result<()> {
        log::info!("mount #{}", container);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> mapvis::Result<()> {
        log::info!(
            "fit bounds SW({}, {}) NE({}, {})",
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng
        );
        Ok(())
    }

    fn fly_to(&mut self, target: &FlyTo) -> mapvis::Result<()> {
        log::info!(
            "fly to ({}, {}) zoom {} animate={}",
            target.center.lat,
            target.center.lng,
            target.zoom,
            target.animate
        );
        Ok(())
    }

    fn add_layer(&mut self, layer: Layer) -> mapvis::Result<LayerHandle> {
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        log::info!("add {} {} {}", layer.role(), handle, layer.options());
        self.live.insert(handle, layer.role());
        Ok(handle)
    }

    fn remove_layer(&mut self, handle: LayerHandle) -> mapvis::Result<()> {
        match self.live.remove(&handle) {
            Some(role) => {
                log::info!("remove {} {}", role, handle);
                Ok(())
            }
            None => Err(MapError::Layer(format!("{} is not on the map", handle))),
        }
    }

    fn visible_bounds(&self) -> LatLngBounds {
        self.bounds.clone()
    }

    fn listen(&mut self, kind: MapEventKind) -> mapvis::Result<()> {
        log::debug!("listening for {}", kind);
        Ok(())
    }
}

/// Host stand-in that prints triggered events as JSON lines on stdout
struct StdoutHost;

impl HostBridge for StdoutHost {
    fn trigger(&mut self, event: &str, payload: Vec<Value>) -> mapvis::Result<()> {
        let line = serde_json::json!({ "event": event, "payload": payload });
        println!("{}", line);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: mapvis-app <session.json> [leaflet|voronoi]");
    };
    let variant = args.next().unwrap_or_else(|| "leaflet".to_string());

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let session: Session =
        serde_json::from_str(&text).with_context(|| format!("parsing session {}", path))?;

    let bounds = session
        .visible_bounds
        .clone()
        .unwrap_or_else(|| LatLngBounds::from_coords(-90.0, -180.0, 90.0, 180.0));
    let map = HeadlessMap::new(bounds);
    let mut vis = match variant.as_str() {
        "leaflet" => NearestPointMap::leaflet(map, StdoutHost),
        "voronoi" => NearestPointMap::voronoi(map, StdoutHost),
        other => bail!("unknown visualization '{}'", other),
    };

    for (index, step) in session.steps.into_iter().enumerate() {
        let result = match step {
            Step::Create { config } => vis.create(&session.container, &config),
            Step::Update { rows, config, query } => {
                vis.update(&rows, &session.container, &config, &query)
            }
            Step::Event { event } => vis.handle_event(&event),
            Step::Popup { position } => {
                match vis.popup_content(&position) {
                    Some(content) => println!("{}", serde_json::json!({ "popup": content })),
                    None => log::info!("popups disabled"),
                }
                Ok(())
            }
        };
        result.with_context(|| format!("step {}", index))?;
    }

    log::info!(
        "replayed session: {} points, {} live layers",
        vis.points().len(),
        vis.layers().len()
    );
    Ok(())
}
