//! Point map with nearest-neighbour connector lines
//!
//! Two variants share this implementation: the `leaflet` map connects a
//! hovered marker to its configured number of closest visible neighbours, and
//! the `voronoi` map connects it to every visible neighbour.

use crate::{
    core::{
        config::{OptionsSchema, VisConfig},
        constants::INITIAL_BOUNDS,
        geo::{LatLng, LatLngBounds, Point},
        viewport::{SyncPhase, ViewportSync},
    },
    data::{
        projection::{popup_content, project_points, GeoFieldSelector, GeoPoint},
        row::Row,
    },
    input::{
        events::{MapEvent, MapEventKind},
        handler::{InteractionHandler, LinesAction, MarkerInteraction},
    },
    layers::{
        base::{Layer, LayerRole},
        manager::LayerManager,
        marker::MarkerGroup,
        tile::TileLayer,
    },
    plugins::base::{QueryResponse, VisualizationPlugin},
    spatial::nearest::LineSelection,
    traits::{HostBridge, MapAdapter},
    MapError, Result,
};
use serde_json::Value;

/// How many neighbours a variant connects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapVariant {
    /// The configured `lineNumber` closest neighbours
    PointLines,
    /// Every visible neighbour
    Voronoi,
}

impl MapVariant {
    pub fn id(&self) -> &'static str {
        match self {
            MapVariant::PointLines => "leaflet",
            MapVariant::Voronoi => "voronoi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MapVariant::PointLines => "leaflet",
            MapVariant::Voronoi => "Voronoi",
        }
    }

    pub fn selection(&self, config: &VisConfig) -> LineSelection {
        match self {
            MapVariant::PointLines => LineSelection::Nearest(config.line_number),
            MapVariant::Voronoi => LineSelection::AllVisible,
        }
    }
}

/// Per-instance state of one map visualization
pub struct NearestPointMap<M, H> {
    variant: MapVariant,
    options: OptionsSchema,
    map: M,
    host: H,
    created: bool,
    config: VisConfig,
    selector: GeoFieldSelector,
    rows: Vec<Row>,
    points: Vec<GeoPoint>,
    layers: LayerManager,
    viewport: ViewportSync,
    interaction: InteractionHandler,
}

impl<M: MapAdapter, H: HostBridge> NearestPointMap<M, H> {
    pub fn new(variant: MapVariant, map: M, host: H) -> Self {
        Self {
            variant,
            options: OptionsSchema::standard(),
            map,
            host,
            created: false,
            config: VisConfig::default(),
            selector: GeoFieldSelector::default(),
            rows: Vec::new(),
            points: Vec::new(),
            layers: LayerManager::new(),
            viewport: ViewportSync::new(),
            interaction: InteractionHandler::new(),
        }
    }

    /// Point map connecting each hovered marker to its nearest neighbours
    pub fn leaflet(map: M, host: H) -> Self {
        Self::new(MapVariant::PointLines, map, host)
    }

    /// Point map connecting each hovered marker to every visible neighbour
    pub fn voronoi(map: M, host: H) -> Self {
        Self::new(MapVariant::Voronoi, map, host)
    }

    pub fn variant(&self) -> MapVariant {
        self.variant
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    /// Points projected by the most recent `update`
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn viewport_phase(&self) -> SyncPhase {
        self.viewport.phase()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Removes every layer this instance registered
    pub fn destroy(&mut self) -> Result<()> {
        self.interaction.reset();
        self.layers.clear(&mut self.map)?;
        self.created = false;
        Ok(())
    }

    fn on_marker(&mut self, position: LatLng, container_point: Point) -> Result<()> {
        // a point's own color wins, as it does for its marker
        let color = self
            .points
            .iter()
            .find(|point| point.position.same_position(&position))
            .and_then(|point| point.color.as_deref())
            .unwrap_or(&self.config.line_color);

        let interaction = MarkerInteraction {
            position,
            container_point,
            radius: self.config.point_radius,
            color,
        };
        let visible = self.map.visible_bounds();
        let selection = self.variant.selection(&self.config);
        let action = self
            .interaction
            .on_marker(interaction, &self.points, &visible, selection);
        self.apply_lines(action)
    }

    fn apply_lines(&mut self, action: LinesAction) -> Result<()> {
        match action {
            LinesAction::Replace(lines) => {
                self.layers.replace(&mut self.map, Layer::Lines(lines))?;
            }
            LinesAction::Clear => {
                self.layers.remove(&mut self.map, LayerRole::Lines)?;
            }
            LinesAction::Keep => {}
        }
        Ok(())
    }
}

impl<M: MapAdapter, H: HostBridge> VisualizationPlugin for NearestPointMap<M, H> {
    fn id(&self) -> &str {
        self.variant.id()
    }

    fn label(&self) -> &str {
        self.variant.label()
    }

    fn options(&self) -> &OptionsSchema {
        &self.options
    }

    fn create(&mut self, container: &str, config: &Value) -> Result<()> {
        self.config = VisConfig::from_value(config);
        self.selector = GeoFieldSelector::from_field(self.config.geo_field.as_deref());

        self.map.mount(container)?;
        let [north_west, south_east] = INITIAL_BOUNDS;
        self.map.fit_bounds(&LatLngBounds::from_corners(
            LatLng::from(north_west),
            LatLng::from(south_east),
        ))?;
        self.layers
            .replace(&mut self.map, Layer::Tile(TileLayer::openstreetmap()))?;

        for kind in [MapEventKind::MouseMove, MapEventKind::ZoomEnd, MapEventKind::MoveEnd] {
            self.map.listen(kind)?;
        }

        self.created = true;
        log::info!("created {} map in #{}", self.variant.id(), container);
        Ok(())
    }

    fn update(
        &mut self,
        rows: &[Row],
        container: &str,
        config: &Value,
        query: &QueryResponse,
    ) -> Result<()> {
        if !self.created {
            return Err(MapError::Plugin(format!(
                "update on #{} before create",
                container
            )));
        }

        self.config = VisConfig::from_value(config);
        self.selector = GeoFieldSelector::from_field(self.config.geo_field.as_deref());

        if let Some(target) = self.viewport.on_update(&self.config) {
            self.map.fly_to(&target)?;
            self.viewport.mark_initialized(&target);
        }

        let points = project_points(rows, &self.selector);
        log::debug!(
            "update: {} rows, {} points, fields {}",
            rows.len(),
            points.len(),
            query.fields
        );

        // hover and popups only ever see points that made it onto the map
        let markers = MarkerGroup::from_points(&points, &self.config);
        if let Err(e) = self.layers.replace(&mut self.map, Layer::Points(markers)) {
            self.rows.clear();
            self.points.clear();
            self.interaction.reset();
            return Err(e);
        }
        self.rows = rows.to_vec();
        self.points = points;
        Ok(())
    }

    fn handle_event(&mut self, event: &MapEvent) -> Result<()> {
        match *event {
            MapEvent::MouseMove { container_point } => {
                let action = self.interaction.on_mouse_move(container_point);
                self.apply_lines(action)
            }
            MapEvent::ZoomEnd { zoom } => match self.viewport.on_zoom_end(zoom) {
                Some(patch) => self.host.update_config(patch),
                None => Ok(()),
            },
            MapEvent::MoveEnd { center } => match self.viewport.on_move_end(center) {
                Some(patch) => self.host.update_config(patch),
                None => Ok(()),
            },
            MapEvent::MarkerOver {
                position,
                container_point,
            }
            | MapEvent::MarkerClick {
                position,
                container_point,
            } => self.on_marker(position, container_point),
        }
    }

    fn popup_content(&self, position: &LatLng) -> Option<String> {
        self.config
            .show_popup
            .then(|| popup_content(position, &self.rows, &self.selector))
    }
}
