use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    data::projection::GeoPoint,
    layers::vector::Polyline,
    spatial::nearest::{select_neighbors, LineSelection},
};

/// The marker the pointer is currently over, in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    pub container_point: Point,
    pub radius: f64,
}

impl HoverTarget {
    /// Whether a pointer position is still inside the marker's circle
    pub fn contains(&self, pointer: &Point) -> bool {
        self.container_point.distance_to(pointer) <= self.radius
    }
}

/// What to do with the lines layer after an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum LinesAction {
    /// Replace the lines layer with these connectors
    Replace(Polyline),
    /// Remove the lines layer
    Clear,
    /// Leave the lines layer as it is
    Keep,
}

/// Everything the handler needs to know about a marker interaction
#[derive(Debug, Clone, Copy)]
pub struct MarkerInteraction<'a> {
    pub position: LatLng,
    pub container_point: Point,
    pub radius: f64,
    pub color: &'a str,
}

/// Hover state machine for connector lines
///
/// Leaflet gives no dependable "pointer left this circle marker" event for
/// this use, so leaving is detected from raw pointer moves against the
/// hovered marker's screen position and radius.
#[derive(Debug, Clone, Default)]
pub struct InteractionHandler {
    hover: Option<HoverTarget>,
}

impl InteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    /// Marker hovered or clicked: connect it to its neighbours
    pub fn on_marker(
        &mut self,
        interaction: MarkerInteraction<'_>,
        points: &[GeoPoint],
        visible: &LatLngBounds,
        selection: LineSelection,
    ) -> LinesAction {
        let neighbors = select_neighbors(points, &interaction.position, visible, selection);

        match Polyline::connectors(interaction.position, &neighbors, interaction.color) {
            Some(lines) => {
                self.hover = Some(HoverTarget {
                    container_point: interaction.container_point,
                    radius: interaction.radius,
                });
                log::debug!(
                    "hover at ({}, {}): {} connector lines",
                    interaction.position.lat,
                    interaction.position.lng,
                    lines.len()
                );
                LinesAction::Replace(lines)
            }
            None => {
                self.hover = None;
                LinesAction::Clear
            }
        }
    }

    /// Pointer moved: clear the lines once it leaves the hovered marker
    pub fn on_mouse_move(&mut self, pointer: Point) -> LinesAction {
        match self.hover {
            Some(target) if !target.contains(&pointer) => {
                self.hover = None;
                LinesAction::Clear
            }
            _ => LinesAction::Keep,
        }
    }

    /// Forgets the hovered marker, e.g. after the points were rebuilt
    pub fn reset(&mut self) {
        self.hover = None;
    }
}
