//! Projection of host rows onto renderable geo points

use crate::core::geo::LatLng;
use crate::data::row::{Cell, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which field of a row holds the `[lat, lng]` pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeoFieldSelector {
    /// The first field in row order whose cell has a value.
    ///
    /// Ambiguous when a row carries several non-empty dimensions; kept for
    /// hosts that do not name the location field.
    #[default]
    FirstNonEmpty,
    /// A specific field identifier
    Named(String),
}

impl GeoFieldSelector {
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            Some(name) => Self::Named(name.to_string()),
            None => Self::FirstNonEmpty,
        }
    }

    /// The cell this selector picks out of a row
    pub fn select<'r>(&self, row: &'r Row) -> Option<&'r Cell> {
        match self {
            Self::FirstNonEmpty => row.first_with_value().map(|(_, cell)| cell),
            Self::Named(field) => row.get(field).filter(|cell| cell.has_value()),
        }
    }
}

/// A geocoordinate derived from a row, with the row's color if it has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub position: LatLng,
    pub color: Option<String>,
}

impl GeoPoint {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Reads a `[lat, lng]` pair out of a cell value
pub fn lat_lng_from_value(value: &Value) -> Option<LatLng> {
    match value.as_array()?.as_slice() {
        [lat, lng] => Some(LatLng::new(lat.as_f64()?, lng.as_f64()?)),
        _ => None,
    }
}

/// Projects a single row; `None` when the selected cell is not a coordinate pair
pub fn project_row(row: &Row, selector: &GeoFieldSelector) -> Option<GeoPoint> {
    let cell = selector.select(row)?;
    let position = lat_lng_from_value(&cell.value)?;
    Some(GeoPoint {
        position,
        color: cell.color.clone(),
    })
}

/// Projects every row onto a point, silently skipping rows without one
pub fn project_points(rows: &[Row], selector: &GeoFieldSelector) -> Vec<GeoPoint> {
    let points: Vec<GeoPoint> = rows
        .iter()
        .filter_map(|row| project_row(row, selector))
        .collect();

    if points.len() < rows.len() {
        log::debug!(
            "{} of {} rows carried no usable coordinates",
            rows.len() - points.len(),
            rows.len()
        );
    }
    points
}

/// Finds the row a rendered point came from by its `"lat,lng"` filterable value
pub fn find_source_row<'r>(position: &LatLng, rows: &'r [Row]) -> Option<&'r Row> {
    let key = position.filter_key();
    rows.iter().find(|row| row.filter_key().as_deref() == Some(key.as_str()))
}

/// Popup body for the marker at `position`
pub fn popup_content(position: &LatLng, rows: &[Row], selector: &GeoFieldSelector) -> String {
    let values = find_source_row(position, rows)
        .and_then(|row| selector.select(row))
        .map(|cell| display_value(&cell.value))
        .unwrap_or_default();

    format!(
        "<div style=\"padding: 10px 10px 15px; text-align: center\">{}</div>",
        values
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Null => String::new(),
        // `40` rather than `40.0`, matching `LatLng::filter_key`
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        other => other.to_string(),
    }
}
