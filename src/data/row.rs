//! Query result rows as delivered by the dashboard host
//!
//! A row maps opaque field identifiers to cells. Field order matters for the
//! legacy first-non-empty geo field lookup, so rows keep the order in which
//! the host serialized them instead of collecting into a hash map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One cell of a query result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Cell {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn with_filterable_value(mut self, filterable_value: impl Into<Value>) -> Self {
        self.filterable_value = Some(filterable_value.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether the cell carries a usable value (not null, false, zero, or empty)
    pub fn has_value(&self) -> bool {
        is_present(&self.value)
    }

    /// The filterable value rendered as a string, if it is present
    pub fn filter_key(&self) -> Option<String> {
        match self.filterable_value.as_ref().filter(|v| is_present(v))? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Presence test mirroring what dashboard hosts treat as "no value"
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// An ordered mapping from field identifier to [`Cell`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing field in place
    pub fn with(mut self, field: impl Into<String>, cell: Cell) -> Self {
        self.insert(field, cell);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, cell: Cell) {
        let field = field.into();
        match self.cells.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = cell,
            None => self.cells.push((field, cell)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, cell)| cell)
    }

    /// Fields in host order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First field, in host order, whose cell has a value
    pub fn first_with_value(&self) -> Option<(&str, &Cell)> {
        self.iter().find(|(_, cell)| cell.has_value())
    }

    /// First present filterable value, rendered as a string
    pub fn filter_key(&self) -> Option<String> {
        self.cells.iter().find_map(|(_, cell)| cell.filter_key())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, cell) in &self.cells {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to cells")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row {
            cells: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        // Hosts occasionally send null for fields that were not selected
        while let Some((name, cell)) = access.next_entry::<String, Option<Cell>>()? {
            if let Some(cell) = cell {
                row.insert(name, cell);
            }
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}
