//! Configuration system for the visualization options exposed to the host
//!
//! The host renders a settings panel from the [`OptionsSchema`] and hands the
//! user's choices back as loosely-typed JSON on every `create`/`update`. This
//! module declares the schema and turns that JSON into a typed [`VisConfig`].

use crate::{MapError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_POINT_COLOR: &str = "#000000";
pub const DEFAULT_POINT_RADIUS: f64 = 3.0;
pub const DEFAULT_LINE_COLOR: &str = "#FF0000";
pub const DEFAULT_LINE_NUMBER: usize = 5;

/// Value type of a host option
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Number,
    Boolean,
}

/// UI affordance the host uses to edit an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionDisplay {
    Color,
    Range,
    Text,
}

/// Declaration of a single host option
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptionSpec {
    #[serde(skip)]
    pub key: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub section: &'static str,
    pub label: &'static str,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<OptionDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl OptionSpec {
    fn new(key: &'static str, kind: OptionKind, section: &'static str, label: &'static str) -> Self {
        Self {
            key,
            kind,
            section,
            label,
            default: Value::Null,
            display: None,
            min: None,
            max: None,
            step: None,
        }
    }

    fn default_value(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    fn display(mut self, display: OptionDisplay) -> Self {
        self.display = Some(display);
        self
    }

    fn range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    /// Checks a host-supplied value against the declared type and bounds
    pub fn check(&self, value: &Value) -> Result<()> {
        let invalid = |reason: String| MapError::InvalidOption {
            key: self.key.to_string(),
            reason,
        };

        match self.kind {
            OptionKind::String if !value.is_string() => {
                Err(invalid(format!("expected a string, got {}", value)))
            }
            OptionKind::Boolean if !value.is_boolean() => {
                Err(invalid(format!("expected a boolean, got {}", value)))
            }
            OptionKind::Number => {
                let number = value
                    .as_f64()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| invalid(format!("expected a number, got {}", value)))?;
                if let Some(min) = self.min.filter(|min| number < *min) {
                    return Err(invalid(format!("{} is below the minimum {}", number, min)));
                }
                if let Some(max) = self.max.filter(|max| number > *max) {
                    return Err(invalid(format!("{} is above the maximum {}", number, max)));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Ordered set of option declarations, serialized as the host's `options` object
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsSchema {
    specs: Vec<OptionSpec>,
}

impl OptionsSchema {
    /// Options shared by every map variant in this crate
    pub fn standard() -> Self {
        use OptionDisplay::*;
        use OptionKind::*;

        let specs = vec![
            OptionSpec::new("pointColor", String, "Style", "Point Color")
                .default_value(Value::from(DEFAULT_POINT_COLOR))
                .display(Color),
            OptionSpec::new("pointRadius", Number, "Style", "Point Radius")
                .default_value(Value::from(DEFAULT_POINT_RADIUS))
                .display(Range)
                .range(1.0, 20.0, 1.0),
            OptionSpec::new("lineColor", String, "Style", "Line Color")
                .default_value(Value::from(DEFAULT_LINE_COLOR))
                .display(Color),
            OptionSpec::new("showPopup", Boolean, "Style", "Show Popup")
                .default_value(Value::Bool(false)),
            OptionSpec::new("lineNumber", Number, "Style", "Number of Lines")
                .default_value(Value::from(DEFAULT_LINE_NUMBER))
                .range(1.0, 20.0, 1.0),
            OptionSpec::new("geoField", String, "Data", "Location Field")
                .default_value(Value::from(""))
                .display(Text),
            OptionSpec::new("zoom", Number, "Windowing", "Zoom Level")
                .default_value(Value::from(4))
                .display(Range)
                .range(1.0, 20.0, 1.0),
            OptionSpec::new("lat", Number, "Windowing", "Latitude")
                .default_value(Value::from(0))
                .display(Range)
                .range(-90.0, 90.0, 0.000001),
            OptionSpec::new("lng", Number, "Windowing", "Longitude")
                .default_value(Value::from(0))
                .display(Range)
                .range(-180.0, 180.0, 0.000001),
        ];

        Self { specs }
    }

    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Keeps only the declared options whose values pass [`OptionSpec::check`].
    ///
    /// Invalid values are dropped with a warning so the caller falls back to
    /// its default. Unknown keys are ignored.
    pub fn resolve(&self, config: &Value) -> Map<String, Value> {
        let mut resolved = Map::new();
        let Some(object) = config.as_object() else {
            if !config.is_null() {
                log::warn!("configuration is not an object, using defaults: {}", config);
            }
            return resolved;
        };

        for spec in &self.specs {
            let Some(value) = object.get(spec.key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match spec.check(value) {
                Ok(()) => {
                    resolved.insert(spec.key.to_string(), value.clone());
                }
                Err(e) => log::warn!("ignoring option: {}", e),
            }
        }
        resolved
    }

    /// Strict form of [`resolve`](Self::resolve): the first invalid declared
    /// option is an error.
    pub fn validate(&self, config: &Value) -> Result<()> {
        let object = config.as_object().ok_or_else(|| MapError::InvalidOption {
            key: "<root>".to_string(),
            reason: format!("expected an object, got {}", config),
        })?;

        for spec in &self.specs {
            match object.get(spec.key) {
                Some(value) if !value.is_null() => spec.check(value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl Serialize for OptionsSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.specs.len()))?;
        for spec in &self.specs {
            map.serialize_entry(spec.key, spec)?;
        }
        map.end()
    }
}

/// Typed view of the host configuration for one render
///
/// Style options always carry a value (their default when missing or
/// malformed). Windowing options stay `None` until the host has persisted a
/// viewport, which is what drives the one-time fly-to.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    pub point_color: String,
    pub point_radius: f64,
    pub line_color: String,
    pub show_popup: bool,
    pub line_number: usize,
    /// Field holding the `[lat, lng]` pair; `None` picks the first non-empty field
    pub geo_field: Option<String>,
    pub zoom: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            point_color: DEFAULT_POINT_COLOR.to_string(),
            point_radius: DEFAULT_POINT_RADIUS,
            line_color: DEFAULT_LINE_COLOR.to_string(),
            show_popup: false,
            line_number: DEFAULT_LINE_NUMBER,
            geo_field: None,
            zoom: None,
            lat: None,
            lng: None,
        }
    }
}

impl VisConfig {
    /// Lenient conversion: malformed options are coerced to their defaults
    pub fn from_value(config: &Value) -> Self {
        Self::from_resolved(&OptionsSchema::standard().resolve(config))
    }

    /// Strict conversion: malformed options are reported instead of coerced
    pub fn validate_value(config: &Value) -> Result<Self> {
        let schema = OptionsSchema::standard();
        schema.validate(config)?;
        Ok(Self::from_resolved(&schema.resolve(config)))
    }

    fn from_resolved(resolved: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let string = |key: &str| resolved.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| resolved.get(key).and_then(Value::as_f64);

        Self {
            point_color: string("pointColor").unwrap_or(defaults.point_color),
            point_radius: number("pointRadius").unwrap_or(defaults.point_radius),
            line_color: string("lineColor").unwrap_or(defaults.line_color),
            show_popup: resolved
                .get("showPopup")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.show_popup),
            line_number: number("lineNumber")
                .map(|n| n as usize)
                .unwrap_or(defaults.line_number),
            geo_field: string("geoField").filter(|field| !field.is_empty()),
            zoom: number("zoom").map(|z| z.round() as i32),
            lat: number("lat"),
            lng: number("lng"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_config() {
        let config = VisConfig::from_value(&json!({}));
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.point_color, "#000000");
        assert_eq!(config.point_radius, 3.0);
        assert_eq!(config.line_color, "#FF0000");
        assert_eq!(config.line_number, 5);
        assert!(!config.show_popup);
        assert!(config.zoom.is_none());
    }

    #[test]
    fn test_malformed_options_fall_back() {
        let config = VisConfig::from_value(&json!({
            "pointColor": 12,
            "pointRadius": "big",
            "lineColor": null,
            "lineNumber": 400,
            "showPopup": "no",
            "zoom": "far",
        }));
        assert_eq!(config.point_color, DEFAULT_POINT_COLOR);
        assert_eq!(config.point_radius, DEFAULT_POINT_RADIUS);
        assert_eq!(config.line_color, DEFAULT_LINE_COLOR);
        assert_eq!(config.line_number, DEFAULT_LINE_NUMBER);
        assert!(!config.show_popup);
        assert!(config.zoom.is_none());
    }

    #[test]
    fn test_valid_options_are_kept() {
        let config = VisConfig::from_value(&json!({
            "pointColor": "#00FF00",
            "pointRadius": 7,
            "lineNumber": 3,
            "showPopup": true,
            "geoField": "store.location",
            "zoom": 5,
            "lat": 10.5,
            "lng": -20.25,
        }));
        assert_eq!(config.point_color, "#00FF00");
        assert_eq!(config.point_radius, 7.0);
        assert_eq!(config.line_number, 3);
        assert!(config.show_popup);
        assert_eq!(config.geo_field.as_deref(), Some("store.location"));
        assert_eq!(config.zoom, Some(5));
        assert_eq!(config.lat, Some(10.5));
        assert_eq!(config.lng, Some(-20.25));
    }

    #[test]
    fn test_empty_geo_field_means_first_non_empty() {
        let config = VisConfig::from_value(&json!({ "geoField": "" }));
        assert!(config.geo_field.is_none());
    }

    #[test]
    fn test_non_object_config_uses_defaults() {
        assert_eq!(VisConfig::from_value(&json!([1, 2])), VisConfig::default());
        assert_eq!(VisConfig::from_value(&Value::Null), VisConfig::default());
    }

    #[test]
    fn test_strict_validation_reports_first_bad_option() {
        let err = VisConfig::validate_value(&json!({ "pointRadius": 0 })).unwrap_err();
        match err {
            MapError::InvalidOption { key, .. } => assert_eq!(key, "pointRadius"),
            other => panic!("unexpected error: {other}"),
        }

        let ok = VisConfig::validate_value(&json!({ "lat": 45.0, "lng": 7.0 })).unwrap();
        assert_eq!(ok.lat, Some(45.0));
    }

    #[test]
    fn test_schema_serializes_in_host_shape() {
        let schema = serde_json::to_value(OptionsSchema::standard()).unwrap();
        assert_eq!(
            schema["pointRadius"],
            json!({
                "type": "number",
                "section": "Style",
                "label": "Point Radius",
                "default": 3.0,
                "display": "range",
                "min": 1.0,
                "max": 20.0,
                "step": 1.0,
            })
        );
        assert_eq!(schema["showPopup"]["type"], "boolean");
        assert!(schema["showPopup"].get("display").is_none());
        assert_eq!(schema["lineColor"]["display"], "color");
        assert_eq!(schema.as_object().unwrap().len(), 9);
    }
}
