use crate::{
    core::{config::OptionsSchema, geo::LatLng},
    data::row::Row,
    input::events::MapEvent,
    Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query metadata the host passes alongside rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Field descriptions, as the host's query engine reports them
    #[serde(default)]
    pub fields: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The contract a dashboard host uses to drive a visualization
pub trait VisualizationPlugin {
    /// Stable identifier the host registers the plugin under
    fn id(&self) -> &str;

    /// Human-readable name shown in the host's picker
    fn label(&self) -> &str;

    /// Option declarations the host renders as a settings panel
    fn options(&self) -> &OptionsSchema;

    /// Called once, before any data arrives
    fn create(&mut self, container: &str, config: &Value) -> Result<()>;

    /// Called on every data or configuration change
    fn update(
        &mut self,
        rows: &[Row],
        container: &str,
        config: &Value,
        query: &QueryResponse,
    ) -> Result<()>;

    /// Widget events, delivered independently of `update`
    fn handle_event(&mut self, _event: &MapEvent) -> Result<()> {
        Ok(())
    }

    /// Popup body for the marker at `position`, when popups are enabled
    fn popup_content(&self, _position: &LatLng) -> Option<String> {
        None
    }
}
