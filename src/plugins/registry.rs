use crate::{plugins::base::VisualizationPlugin, prelude::HashMap, MapError, Result};

/// Visualizations made available to the host, keyed by plugin id
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn VisualizationPlugin>>,
    /// Registration order, which is the order the host lists them in
    order: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::default(),
            order: Vec::new(),
        }
    }

    /// Registers a plugin; ids must be unique
    pub fn add(&mut self, plugin: Box<dyn VisualizationPlugin>) -> Result<()> {
        let id = plugin.id().to_string();
        if self.plugins.contains_key(&id) {
            return Err(MapError::DuplicatePlugin(id));
        }
        log::info!("registered visualization '{}' ({})", id, plugin.label());
        self.order.push(id.clone());
        self.plugins.insert(id, plugin);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn VisualizationPlugin> {
        self.plugins.get(id).map(|p| p.as_ref())
    }

    /// Applies a function to a specific plugin mutably
    pub fn with_plugin_mut<F, R>(&mut self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn VisualizationPlugin) -> R,
    {
        self.plugins.get_mut(id).map(|plugin| f(plugin.as_mut()))
    }

    /// Lists plugin ids in registration order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
