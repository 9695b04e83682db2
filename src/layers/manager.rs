use crate::{
    layers::base::{Layer, LayerHandle, LayerRole},
    traits::MapAdapter,
    Result,
};

use crate::prelude::HashMap;

/// Tracks the live layer for each role and enforces remove-before-add
pub struct LayerManager {
    /// Live layer handles indexed by role
    active: HashMap<LayerRole, LayerHandle>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            active: HashMap::default(),
        }
    }

    /// Replaces the layer for `layer.role()`.
    ///
    /// The previous layer of the same role is unregistered before the new one
    /// is added, so two layers of one role are never live at once.
    pub fn replace<M>(&mut self, map: &mut M, layer: Layer) -> Result<LayerHandle>
    where
        M: MapAdapter + ?Sized,
    {
        let role = layer.role();
        self.remove(map, role)?;

        let primitives = layer.len();
        let handle = map.add_layer(layer)?;
        self.active.insert(role, handle);
        log::debug!("added {} layer {} ({} primitives)", role, handle, primitives);
        Ok(handle)
    }

    /// Removes the live layer for `role`, returning whether one existed
    pub fn remove<M>(&mut self, map: &mut M, role: LayerRole) -> Result<bool>
    where
        M: MapAdapter + ?Sized,
    {
        match self.active.remove(&role) {
            Some(handle) => {
                map.remove_layer(handle)?;
                log::debug!("removed {} layer {}", role, handle);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes every live layer
    pub fn clear<M>(&mut self, map: &mut M) -> Result<()>
    where
        M: MapAdapter + ?Sized,
    {
        for role in [LayerRole::Lines, LayerRole::Points, LayerRole::Tile] {
            self.remove(map, role)?;
        }
        Ok(())
    }

    /// Gets the live handle for a role
    pub fn handle(&self, role: LayerRole) -> Option<LayerHandle> {
        self.active.get(&role).copied()
    }

    pub fn is_active(&self, role: LayerRole) -> bool {
        self.active.contains_key(&role)
    }

    /// Gets the number of live layers
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
