//! Layers and the ordered registry that drives them.
//!
//! A [`Layer`] is a unit of per-frame behaviour: it is updated, then asked to
//! render, in the order it was registered. Each layer carries a string
//! identifier that must be unique within a [`LayerRegistry`]; removal goes
//! through that identifier.

use std::fmt::Debug;

use crate::{context::Context, data_structures::ordered_map::OrderedMap, error::LayerError};

pub trait Layer {
    /// Tag used to find and remove the layer. Must not be empty.
    fn identifier(&self) -> &str;

    /// Called once when the window and GPU context become available.
    fn on_show(&mut self, _ctx: &mut Context) {}

    /// Advance state by `dt` seconds.
    fn on_update(&mut self, ctx: &mut Context, dt: f32);

    /// Draw into the main pass. With upscaling on, this pass targets the
    /// fixed-size off-screen image.
    fn on_render(&mut self, ctx: &Context, pass: &mut wgpu::RenderPass<'_>);

    /// Draw straight onto the window before the upscaled image is placed.
    fn on_render_before_unscaled(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {}

    /// Draw straight onto the window on top of the upscaled image.
    fn on_render_after_unscaled(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {}
}

/// Registered layers in insertion order, keyed by a registry-assigned id.
#[derive(Default)]
pub struct LayerRegistry {
    layers: OrderedMap<u32, Box<dyn Layer>>,
    next_id: u32,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `layer` at the end of the order and return its id.
    ///
    /// Ids are never reused, even after removal.
    pub fn add(&mut self, layer: Box<dyn Layer>) -> Result<u32, LayerError> {
        let identifier = layer.identifier();
        if identifier.is_empty() {
            return Err(LayerError::EmptyIdentifier);
        }
        if self.contains(identifier) {
            return Err(LayerError::DuplicateIdentifier(identifier.to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("registering layer '{}' as {}", identifier, id);
        self.layers.push_back(id, layer);
        Ok(id)
    }

    /// Remove the layer tagged `identifier`. The remaining layers keep their order.
    pub fn remove(&mut self, identifier: &str) -> Option<Box<dyn Layer>> {
        let id = self.id_of(identifier)?;
        log::debug!("removing layer '{}'", identifier);
        self.layers.remove(&id)
    }

    pub fn id_of(&self, identifier: &str) -> Option<u32> {
        self.layers
            .iter()
            .find(|(_, layer)| layer.identifier() == identifier)
            .map(|(id, _)| *id)
    }

    pub fn get(&self, identifier: &str) -> Option<&dyn Layer> {
        let id = self.id_of(identifier)?;
        self.layers.get(&id).map(|layer| layer.as_ref())
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut dyn Layer> {
        let id = self.id_of(identifier)?;
        self.layers.get_mut(&id).map(as_layer_mut)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.id_of(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.layers.values().map(|layer| layer.identifier()).collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn Layer> {
        self.layers.values().map(|layer| layer.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut dyn Layer> {
        self.layers.values_mut().map(as_layer_mut)
    }

    /// Call `f` on every layer in registration order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut dyn Layer)) {
        for layer in self.layers.values_mut() {
            f(layer.as_mut());
        }
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}

fn as_layer_mut(layer: &mut Box<dyn Layer>) -> &mut dyn Layer {
    layer.as_mut()
}

impl Debug for LayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.layers.iter().map(|(id, layer)| (id, layer.identifier())))
            .finish()
    }
}
