use crate::core::layers::LayerRef;
use crate::core::legend::Legend;
use crate::domain::model::{LayerId, MapView};
use crate::domain::ports::MapSurface;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    LayerAdded(LayerId),
    LayerRemoved(LayerId),
    LegendAdded,
    LegendRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedLayer {
    /// How many times the layer was added without a removal in between.
    pub copies: usize,
    pub features: usize,
}

/// In-memory surface that remembers what is attached. Adding a layer twice
/// stacks a second copy, the way a naive map widget would.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    view: Option<MapView>,
    layers: HashMap<LayerId, AttachedLayer>,
    legend: Option<Legend>,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&MapView> {
        self.view.as_ref()
    }

    pub fn attached(&self, id: LayerId) -> Option<AttachedLayer> {
        self.layers.get(&id).copied()
    }

    pub fn copies(&self, id: LayerId) -> usize {
        self.layers.get(&id).map_or(0, |layer| layer.copies)
    }

    pub fn attached_count(&self) -> usize {
        self.layers.len()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }
}

impl MapSurface for RecordingSurface {
    fn configure(&mut self, view: &MapView) {
        self.view = Some(view.clone());
    }

    fn add_layer(&mut self, id: LayerId, layer: LayerRef<'_>) {
        let entry = self.layers.entry(id).or_insert(AttachedLayer {
            copies: 0,
            features: 0,
        });
        entry.copies += 1;
        entry.features = layer.feature_count();
        self.events.push(SurfaceEvent::LayerAdded(id));
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
        self.events.push(SurfaceEvent::LayerRemoved(id));
    }

    fn add_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
        self.events.push(SurfaceEvent::LegendAdded);
    }

    fn remove_legend(&mut self) {
        self.legend = None;
        self.events.push(SurfaceEvent::LegendRemoved);
    }
}
