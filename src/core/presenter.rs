use crate::core::classify::band_colors;
use crate::core::layers::{decode_earthquakes, BoundaryLayer, LayerCollection, LayerRef};
use crate::core::legend::{build_legend, Legend};
use crate::domain::model::{BandMap, LayerId, MapView, SeverityBand};
use crate::domain::ports::MapSurface;
use chrono::Local;
use geojson::FeatureCollection;

/// Outcome of turning one earthquake fetch into layers.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeLoad {
    pub counts: BandMap<usize>,
    pub rejected: usize,
}

/// Owns the map surface, every layer and the legend for one view session.
pub struct MapPresenter<S: MapSurface> {
    surface: S,
    earthquakes: Option<LayerCollection>,
    boundaries: Option<BoundaryLayer>,
    legend: Option<Legend>,
}

impl<S: MapSurface> MapPresenter<S> {
    pub fn new(mut surface: S, view: &MapView) -> Self {
        surface.configure(view);
        Self {
            surface,
            earthquakes: None,
            boundaries: None,
            legend: None,
        }
    }

    /// Rebuilds the six band layers and the legend from a decoded feed.
    pub fn load_earthquakes(&mut self, collection: &FeatureCollection) -> EarthquakeLoad {
        self.clear_earthquakes();

        let (quakes, rejected) = decode_earthquakes(collection);
        for err in &rejected {
            tracing::warn!("Excluding feature: {}", err);
        }

        let mut layers = LayerCollection::build(quakes, &Local);
        for (band, layer) in layers.bands.iter_mut() {
            self.surface
                .add_layer(LayerId::Earthquakes(band), LayerRef::Markers(&layer.markers));
            layer.visible = true;
        }

        let counts = layers.counts();
        let legend = build_legend(&counts, &band_colors());
        self.surface.add_legend(&legend);

        tracing::info!(
            "Loaded {} earthquakes ({} excluded)",
            layers.total(),
            rejected.len()
        );

        self.earthquakes = Some(layers);
        self.legend = Some(legend);

        EarthquakeLoad {
            counts,
            rejected: rejected.len(),
        }
    }

    pub fn load_plate_boundaries(&mut self, collection: &FeatureCollection) -> usize {
        if let Some(old) = self.boundaries.take() {
            if old.visible {
                self.surface.remove_layer(LayerId::PlateBoundaries);
            }
        }

        let mut layer = BoundaryLayer::build(collection);
        self.surface
            .add_layer(LayerId::PlateBoundaries, layer.as_layer_ref());
        layer.visible = true;

        let count = layer.lines.len();
        tracing::info!("Loaded {} plate boundary segments", count);
        self.boundaries = Some(layer);
        count
    }

    fn clear_earthquakes(&mut self) {
        if let Some(old) = self.earthquakes.take() {
            for (band, layer) in old.bands.iter() {
                if layer.visible {
                    self.surface.remove_layer(LayerId::Earthquakes(band));
                }
            }
        }
        if self.legend.take().is_some() {
            self.surface.remove_legend();
        }
    }

    /// Returns `true` when the layer actually changed state. Layers that were
    /// never built are left alone.
    pub fn set_visible(&mut self, id: LayerId, show: bool) -> bool {
        let (visible, layer) = match id {
            LayerId::Earthquakes(band) => match self.earthquakes.as_mut() {
                Some(layers) => {
                    let band_layer = &mut layers.bands[band];
                    (&mut band_layer.visible, LayerRef::Markers(&band_layer.markers))
                }
                None => {
                    tracing::debug!("Toggle for {} ignored: earthquakes not loaded", id);
                    return false;
                }
            },
            LayerId::PlateBoundaries => match self.boundaries.as_mut() {
                Some(boundary) => (
                    &mut boundary.visible,
                    LayerRef::Lines {
                        lines: &boundary.lines,
                        style: &boundary.style,
                    },
                ),
                None => {
                    tracing::debug!("Toggle for {} ignored: boundaries not loaded", id);
                    return false;
                }
            },
        };

        if *visible == show {
            return false;
        }
        if show {
            self.surface.add_layer(id, layer);
        } else {
            self.surface.remove_layer(id);
        }
        *visible = show;

        tracing::debug!("{} is now {}", id, if show { "shown" } else { "hidden" });
        true
    }

    pub fn show_band(&mut self, band: SeverityBand, show: bool) -> bool {
        self.set_visible(LayerId::Earthquakes(band), show)
    }

    pub fn show_plates(&mut self, show: bool) -> bool {
        self.set_visible(LayerId::PlateBoundaries, show)
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        match id {
            LayerId::Earthquakes(band) => self
                .earthquakes
                .as_ref()
                .is_some_and(|layers| layers.bands[band].visible),
            LayerId::PlateBoundaries => self.boundaries.as_ref().is_some_and(|l| l.visible),
        }
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn earthquake_layers(&self) -> Option<&LayerCollection> {
        self.earthquakes.as_ref()
    }

    pub fn boundary_layer(&self) -> Option<&BoundaryLayer> {
        self.boundaries.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
