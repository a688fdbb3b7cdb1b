use crate::core::layers::LayerRef;
use crate::core::legend::Legend;
use crate::domain::model::{LayerId, MapView};
use crate::utils::error::Result;
use async_trait::async_trait;
use geojson::FeatureCollection;

pub trait ConfigProvider: Send + Sync {
    fn earthquakes_url(&self) -> &str;
    fn plates_url(&self) -> &str;
    fn map_view(&self) -> &MapView;
}

/// Read-only access to the two GeoJSON feeds. Each call is an independent request.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_earthquakes(&self) -> Result<FeatureCollection>;
    async fn fetch_plate_boundaries(&self) -> Result<FeatureCollection>;
}

/// The drawing side of the dashboard, typically a thin wrapper over a web map.
/// The presenter only calls `add_layer` for layers that are not attached.
pub trait MapSurface {
    fn configure(&mut self, view: &MapView);
    fn add_layer(&mut self, id: LayerId, layer: LayerRef<'_>);
    fn remove_layer(&mut self, id: LayerId);
    fn add_legend(&mut self, legend: &Legend);
    fn remove_legend(&mut self);
}
