#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::MapView;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_feed_url, validate_range, validate_url_template, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson";
pub const DEFAULT_PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedsConfig {
    pub earthquakes_url: String,
    pub plates_url: String,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            earthquakes_url: DEFAULT_EARTHQUAKES_URL.to_string(),
            plates_url: DEFAULT_PLATES_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub feeds: FeedsConfig,
    pub map: MapView,
}

impl DashboardConfig {
    pub fn with_urls(earthquakes_url: String, plates_url: String) -> Self {
        Self {
            feeds: FeedsConfig {
                earthquakes_url,
                plates_url,
            },
            map: MapView::default(),
        }
    }
}

impl ConfigProvider for DashboardConfig {
    fn earthquakes_url(&self) -> &str {
        &self.feeds.earthquakes_url
    }

    fn plates_url(&self) -> &str {
        &self.feeds.plates_url
    }

    fn map_view(&self) -> &MapView {
        &self.map
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validate_feed_url("feeds.earthquakes_url", &self.feeds.earthquakes_url)?;
        validate_feed_url("feeds.plates_url", &self.feeds.plates_url)?;
        validate_url_template("map.tile_url", &self.map.tile_url)?;

        validate_range("map.min_zoom", self.map.min_zoom, 0, self.map.max_zoom)?;
        validate_range("map.zoom", self.map.zoom, self.map.min_zoom, self.map.max_zoom)?;
        validate_range("map.center[0]", self.map.center[0], -90.0, 90.0)?;
        validate_range("map.center[1]", self.map.center[1], -180.0, 180.0)?;
        Ok(())
    }
}
