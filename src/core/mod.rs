pub mod classify;
pub mod dashboard;
pub mod layers;
pub mod legend;
pub mod popup;
pub mod presenter;

pub use crate::domain::model::{BandMap, EarthquakeFeature, LayerId, SeverityBand};
pub use crate::domain::ports::{ConfigProvider, FeedSource, MapSurface};
pub use crate::utils::error::Result;
