use crate::core::presenter::{EarthquakeLoad, MapPresenter};
use crate::domain::model::MapView;
use crate::domain::ports::{FeedSource, MapSurface};
use crate::utils::error::Result;

/// What each of the two fetches produced for this session.
#[derive(Debug)]
pub struct LoadReport {
    pub earthquakes: Result<EarthquakeLoad>,
    pub plate_boundaries: Result<usize>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.earthquakes.is_ok() && self.plate_boundaries.is_ok()
    }
}

/// One view session: fetches both feeds once and feeds the presenter.
pub struct Dashboard<F: FeedSource, S: MapSurface> {
    feeds: F,
    presenter: MapPresenter<S>,
}

impl<F: FeedSource, S: MapSurface> Dashboard<F, S> {
    pub fn new(feeds: F, surface: S, view: &MapView) -> Self {
        Self {
            feeds,
            presenter: MapPresenter::new(surface, view),
        }
    }

    /// Both requests run concurrently; a failure only leaves its own layers absent.
    pub async fn load(&mut self) -> LoadReport {
        tracing::info!("Fetching earthquake and plate boundary feeds");
        let (quakes, plates) = tokio::join!(
            self.feeds.fetch_earthquakes(),
            self.feeds.fetch_plate_boundaries()
        );

        let earthquakes = match quakes {
            Ok(collection) => Ok(self.presenter.load_earthquakes(&collection)),
            Err(e) => {
                tracing::error!("❌ Earthquake feed failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Err(e)
            }
        };

        let plate_boundaries = match plates {
            Ok(collection) => Ok(self.presenter.load_plate_boundaries(&collection)),
            Err(e) => {
                tracing::error!("❌ Plate boundary feed failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Err(e)
            }
        };

        LoadReport {
            earthquakes,
            plate_boundaries,
        }
    }

    pub fn presenter(&self) -> &MapPresenter<S> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut MapPresenter<S> {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingSurface;
    use crate::domain::model::{LayerId, SeverityBand};
    use crate::utils::error::QuakeMapError;
    use async_trait::async_trait;
    use geojson::FeatureCollection;
    use serde_json::json;

    struct StubFeeds {
        quakes: Option<serde_json::Value>,
        plates: Option<serde_json::Value>,
    }

    fn collection(value: &Option<serde_json::Value>, url: &str) -> Result<FeatureCollection> {
        match value {
            Some(v) => Ok(serde_json::from_value(v.clone())?),
            None => Err(QuakeMapError::network(url, "connection refused")),
        }
    }

    #[async_trait]
    impl FeedSource for StubFeeds {
        async fn fetch_earthquakes(&self) -> Result<FeatureCollection> {
            collection(&self.quakes, "stub://quakes")
        }

        async fn fetch_plate_boundaries(&self) -> Result<FeatureCollection> {
            collection(&self.plates, "stub://plates")
        }
    }

    fn quake_feed(mags: &[f64]) -> serde_json::Value {
        let features: Vec<_> = mags
            .iter()
            .map(|m| {
                json!({
                    "type": "Feature",
                    "properties": { "mag": m, "magType": "ml", "title": format!("M {}", m), "time": 0 },
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0, 1.0] }
                })
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features })
    }

    #[test]
    fn test_both_feeds_fail_leaves_empty_map() {
        let feeds = StubFeeds {
            quakes: None,
            plates: None,
        };
        let mut dashboard = Dashboard::new(feeds, RecordingSurface::new(), &MapView::default());

        let report = tokio_test::block_on(dashboard.load());

        assert!(report.earthquakes.is_err());
        assert!(report.plate_boundaries.is_err());
        assert!(!report.is_complete());
        assert!(dashboard.presenter().legend().is_none());
        assert_eq!(dashboard.presenter().surface().attached_count(), 0);
        assert!(!dashboard.presenter_mut().show_band(SeverityBand::Minor, true));
    }

    #[test]
    fn test_plate_failure_keeps_earthquake_layers() {
        let feeds = StubFeeds {
            quakes: Some(quake_feed(&[2.1, 4.5, 9.0])),
            plates: None,
        };
        let mut dashboard = Dashboard::new(feeds, RecordingSurface::new(), &MapView::default());

        let report = tokio_test::block_on(dashboard.load());

        let load = report.earthquakes.as_ref().unwrap();
        assert_eq!(load.counts[SeverityBand::Great], 1);
        assert!(matches!(
            report.plate_boundaries,
            Err(QuakeMapError::NetworkError { .. })
        ));

        let presenter = dashboard.presenter_mut();
        assert!(!presenter.show_plates(false));
        assert!(!presenter.show_plates(true));
        assert!(!presenter.is_visible(LayerId::PlateBoundaries));
        assert_eq!(presenter.surface().attached_count(), 6);
        assert!(presenter.surface().legend().is_some());
    }
}
