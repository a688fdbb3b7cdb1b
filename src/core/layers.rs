use crate::core::classify::{classify, color, marker_radius};
use crate::core::popup::{build_popup, Popup};
use crate::domain::model::{BandMap, Color, EarthquakeFeature, PLATES_PANE};
use crate::utils::error::QuakeMapError;
use chrono::TimeZone;
use geojson::FeatureCollection;
use serde::Serialize;
use std::fmt;

const MARKER_STROKE: Color = Color::new("#383838");
const MARKER_WEIGHT: f64 = 1.0;
const MARKER_FILL_OPACITY: f64 = 0.8;

const BOUNDARY_COLOR: Color = Color::new("#304ffe");
const BOUNDARY_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub weight: f64,
    pub color: Color,
    pub fill_color: Color,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn for_magnitude(magnitude: f64) -> Self {
        Self {
            radius: marker_radius(magnitude),
            weight: MARKER_WEIGHT,
            color: MARKER_STROKE,
            fill_color: color(magnitude),
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }
}

/// A circle marker with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub feature: EarthquakeFeature,
    pub style: MarkerStyle,
    pub popup: Popup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandLayer {
    pub markers: Vec<Marker>,
    pub visible: bool,
}

/// Six magnitude-banded layers built from one earthquake fetch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayerCollection {
    pub bands: BandMap<BandLayer>,
}

/// Splits features into their severity bands, keeping feed order within a band.
pub fn partition(features: Vec<EarthquakeFeature>) -> BandMap<Vec<EarthquakeFeature>> {
    let mut bands: BandMap<Vec<EarthquakeFeature>> = BandMap::default();
    for feature in features {
        bands[classify(feature.magnitude)].push(feature);
    }
    bands
}

/// Decodes every feature, collecting the ones without a usable magnitude or point.
pub fn decode_earthquakes(
    collection: &FeatureCollection,
) -> (Vec<EarthquakeFeature>, Vec<QuakeMapError>) {
    let mut quakes = Vec::with_capacity(collection.features.len());
    let mut rejected = Vec::new();

    for feature in &collection.features {
        match EarthquakeFeature::try_from(feature) {
            Ok(quake) => quakes.push(quake),
            Err(e) => rejected.push(e),
        }
    }

    (quakes, rejected)
}

impl LayerCollection {
    pub fn build<Tz: TimeZone>(features: Vec<EarthquakeFeature>, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let partitioned = partition(features);
        let mut bands: BandMap<BandLayer> = BandMap::default();

        for ((_, layer), (band, quakes)) in bands.iter_mut().zip(partitioned.iter()) {
            layer.markers = quakes
                .iter()
                .map(|quake| Marker {
                    style: MarkerStyle::for_magnitude(quake.magnitude),
                    popup: build_popup(quake, tz),
                    feature: quake.clone(),
                })
                .collect();
            layer.visible = false;
            tracing::debug!("Built {} layer with {} markers", band, layer.markers.len());
        }

        Self { bands }
    }

    pub fn counts(&self) -> BandMap<usize> {
        self.bands.map(|_, layer| layer.markers.len())
    }

    pub fn total(&self) -> usize {
        self.bands.values().map(|layer| layer.markers.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryStyle {
    pub weight: f64,
    pub color: Color,
    pub pane: &'static str,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            weight: BOUNDARY_WEIGHT,
            color: BOUNDARY_COLOR,
            pane: PLATES_PANE,
        }
    }
}

/// One plate-boundary segment as `[lon, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundaryLayer {
    pub lines: Vec<Polyline>,
    pub style: BoundaryStyle,
    pub visible: bool,
}

impl BoundaryLayer {
    pub fn build(collection: &FeatureCollection) -> Self {
        let mut lines = Vec::new();

        for feature in &collection.features {
            let name = feature
                .property("Name")
                .or_else(|| feature.property("name"))
                .and_then(|v| v.as_str())
                .map(str::to_string);

            match feature.geometry.as_ref().map(|g| &g.value) {
                Some(geojson::Value::LineString(coords)) => lines.push(Polyline {
                    name,
                    points: to_points(coords),
                }),
                Some(geojson::Value::MultiLineString(parts)) => {
                    lines.extend(parts.iter().map(|coords| Polyline {
                        name: name.clone(),
                        points: to_points(coords),
                    }));
                }
                _ => {
                    tracing::debug!("Skipping non-line boundary feature {:?}", name);
                }
            }
        }

        Self {
            lines,
            style: BoundaryStyle::default(),
            visible: false,
        }
    }

    pub fn as_layer_ref(&self) -> LayerRef<'_> {
        LayerRef::Lines {
            lines: &self.lines,
            style: &self.style,
        }
    }
}

fn to_points(coords: &[Vec<f64>]) -> Vec<[f64; 2]> {
    coords
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| [position[0], position[1]])
        .collect()
}

/// Borrowed view of a layer handed to the map surface.
#[derive(Debug, Clone, Copy)]
pub enum LayerRef<'a> {
    Markers(&'a [Marker]),
    Lines {
        lines: &'a [Polyline],
        style: &'a BoundaryStyle,
    },
}

impl LayerRef<'_> {
    pub fn feature_count(&self) -> usize {
        match self {
            LayerRef::Markers(markers) => markers.len(),
            LayerRef::Lines { lines, .. } => lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SeverityBand;
    use chrono::Utc;
    use serde_json::json;

    fn quake(magnitude: f64) -> EarthquakeFeature {
        EarthquakeFeature {
            id: None,
            magnitude,
            magnitude_type: "ml".to_string(),
            title: format!("M {}", magnitude),
            place: None,
            time_millis: None,
            url: String::new(),
            longitude: 0.0,
            latitude: 0.0,
            depth_km: Some(5.0),
        }
    }

    #[test]
    fn test_partition_keeps_every_feature() {
        let magnitudes = [-0.5, 0.0, 1.2, 3.99, 4.0, 4.5, 5.5, 6.0, 6.9, 7.1, 8.0, 9.5];
        let features: Vec<_> = magnitudes.iter().map(|m| quake(*m)).collect();

        let bands = partition(features);

        let total: usize = bands.values().map(Vec::len).sum();
        assert_eq!(total, magnitudes.len());
        assert_eq!(bands[SeverityBand::Minor].len(), 4);
        assert_eq!(bands[SeverityBand::Light].len(), 2);
        assert_eq!(bands[SeverityBand::Moderate].len(), 1);
        assert_eq!(bands[SeverityBand::Strong].len(), 2);
        assert_eq!(bands[SeverityBand::Major].len(), 1);
        assert_eq!(bands[SeverityBand::Great].len(), 2);
        for (band, quakes) in bands.iter() {
            assert!(quakes.iter().all(|q| band.contains(q.magnitude)));
        }
    }

    #[test]
    fn test_marker_style_follows_magnitude() {
        let collection = LayerCollection::build(vec![quake(6.2)], &Utc);
        let marker = &collection.bands[SeverityBand::Strong].markers[0];

        assert_eq!(marker.style.radius, 6.2 * 1.5);
        assert_eq!(marker.style.fill_color.hex(), "#e64a19");
        assert_eq!(marker.style.color.hex(), "#383838");
        assert_eq!(marker.style.weight, 1.0);
        assert_eq!(marker.style.fill_opacity, 0.8);
        assert_eq!(marker.popup.magnitude, "6.2 ml");
    }

    #[test]
    fn test_counts_match_scenario() {
        let collection =
            LayerCollection::build(vec![quake(2.1), quake(4.5), quake(9.0)], &Utc);
        let counts = collection.counts();

        assert_eq!(counts[SeverityBand::Minor], 1);
        assert_eq!(counts[SeverityBand::Light], 1);
        assert_eq!(counts[SeverityBand::Moderate], 0);
        assert_eq!(counts[SeverityBand::Strong], 0);
        assert_eq!(counts[SeverityBand::Major], 0);
        assert_eq!(counts[SeverityBand::Great], 1);
        assert_eq!(collection.total(), 3);
    }

    #[test]
    fn test_decode_skips_features_without_magnitude() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "mag": 3.1 },
                    "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] }
                },
                {
                    "type": "Feature",
                    "id": "nomag",
                    "properties": { "mag": null },
                    "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] }
                }
            ]
        }))
        .unwrap();

        let (quakes, rejected) = decode_earthquakes(&collection);
        assert_eq!(quakes.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].to_string().contains("nomag"));
    }

    #[test]
    fn test_boundary_layer_flattens_multilines() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "Name": "AF-AN" },
                    "geometry": { "type": "LineString", "coordinates": [[-0.4, -54.8], [0.0, -54.6]] }
                },
                {
                    "type": "Feature",
                    "properties": { "Name": "PA-NA" },
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[1.0, 1.0], [2.0, 2.0]], [[3.0, 3.0], [4.0, 4.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
                }
            ]
        }))
        .unwrap();

        let layer = BoundaryLayer::build(&collection);
        assert_eq!(layer.lines.len(), 3);
        assert_eq!(layer.lines[0].name.as_deref(), Some("AF-AN"));
        assert_eq!(layer.lines[0].points, vec![[-0.4, -54.8], [0.0, -54.6]]);
        assert_eq!(layer.lines[2].name.as_deref(), Some("PA-NA"));
        assert_eq!(layer.style.color.hex(), "#304ffe");
        assert_eq!(layer.style.pane, "plates");
    }
}
