use crate::utils::error::QuakeMapError;
use geojson::feature::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Magnitude-based severity bucket. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityBand {
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
    Great,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 6] = [
        SeverityBand::Minor,
        SeverityBand::Light,
        SeverityBand::Moderate,
        SeverityBand::Strong,
        SeverityBand::Major,
        SeverityBand::Great,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SeverityBand::Minor => "Minor",
            SeverityBand::Light => "Light",
            SeverityBand::Moderate => "Moderate",
            SeverityBand::Strong => "Strong",
            SeverityBand::Major => "Major",
            SeverityBand::Great => "Great",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            SeverityBand::Minor => "M < 4",
            SeverityBand::Light => "M 4-5",
            SeverityBand::Moderate => "M 5-6",
            SeverityBand::Strong => "M 6-7",
            SeverityBand::Major => "M 7-8",
            SeverityBand::Great => "M >= 8",
        }
    }

    /// `None` for Minor, which is unbounded below.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            SeverityBand::Minor => None,
            SeverityBand::Light => Some(4.0),
            SeverityBand::Moderate => Some(5.0),
            SeverityBand::Strong => Some(6.0),
            SeverityBand::Major => Some(7.0),
            SeverityBand::Great => Some(8.0),
        }
    }

    /// `None` for Great, which is unbounded above.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            SeverityBand::Great => None,
            band => SeverityBand::ALL[band.index() + 1].lower_bound(),
        }
    }

    /// NaN compares below every bound, so it lands in Minor like any other
    /// magnitude under 4.
    pub fn contains(self, magnitude: f64) -> bool {
        if magnitude.is_nan() {
            return self == SeverityBand::Minor;
        }
        let above_lower = self.lower_bound().map_or(true, |lo| magnitude >= lo);
        let below_upper = self.upper_bound().map_or(true, |hi| magnitude < hi);
        above_lower && below_upper
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per severity band, iterated Minor to Great.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BandMap<T>([T; 6]);

impl<T> BandMap<T> {
    pub fn from_fn(mut f: impl FnMut(SeverityBand) -> T) -> Self {
        Self(SeverityBand::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeverityBand, &T)> {
        SeverityBand::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SeverityBand, &mut T)> {
        SeverityBand::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(SeverityBand, &T) -> U) -> BandMap<U> {
        BandMap::from_fn(|band| f(band, &self.0[band.index()]))
    }
}

impl<T> Index<SeverityBand> for BandMap<T> {
    type Output = T;

    fn index(&self, band: SeverityBand) -> &T {
        &self.0[band.index()]
    }
}

impl<T> IndexMut<SeverityBand> for BandMap<T> {
    fn index_mut(&mut self, band: SeverityBand) -> &mut T {
        &mut self.0[band.index()]
    }
}

/// Hex colour understood by the mapping library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn hex(&self) -> &'static str {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self("#000000")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayerId {
    Earthquakes(SeverityBand),
    PlateBoundaries,
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerId::Earthquakes(band) => write!(f, "earthquakes:{}", band.name().to_lowercase()),
            LayerId::PlateBoundaries => f.write_str("plate-boundaries"),
        }
    }
}

impl std::str::FromStr for LayerId {
    type Err = QuakeMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "plates" || name == "plate-boundaries" {
            return Ok(LayerId::PlateBoundaries);
        }
        SeverityBand::ALL
            .into_iter()
            .find(|band| band.name().eq_ignore_ascii_case(&name))
            .map(LayerId::Earthquakes)
            .ok_or_else(|| QuakeMapError::InvalidConfigValueError {
                field: "layer".to_string(),
                value: s.to_string(),
                reason: "Expected a band name (minor..great) or 'plates'".to_string(),
            })
    }
}

/// A single earthquake event decoded from the summary feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub magnitude: f64,
    pub magnitude_type: String,
    pub title: String,
    pub place: Option<String>,
    /// Event time in epoch milliseconds; `None` when the feed omits it.
    pub time_millis: Option<i64>,
    pub url: String,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: Option<f64>,
}

impl EarthquakeFeature {
    /// Accepts integral floats such as `1.7e12` as well as plain integers.
    fn epoch_millis(value: &serde_json::Value) -> Option<i64> {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    fn display_id(feature: &geojson::Feature) -> String {
        match &feature.id {
            Some(Id::String(s)) => s.clone(),
            Some(Id::Number(n)) => n.to_string(),
            None => feature
                .property("title")
                .and_then(|v| v.as_str())
                .unwrap_or("<unnamed>")
                .to_string(),
        }
    }
}

impl TryFrom<&geojson::Feature> for EarthquakeFeature {
    type Error = QuakeMapError;

    fn try_from(feature: &geojson::Feature) -> Result<Self, Self::Error> {
        let reject = |reason: &str| QuakeMapError::ClassificationError {
            feature: Self::display_id(feature),
            reason: reason.to_string(),
        };

        let magnitude = match feature.property("mag") {
            None | Some(serde_json::Value::Null) => return Err(reject("missing magnitude")),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| reject("magnitude is not a number"))?,
        };

        let coordinates = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(position)) if position.len() >= 2 => position,
            Some(_) => return Err(reject("geometry is not a point")),
            None => return Err(reject("missing geometry")),
        };

        let text = |key: &str| {
            feature
                .property(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Ok(Self {
            id: feature.id.as_ref().map(|_| Self::display_id(feature)),
            magnitude,
            magnitude_type: text("magType").unwrap_or_default(),
            title: text("title").unwrap_or_default(),
            place: text("place").filter(|p| !p.is_empty()),
            time_millis: feature.property("time").and_then(Self::epoch_millis),
            url: text("url").unwrap_or_default(),
            longitude: coordinates[0],
            latitude: coordinates[1],
            depth_km: coordinates.get(2).copied(),
        })
    }
}

/// Initial viewport and base tiles for the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub world_copy_jump: bool,
    pub tile_url: String,
    pub attribution: String,
    pub panes: Vec<String>,
}

pub const PLATES_PANE: &str = "plates";

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: 3,
            min_zoom: 1,
            max_zoom: 18,
            world_copy_jump: true,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                .to_string(),
            panes: vec![PLATES_PANE.to_string()],
        }
    }
}
