use crate::domain::model::{BandMap, Color, SeverityBand};

const MINOR_COLOR: Color = Color::new("#fff263");
const LIGHT_COLOR: Color = Color::new("#fbc02d");
const MODERATE_COLOR: Color = Color::new("#ff7d47");
const STRONG_COLOR: Color = Color::new("#e64a19");
const MAJOR_COLOR: Color = Color::new("#b71c1c");
const GREAT_COLOR: Color = Color::new("#7f0000");

pub const RADIUS_PER_MAGNITUDE: f64 = 1.5;

/// Maps a magnitude to its severity band. NaN falls through to `Minor`.
pub fn classify(magnitude: f64) -> SeverityBand {
    if magnitude >= 8.0 {
        SeverityBand::Great
    } else if magnitude >= 7.0 {
        SeverityBand::Major
    } else if magnitude >= 6.0 {
        SeverityBand::Strong
    } else if magnitude >= 5.0 {
        SeverityBand::Moderate
    } else if magnitude >= 4.0 {
        SeverityBand::Light
    } else {
        SeverityBand::Minor
    }
}

pub fn band_color(band: SeverityBand) -> Color {
    match band {
        SeverityBand::Minor => MINOR_COLOR,
        SeverityBand::Light => LIGHT_COLOR,
        SeverityBand::Moderate => MODERATE_COLOR,
        SeverityBand::Strong => STRONG_COLOR,
        SeverityBand::Major => MAJOR_COLOR,
        SeverityBand::Great => GREAT_COLOR,
    }
}

pub fn color(magnitude: f64) -> Color {
    band_color(classify(magnitude))
}

pub fn band_colors() -> BandMap<Color> {
    BandMap::from_fn(band_color)
}

pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}
