use crate::domain::model::EarthquakeFeature;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::{self, Write};

const UTC_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
const UNKNOWN: &str = "unknown";

/// Popup content for one earthquake marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub url: String,
    pub local_time: String,
    pub utc_time: String,
    pub magnitude: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: Option<f64>,
    pub place: Option<String>,
}

/// Local time is rendered in `tz`; the presenter passes `chrono::Local`.
pub fn build_popup<Tz: TimeZone>(quake: &EarthquakeFeature, tz: &Tz) -> Popup
where
    Tz::Offset: fmt::Display,
{
    let timestamp = quake.time_millis.and_then(|millis| {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis);
        if utc.is_none() {
            tracing::debug!("Timestamp {} out of range", millis);
        }
        utc
    });
    let (local_time, utc_time) = match timestamp {
        Some(utc) => (
            utc.with_timezone(tz).format(LOCAL_FORMAT).to_string(),
            utc.format(UTC_FORMAT).to_string(),
        ),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };

    Popup {
        title: quake.title.clone(),
        url: quake.url.clone(),
        local_time,
        utc_time,
        magnitude: format!("{} {}", quake.magnitude, quake.magnitude_type)
            .trim_end()
            .to_string(),
        latitude: quake.latitude,
        longitude: quake.longitude,
        depth_km: quake.depth_km,
        place: quake.place.clone(),
    }
}

impl Popup {
    /// Markup handed to the mapping library. Feed text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<h3 class=\"is-size-6 has-text-weight-semibold\">{}<br>\
             <small class=\"is-size-7 is-link\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\">More info</a></small></h3>\
             <div class=\"table-container mt-3\"><table class=\"table\">",
            escape_html(&self.title),
            escape_html(&self.url),
        );

        let mut row = |label: &str, value: &str| {
            let _ = write!(
                html,
                "<tr><td class=\"has-text-weight-semibold\">{}</td><td>{}</td></tr>",
                label,
                escape_html(value)
            );
        };

        row("Local time", &self.local_time);
        row("UTC time", &self.utc_time);
        row("Magnitude", &self.magnitude);
        row("Latitude", &self.latitude.to_string());
        row("Longitude", &self.longitude.to_string());
        match self.depth_km {
            Some(depth) => row("Depth", &format!("{} km", depth)),
            None => row("Depth", UNKNOWN),
        }
        if let Some(place) = &self.place {
            row("Place", place);
        }

        html.push_str("</table></div>");
        html
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
