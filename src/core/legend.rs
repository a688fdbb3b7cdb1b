use crate::core::popup::escape_html;
use crate::domain::model::{BandMap, Color, SeverityBand};
use serde::Serialize;
use std::fmt::Write;

/// Map corner the legend control is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    BottomLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub band: SeverityBand,
    pub label: &'static str,
    pub range: &'static str,
    pub color: Color,
    pub count: usize,
}

impl LegendEntry {
    /// `"<label> (<count>)"`
    pub fn text(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

/// Counts are totals per band at load time, not what is currently visible.
pub fn build_legend(counts: &BandMap<usize>, colors: &BandMap<Color>) -> Legend {
    let entries = SeverityBand::ALL
        .into_iter()
        .map(|band| LegendEntry {
            band,
            label: band.name(),
            range: band.range_label(),
            color: colors[band],
            count: counts[band],
        })
        .collect();

    Legend {
        position: LegendPosition::BottomLeft,
        entries,
    }
}

impl Legend {
    pub fn entry(&self, band: SeverityBand) -> Option<&LegendEntry> {
        self.entries.iter().find(|e| e.band == band)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"info legend\">");
        for entry in &self.entries {
            let _ = write!(
                html,
                "<div class=\"legend-grade\">\
                 <span class=\"legend-label\">{} | {} ({})</span>\
                 <span class=\"legend-color\" style=\"background-color: {};\"></span>\
                 </div>",
                entry.label,
                escape_html(entry.range),
                entry.count,
                entry.color,
            );
        }
        html.push_str("</div>");
        html
    }
}
