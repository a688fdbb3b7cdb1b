use crate::utils::error::{QuakeMapError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const WEB_SCHEMES: [&str; 2] = ["http", "https"];

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> QuakeMapError {
    QuakeMapError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn web_scheme(field_name: &str, value: &str, scheme: &str) -> Result<()> {
    if WEB_SCHEMES.contains(&scheme) {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            value,
            format!("Expected an http or https URL, got scheme '{}'", scheme),
        ))
    }
}

/// A feed URL must be an absolute web URL naming a document, not a bare host.
pub fn validate_feed_url(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Feed URL cannot be empty"));
    }

    let url = Url::parse(value)
        .map_err(|e| invalid(field_name, value, format!("Not an absolute URL: {}", e)))?;
    web_scheme(field_name, value, url.scheme())?;

    if url.path() == "/" {
        return Err(invalid(
            field_name,
            value,
            "Feed URL must point to a GeoJSON document",
        ));
    }
    Ok(())
}

/// Tile URLs are templates (`{s}`, `{z}`, ...) that `Url` would mangle, so
/// only the scheme prefix is checked.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    let scheme = template.split_once("://").map_or("", |(scheme, _)| scheme);
    web_scheme(field_name, template, scheme)
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_accepts_documents() {
        let field = "feeds.earthquakes_url";
        assert!(validate_feed_url(field, "https://example.com/all_month.geojson").is_ok());
        assert!(validate_feed_url(field, "http://127.0.0.1:8080/plates.json").is_ok());
    }

    #[test]
    fn test_feed_url_rejections_name_the_problem() {
        let reason = |value: &str| match validate_feed_url("feeds.plates_url", value) {
            Err(QuakeMapError::InvalidConfigValueError { field, reason, .. }) => {
                assert_eq!(field, "feeds.plates_url");
                reason
            }
            other => panic!("expected invalid config value, got {:?}", other),
        };

        assert_eq!(reason("  "), "Feed URL cannot be empty");
        assert!(reason("invalid-url").starts_with("Not an absolute URL"));
        assert!(reason("ftp://example.com/plates.json").contains("'ftp'"));
        assert_eq!(reason("https://example.com"), "Feed URL must point to a GeoJSON document");
    }

    #[test]
    fn test_validate_url_template() {
        assert!(validate_url_template(
            "map.tile_url",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
        )
        .is_ok());
        assert!(validate_url_template("map.tile_url", "tiles/{z}/{x}/{y}.png").is_err());
        assert!(validate_url_template("map.tile_url", "file://{z}/{x}/{y}.png").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("map.zoom", 3u8, 1, 18).is_ok());
        assert!(validate_range("map.zoom", 0u8, 1, 18).is_err());
        assert!(validate_range("map.zoom", 19u8, 1, 18).is_err());
    }
}
