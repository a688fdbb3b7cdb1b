use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeMapError {
    #[error("Network error while fetching {url}: {message}")]
    NetworkError { url: String, message: String },

    #[error("Failed to decode GeoJSON from {url}: {message}")]
    DecodeError { url: String, message: String },

    #[error("Cannot classify feature {feature}: {reason}")]
    ClassificationError { feature: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl QuakeMapError {
    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        Self::NetworkError {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        Self::DecodeError {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Short message meant for the person running the shell.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError { url, .. } => format!("Could not reach feed at {}", url),
            Self::DecodeError { url, .. } => {
                format!("Feed at {} did not return a GeoJSON FeatureCollection", url)
            }
            Self::ClassificationError { feature, .. } => {
                format!("Earthquake {} has no usable magnitude and was skipped", feature)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("Could not serialize output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NetworkError { .. } => "Check your network connection and the feed URL, then reload",
            Self::DecodeError { .. } => "Make sure the URL points to a GeoJSON FeatureCollection",
            Self::ClassificationError { .. } => "No action needed; the feature is excluded from all layers",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuakeMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message_names_url() {
        let err = QuakeMapError::network("https://example.com/feed", "connection refused");
        assert_eq!(
            err.to_string(),
            "Network error while fetching https://example.com/feed: connection refused"
        );
        assert!(err.user_friendly_message().contains("https://example.com/feed"));
    }

    #[test]
    fn test_classification_error_is_not_fatal_hint() {
        let err = QuakeMapError::ClassificationError {
            feature: "us7000abcd".to_string(),
            reason: "missing magnitude".to_string(),
        };
        assert!(err.recovery_suggestion().contains("excluded"));
    }
}
