// Adapters layer: concrete implementations of the domain ports (http feeds, map surfaces).

pub mod http;
pub mod surface;

pub use http::HttpFeedClient;
pub use surface::RecordingSurface;
