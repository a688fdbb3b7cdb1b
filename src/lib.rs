pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{HttpFeedClient, RecordingSurface};
pub use crate::config::DashboardConfig;
pub use crate::core::{dashboard::Dashboard, presenter::MapPresenter};
pub use crate::domain::model::{LayerId, SeverityBand};
pub use crate::utils::error::{QuakeMapError, Result};
