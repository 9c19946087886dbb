pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{GooglePlacesClient, MarkerCollector, ProviderSettings};
pub use crate::core::enrichment::EnrichmentCache;
pub use crate::core::pipeline::SearchPipeline;
pub use domain::model::{Coordinate, DomainNode, PlaceDetails, PlaceId, SearchReport};
pub use domain::ports::{AnchorStrategy, ConfigProvider, MarkerSurface, PlacesProvider};
pub use utils::error::{Result, SearchError};
