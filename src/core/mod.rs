pub mod enrichment;
pub mod node_builder;
pub mod pipeline;
pub mod proximity;
pub mod ranker;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Coordinate, DomainNode, PlaceDetails, PlaceId, SearchReport};
pub use crate::domain::ports::{ConfigProvider, MarkerSurface, PlacesProvider};
pub use crate::utils::error::Result;
