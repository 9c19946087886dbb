// Adapters layer: concrete implementations of the domain ports.

pub mod google;
pub mod markers;

pub use google::{GooglePlacesClient, ProviderSettings};
pub use markers::MarkerCollector;
