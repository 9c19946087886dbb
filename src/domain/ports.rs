use crate::domain::model::{Coordinate, PhotoReference, PhotoSize, PlaceId, Review};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code attached to every provider response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ProviderStatus {
    Ok,
    ZeroResults,
    NotFound,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    Other(String),
}

impl ProviderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderStatus::Ok => "OK",
            ProviderStatus::ZeroResults => "ZERO_RESULTS",
            ProviderStatus::NotFound => "NOT_FOUND",
            ProviderStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ProviderStatus::RequestDenied => "REQUEST_DENIED",
            ProviderStatus::InvalidRequest => "INVALID_REQUEST",
            ProviderStatus::UnknownError => "UNKNOWN_ERROR",
            ProviderStatus::Other(code) => code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ProviderStatus::Ok)
    }

    /// Statuses the provider documents as worth trying again later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderStatus::OverQueryLimit | ProviderStatus::UnknownError
        )
    }
}

impl From<&str> for ProviderStatus {
    fn from(code: &str) -> Self {
        match code {
            "OK" => ProviderStatus::Ok,
            "ZERO_RESULTS" => ProviderStatus::ZeroResults,
            "NOT_FOUND" => ProviderStatus::NotFound,
            "OVER_QUERY_LIMIT" => ProviderStatus::OverQueryLimit,
            "REQUEST_DENIED" => ProviderStatus::RequestDenied,
            "INVALID_REQUEST" => ProviderStatus::InvalidRequest,
            "UNKNOWN_ERROR" => ProviderStatus::UnknownError,
            other => ProviderStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ProviderStatus {
    fn from(code: String) -> Self {
        ProviderStatus::from(code.as_str())
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precision of a geocoding match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub place_id: PlaceId,
    pub location: Coordinate,
    pub location_type: LocationType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    pub status: ProviderStatus,
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub location: Coordinate,
    pub types: Vec<String>,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResponse {
    pub status: ProviderStatus,
    /// Identifiers in provider order; `None` for entries that came without one.
    pub place_ids: Vec<Option<PlaceId>>,
}

/// Place details exactly as the provider reported them, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlaceDetails {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub location: Option<Coordinate>,
    pub types: Option<Vec<String>>,
    pub reviews: Option<Vec<Review>>,
    pub photos: Option<Vec<PhotoReference>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsResponse {
    pub status: ProviderStatus,
    pub result: Option<RawPlaceDetails>,
}

/// The three capabilities consumed from the mapping/places provider.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn geocode_address(&self, address: &str) -> Result<GeocodeResponse>;
    async fn geocode_place_id(&self, place_id: &PlaceId) -> Result<GeocodeResponse>;
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyResponse>;
    async fn place_details(&self, place_id: &PlaceId) -> Result<DetailsResponse>;
    fn photo_url(&self, photo: &PhotoReference, size: PhotoSize) -> String;
}

/// Receives the ranked coordinates for marker placement.
pub trait MarkerSurface: Send {
    fn place_markers(&mut self, coordinates: &[Coordinate]);
}

/// How the center of the final nearby search is chosen from the candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    /// Locate only the first candidate.
    #[default]
    First,
    /// Locate every candidate and use their mean.
    Centroid,
}

impl std::str::FromStr for AnchorStrategy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(AnchorStrategy::First),
            "centroid" => Ok(AnchorStrategy::Centroid),
            other => Err(format!("unknown anchor strategy '{}' (first, centroid)", other)),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn search_radius(&self) -> f64;
    fn place_types(&self) -> &[String];
    fn concurrent_requests(&self) -> usize;
    fn photo_size(&self) -> PhotoSize;
    fn anchor_strategy(&self) -> AnchorStrategy;
    fn cache_capacity(&self) -> Option<usize>;
}
