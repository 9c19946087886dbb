//! Wire shapes of the Google Maps geocoding and places web services.

use crate::domain::model::{Coordinate, PhotoReference, PlaceId, Review};
use crate::domain::ports::{
    DetailsResponse, GeocodeResponse, GeocodeResult, LocationType, NearbyResponse,
    ProviderStatus, RawPlaceDetails,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLngDto> for Coordinate {
    fn from(dto: LatLngDto) -> Self {
        Coordinate::new(dto.lat, dto.lng)
    }
}

#[derive(Debug, Deserialize)]
pub struct GeometryDto {
    pub location: LatLngDto,
    #[serde(default)]
    pub location_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResultDto {
    pub place_id: String,
    pub geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponseDto {
    pub status: ProviderStatus,
    #[serde(default)]
    pub results: Vec<GeocodeResultDto>,
}

impl GeocodeResponseDto {
    pub fn into_domain(self) -> GeocodeResponse {
        GeocodeResponse {
            status: self.status,
            results: self
                .results
                .into_iter()
                .map(|result| GeocodeResult {
                    place_id: PlaceId::from(result.place_id),
                    location_type: location_type(result.geometry.location_type.as_deref()),
                    location: result.geometry.location.into(),
                })
                .collect(),
        }
    }
}

fn location_type(code: Option<&str>) -> LocationType {
    match code {
        Some("ROOFTOP") => LocationType::Rooftop,
        Some("RANGE_INTERPOLATED") => LocationType::RangeInterpolated,
        Some("APPROXIMATE") => LocationType::Approximate,
        _ => LocationType::GeometricCenter,
    }
}

#[derive(Debug, Deserialize)]
pub struct NearbyResultDto {
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResponseDto {
    pub status: ProviderStatus,
    #[serde(default)]
    pub results: Vec<NearbyResultDto>,
}

impl NearbyResponseDto {
    pub fn into_domain(self) -> NearbyResponse {
        NearbyResponse {
            status: self.status,
            place_ids: self
                .results
                .into_iter()
                .map(|result| result.place_id.filter(|id| !id.is_empty()).map(PlaceId::from))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewDto {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct PhotoDto {
    pub photo_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaceGeometryDto {
    pub location: LatLngDto,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResultDto {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub geometry: Option<PlaceGeometryDto>,
    pub types: Option<Vec<String>>,
    pub reviews: Option<Vec<ReviewDto>>,
    pub photos: Option<Vec<PhotoDto>>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponseDto {
    pub status: ProviderStatus,
    #[serde(default)]
    pub result: Option<PlaceResultDto>,
}

impl DetailsResponseDto {
    pub fn into_domain(self) -> DetailsResponse {
        DetailsResponse {
            status: self.status,
            result: self.result.map(|place| RawPlaceDetails {
                name: place.name,
                rating: place.rating,
                price_level: place.price_level,
                location: place.geometry.map(|g| g.location.into()),
                types: place.types,
                reviews: place.reviews.map(|reviews| {
                    reviews
                        .into_iter()
                        .map(|r| Review {
                            text: r.text,
                            rating: r.rating,
                        })
                        .collect()
                }),
                photos: place.photos.map(|photos| {
                    photos
                        .into_iter()
                        .map(|p| PhotoReference::new(p.photo_reference))
                        .collect()
                }),
            }),
        }
    }
}
