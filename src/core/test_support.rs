use crate::domain::model::{Coordinate, PhotoReference, PhotoSize, PlaceId, Review};
use crate::domain::ports::{
    AnchorStrategy, ConfigProvider, DetailsResponse, GeocodeResponse, GeocodeResult,
    LocationType, NearbyRequest, NearbyResponse, PlacesProvider, ProviderStatus,
    RawPlaceDetails,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted provider. Anything not scripted answers ZERO_RESULTS / NOT_FOUND.
#[derive(Default)]
pub struct FakeProvider {
    addresses: HashMap<String, GeocodeResponse>,
    places: HashMap<PlaceId, Coordinate>,
    nearby: Vec<(Coordinate, NearbyResponse)>,
    details: HashMap<PlaceId, DetailsResponse>,
    details_delay: Option<Duration>,
    nearby_requests: Mutex<Vec<NearbyRequest>>,
    details_calls: Mutex<HashMap<PlaceId, usize>>,
    geocode_calls: AtomicUsize,
    details_in_flight: AtomicUsize,
    details_peak: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: &str, response: GeocodeResponse) -> Self {
        self.addresses.insert(address.to_string(), response);
        self
    }

    pub fn with_place(mut self, id: &str, location: Coordinate) -> Self {
        self.places.insert(PlaceId::from(id), location);
        self
    }

    pub fn with_nearby(mut self, center: Coordinate, ids: &[&str]) -> Self {
        let response = NearbyResponse {
            status: ProviderStatus::Ok,
            place_ids: ids.iter().map(|id| Some(PlaceId::from(*id))).collect(),
        };
        self.nearby.push((center, response));
        self
    }

    pub fn with_nearby_response(mut self, center: Coordinate, response: NearbyResponse) -> Self {
        self.nearby.push((center, response));
        self
    }

    pub fn with_details(mut self, id: &str, details: RawPlaceDetails) -> Self {
        self.details.insert(
            PlaceId::from(id),
            DetailsResponse {
                status: ProviderStatus::Ok,
                result: Some(details),
            },
        );
        self
    }

    pub fn with_details_delay(mut self, delay: Duration) -> Self {
        self.details_delay = Some(delay);
        self
    }

    pub fn details_calls(&self, id: &str) -> usize {
        let calls = self.details_calls.lock().unwrap();
        calls.get(&PlaceId::from(id)).copied().unwrap_or(0)
    }

    pub fn nearby_requests(&self) -> Vec<NearbyRequest> {
        self.nearby_requests.lock().unwrap().clone()
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    /// Highest number of details requests observed running at once.
    pub fn details_peak(&self) -> usize {
        self.details_peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesProvider for FakeProvider {
    async fn geocode_address(&self, address: &str) -> Result<GeocodeResponse> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .addresses
            .get(address)
            .cloned()
            .unwrap_or_else(|| geocode_status(ProviderStatus::ZeroResults)))
    }

    async fn geocode_place_id(&self, place_id: &PlaceId) -> Result<GeocodeResponse> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.places.get(place_id) {
            Some(location) => precise(&[(place_id.as_str(), *location)]),
            None => geocode_status(ProviderStatus::InvalidRequest),
        })
    }

    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyResponse> {
        self.nearby_requests.lock().unwrap().push(request.clone());
        Ok(self
            .nearby
            .iter()
            .find(|(center, _)| center.distance_meters(&request.location) < 1.0)
            .map(|(_, response)| response.clone())
            .unwrap_or(NearbyResponse {
                status: ProviderStatus::ZeroResults,
                place_ids: vec![],
            }))
    }

    async fn place_details(&self, place_id: &PlaceId) -> Result<DetailsResponse> {
        *self
            .details_calls
            .lock()
            .unwrap()
            .entry(place_id.clone())
            .or_insert(0) += 1;
        let running = self.details_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.details_peak.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.details_delay {
            tokio::time::sleep(delay).await;
        }
        self.details_in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.details.get(place_id).cloned().unwrap_or(DetailsResponse {
            status: ProviderStatus::NotFound,
            result: None,
        }))
    }

    fn photo_url(&self, photo: &PhotoReference, size: PhotoSize) -> String {
        format!(
            "https://photos.test/{}?w={}&h={}",
            photo.as_str(),
            size.max_width,
            size.max_height
        )
    }
}

pub fn geocode_status(status: ProviderStatus) -> GeocodeResponse {
    GeocodeResponse {
        status,
        results: vec![],
    }
}

pub fn precise(results: &[(&str, Coordinate)]) -> GeocodeResponse {
    GeocodeResponse {
        status: ProviderStatus::Ok,
        results: results
            .iter()
            .map(|(id, location)| GeocodeResult {
                place_id: PlaceId::from(*id),
                location: *location,
                location_type: LocationType::Rooftop,
            })
            .collect(),
    }
}

pub fn approximate(id: &str, location: Coordinate) -> GeocodeResponse {
    GeocodeResponse {
        status: ProviderStatus::Ok,
        results: vec![GeocodeResult {
            place_id: PlaceId::from(id),
            location,
            location_type: LocationType::Approximate,
        }],
    }
}

pub fn place(name: &str, location: Coordinate, ratings: &[f64]) -> RawPlaceDetails {
    RawPlaceDetails {
        name: Some(name.to_string()),
        rating: Some(4.0),
        price_level: Some(2),
        location: Some(location),
        types: Some(vec!["restaurant".to_string()]),
        reviews: Some(
            ratings
                .iter()
                .enumerate()
                .map(|(i, rating)| Review {
                    text: format!("{} review {}", name, i + 1),
                    rating: *rating,
                })
                .collect(),
        ),
        photos: Some(vec![PhotoReference::new(format!("{}-photo", name))]),
    }
}

pub struct TestConfig {
    pub radius: f64,
    pub types: Vec<String>,
    pub concurrent_requests: usize,
    pub anchor_strategy: AnchorStrategy,
    pub cache_capacity: Option<usize>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            types: ["restaurant", "bakery", "bar", "cafe"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            concurrent_requests: 5,
            anchor_strategy: AnchorStrategy::First,
            cache_capacity: None,
        }
    }
}

impl ConfigProvider for TestConfig {
    fn search_radius(&self) -> f64 {
        self.radius
    }

    fn place_types(&self) -> &[String] {
        &self.types
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn photo_size(&self) -> PhotoSize {
        PhotoSize::default()
    }

    fn anchor_strategy(&self) -> AnchorStrategy {
        self.anchor_strategy
    }

    fn cache_capacity(&self) -> Option<usize> {
        self.cache_capacity
    }
}
