//! Reqwest-backed adapter for the Google Maps geocoding and places web services.

pub mod dto;

use crate::domain::model::{PhotoReference, PhotoSize, PlaceId};
use crate::domain::ports::{
    DetailsResponse, GeocodeResponse, NearbyRequest, NearbyResponse, PlacesProvider,
    ProviderStatus,
};
use crate::utils::error::{Result, SearchError};
use async_trait::async_trait;
use dto::{DetailsResponseDto, GeocodeResponseDto, NearbyResponseDto};
use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const GEOCODE_PATH: &str = "maps/api/geocode/json";
const NEARBY_PATH: &str = "maps/api/place/nearbysearch/json";
const DETAILS_PATH: &str = "maps/api/place/details/json";
const PHOTO_PATH: &str = "maps/api/place/photo";
const DETAILS_FIELDS: &str = "name,rating,price_level,geometry,types,reviews,photos";

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub language: Option<String>,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            language: None,
        }
    }
}

struct Endpoints {
    geocode: Url,
    nearby: Url,
    details: Url,
    photo: Url,
}

impl Endpoints {
    fn new(base_url: &str) -> Result<Self> {
        let invalid = |reason: String| SearchError::InvalidConfigValueError {
            field: "provider.base_url".to_string(),
            value: base_url.to_string(),
            reason,
        };
        // 結尾補上 `/`，避免 join 吃掉最後一段路徑
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
        let join = |path: &str| base.join(path).map_err(|e| invalid(e.to_string()));

        Ok(Self {
            geocode: join(GEOCODE_PATH)?,
            nearby: join(NEARBY_PATH)?,
            details: join(DETAILS_PATH)?,
            photo: join(PHOTO_PATH)?,
        })
    }
}

pub struct GooglePlacesClient {
    client: Client,
    endpoints: Endpoints,
    api_key: String,
    language: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            endpoints: Endpoints::new(&settings.base_url)?,
            api_key: settings.api_key,
            language: settings.language,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url, params: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .client
            .get(url.clone())
            .query(params)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        tracing::debug!("Provider request to {}", url.path());
        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn geocode_address(&self, address: &str) -> Result<GeocodeResponse> {
        let dto: GeocodeResponseDto = self
            .get_json(&self.endpoints.geocode, &[("address", address.to_string())])
            .await?;
        Ok(dto.into_domain())
    }

    async fn geocode_place_id(&self, place_id: &PlaceId) -> Result<GeocodeResponse> {
        let dto: GeocodeResponseDto = self
            .get_json(&self.endpoints.geocode, &[("place_id", place_id.to_string())])
            .await?;
        Ok(dto.into_domain())
    }

    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyResponse> {
        let location = format!("{},{}", request.location.latitude, request.location.longitude);
        let radius = request.radius_meters.to_string();

        // 服務只接受單一 type，每個類別各查一次再依序合併
        let pages = try_join_all(
            request
                .types
                .iter()
                .filter(|place_type| !place_type.trim().is_empty())
                .map(|place_type| {
                    let params = [
                        ("location", location.clone()),
                        ("radius", radius.clone()),
                        ("type", place_type.trim().to_string()),
                    ];
                    async move {
                        let dto: NearbyResponseDto =
                            self.get_json(&self.endpoints.nearby, &params).await?;
                        Ok::<_, SearchError>(dto.into_domain())
                    }
                }),
        )
        .await?;

        Ok(merge_nearby(pages))
    }

    async fn place_details(&self, place_id: &PlaceId) -> Result<DetailsResponse> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
        ];
        let dto: DetailsResponseDto = self.get_json(&self.endpoints.details, &params).await?;
        Ok(dto.into_domain())
    }

    fn photo_url(&self, photo: &PhotoReference, size: PhotoSize) -> String {
        let mut url = self.endpoints.photo.clone();
        url.query_pairs_mut()
            .append_pair("maxwidth", &size.max_width.to_string())
            .append_pair("maxheight", &size.max_height.to_string())
            .append_pair("photo_reference", photo.as_str())
            .append_pair("key", &self.api_key);
        url.into()
    }
}

/// Joins per-category pages in request order, keeping the first occurrence
/// of each identifier. A hard failure on any page fails the whole search;
/// `ZERO_RESULTS` only when every page came back empty.
fn merge_nearby(pages: Vec<NearbyResponse>) -> NearbyResponse {
    if let Some(failed) = pages
        .iter()
        .find(|page| !page.status.is_ok() && page.status != ProviderStatus::ZeroResults)
    {
        return NearbyResponse {
            status: failed.status.clone(),
            place_ids: Vec::new(),
        };
    }

    let status = if pages.iter().any(|page| page.status.is_ok()) {
        ProviderStatus::Ok
    } else {
        ProviderStatus::ZeroResults
    };

    let mut seen = HashSet::new();
    let place_ids = pages
        .into_iter()
        .flat_map(|page| page.place_ids)
        .filter(|id| match id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect();

    NearbyResponse { status, place_ids }
}
