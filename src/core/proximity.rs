use crate::domain::model::{Coordinate, PlaceId};
use crate::domain::ports::{ConfigProvider, NearbyRequest, PlacesProvider};
use crate::utils::error::{Result, SearchError};

pub const DEFAULT_PLACE_TYPES: [&str; 4] = ["restaurant", "bakery", "bar", "cafe"];
pub const DEFAULT_RADIUS_METERS: f64 = 200.0;

/// Category filter and radius for a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub types: Vec<String>,
    pub radius_meters: f64,
}

impl Default for NearbyQuery {
    fn default() -> Self {
        Self {
            types: DEFAULT_PLACE_TYPES.iter().map(|t| t.to_string()).collect(),
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}

impl NearbyQuery {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            types: config.place_types().to_vec(),
            radius_meters: config.search_radius(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(SearchError::ValidationError {
                message: format!("search radius must be positive, got {}", self.radius_meters),
            });
        }
        if self.types.iter().all(|t| t.trim().is_empty()) {
            return Err(SearchError::ValidationError {
                message: "at least one place type is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Identifiers of places around `center`, first provider page only.
pub async fn search_nearby<P>(
    provider: &P,
    center: Coordinate,
    query: &NearbyQuery,
) -> Result<Vec<PlaceId>>
where
    P: PlacesProvider + ?Sized,
{
    query.validate()?;

    let request = NearbyRequest {
        location: center,
        types: query.types.clone(),
        radius_meters: query.radius_meters,
    };
    let response = provider.nearby_search(&request).await?;

    if !response.status.is_ok() {
        return Err(SearchError::ProximitySearch {
            status: response.status,
        });
    }

    let total = response.place_ids.len();
    let ids: Vec<PlaceId> = response.place_ids.into_iter().flatten().collect();
    if ids.len() < total {
        tracing::debug!("Dropped {} nearby results without an identifier", total - ids.len());
    }
    tracing::debug!(
        "Nearby search at {} within {}m found {} places",
        center,
        query.radius_meters,
        ids.len()
    );
    Ok(ids)
}
