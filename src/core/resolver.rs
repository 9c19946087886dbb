use crate::domain::model::{Coordinate, PlaceId};
use crate::domain::ports::{LocationType, PlacesProvider, ProviderStatus};
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::validate_non_empty_string;

/// Outcome of geocoding a free-text address.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Precise match: every result's identifier, in provider order.
    Resolved(Vec<PlaceId>),
    /// Only an area-level match; search around this point instead.
    Approximate(Coordinate),
    /// The provider found nothing.
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn place_ids(&self) -> Option<&[PlaceId]> {
        match self {
            Resolution::Resolved(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn fallback_location(&self) -> Option<Coordinate> {
        match self {
            Resolution::Approximate(location) => Some(*location),
            _ => None,
        }
    }
}

pub async fn resolve_address<P>(provider: &P, address: &str) -> Result<Resolution>
where
    P: PlacesProvider + ?Sized,
{
    validate_non_empty_string("address", address).map_err(|_| SearchError::ValidationError {
        message: "address must not be empty".to_string(),
    })?;

    let response = provider.geocode_address(address).await?;
    tracing::debug!(
        "Geocode '{}' -> {} ({} results)",
        address,
        response.status,
        response.results.len()
    );

    match response.status {
        ProviderStatus::Ok => {
            // 只以第一筆 (最佳) 結果判斷精確度
            let Some(best) = response.results.first() else {
                return Ok(Resolution::Unresolved);
            };
            if best.location_type == LocationType::Approximate {
                tracing::info!("Address '{}' matched only approximately", address);
                return Ok(Resolution::Approximate(best.location));
            }
            Ok(Resolution::Resolved(
                response.results.into_iter().map(|r| r.place_id).collect(),
            ))
        }
        ProviderStatus::ZeroResults => Ok(Resolution::Unresolved),
        status => Err(SearchError::Geocoding { status }),
    }
}

/// Coordinate of a single place, used as the search anchor.
pub async fn locate_place<P>(provider: &P, place_id: &PlaceId) -> Result<Coordinate>
where
    P: PlacesProvider + ?Sized,
{
    let response = provider.geocode_place_id(place_id).await?;
    if !response.status.is_ok() {
        return Err(SearchError::Geocoding {
            status: response.status,
        });
    }
    response
        .results
        .first()
        .map(|result| result.location)
        .ok_or(SearchError::Geocoding {
            status: ProviderStatus::ZeroResults,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::*;

    #[tokio::test]
    async fn test_precise_match_returns_all_place_ids() {
        let provider = FakeProvider::new().with_address(
            "1 Main St",
            precise(&[
                ("a", Coordinate::new(1.0, 1.0)),
                ("b", Coordinate::new(2.0, 2.0)),
            ]),
        );

        let resolution = resolve_address(&provider, "1 Main St").await.unwrap();

        assert!(resolution.is_resolved());
        assert_eq!(
            resolution.place_ids().unwrap(),
            &[PlaceId::from("a"), PlaceId::from("b")]
        );
        assert!(resolution.fallback_location().is_none());
    }

    #[tokio::test]
    async fn test_approximate_match_returns_fallback_location() {
        let provider = FakeProvider::new()
            .with_address("Seoul", approximate("seoul", Coordinate::new(37.56, 126.97)));

        let resolution = resolve_address(&provider, "Seoul").await.unwrap();

        assert!(!resolution.is_resolved());
        assert!(resolution.place_ids().is_none());
        assert_eq!(
            resolution.fallback_location(),
            Some(Coordinate::new(37.56, 126.97))
        );
    }

    #[tokio::test]
    async fn test_zero_results_is_unresolved() {
        let provider = FakeProvider::new()
            .with_address("Seoul Station", geocode_status(ProviderStatus::ZeroResults));

        let resolution = resolve_address(&provider, "Seoul Station").await.unwrap();

        assert_eq!(resolution, Resolution::Unresolved);
        assert!(resolution.fallback_location().is_none());
    }

    #[tokio::test]
    async fn test_other_status_is_geocoding_error() {
        let provider = FakeProvider::new()
            .with_address("x", geocode_status(ProviderStatus::RequestDenied));

        let err = resolve_address(&provider, "x").await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Geocoding {
                status: ProviderStatus::RequestDenied
            }
        ));
    }

    #[tokio::test]
    async fn test_blank_address_is_rejected_without_calling_provider() {
        let provider = FakeProvider::new();

        let err = resolve_address(&provider, "   ").await.unwrap_err();

        assert!(matches!(err, SearchError::ValidationError { .. }));
        assert_eq!(provider.geocode_calls(), 0);
    }

    #[tokio::test]
    async fn test_locate_place() {
        let provider = FakeProvider::new().with_place("abc", Coordinate::new(37.5, 127.0));

        let location = locate_place(&provider, &PlaceId::from("abc")).await.unwrap();
        assert_eq!(location, Coordinate::new(37.5, 127.0));

        let err = locate_place(&provider, &PlaceId::from("missing")).await.unwrap_err();
        assert!(matches!(err, SearchError::Geocoding { .. }));
    }
}
