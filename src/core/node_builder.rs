use crate::domain::model::{
    BuildOutcome, Coordinate, DomainNode, PhotoReference, PhotoSize, PlaceDetails, PlaceId,
    ScorePayload, SkipReason, Skipped,
};
use crate::utils::error::{Result, SearchError};

/// Projects a details snapshot into a node. Places without geometry land on
/// `Coordinate::ORIGIN`; places without photos get an empty URL.
pub fn build_node<F>(id: PlaceId, details: &PlaceDetails, size: PhotoSize, photo_url: F) -> DomainNode
where
    F: Fn(&PhotoReference, PhotoSize) -> String,
{
    DomainNode {
        id,
        name: details.name.clone(),
        location: details.location.unwrap_or(Coordinate::ORIGIN),
        score: ScorePayload::from_reviews(&details.reviews),
        photo_url: details
            .photos
            .first()
            .map(|photo| photo_url(photo, size))
            .unwrap_or_default(),
    }
}

/// Turns an enrichment result into a node, or records why the place is left out.
pub fn build_outcome<F>(
    id: PlaceId,
    enriched: Result<PlaceDetails>,
    size: PhotoSize,
    photo_url: F,
) -> BuildOutcome
where
    F: Fn(&PhotoReference, PhotoSize) -> String,
{
    match enriched {
        Ok(details) => BuildOutcome::Built(build_node(id, &details, size, photo_url)),
        Err(err) => {
            tracing::warn!("Skipping {}: {}", id, err);
            let reason = match err {
                SearchError::Enrichment { status, .. } => SkipReason::Rejected(status),
                other => SkipReason::Failed(other.to_string()),
            };
            BuildOutcome::Skipped(Skipped {
                place_id: id,
                reason,
            })
        }
    }
}
