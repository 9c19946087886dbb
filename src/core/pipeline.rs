use crate::core::enrichment::{enrich, EnrichmentCache};
use crate::core::node_builder::build_outcome;
use crate::core::proximity::{search_nearby, NearbyQuery};
use crate::core::ranker::rank_nodes;
use crate::core::resolver::{locate_place, resolve_address, Resolution};
use crate::domain::model::{BuildOutcome, Coordinate, DomainNode, PlaceId, SearchReport};
use crate::domain::ports::{AnchorStrategy, ConfigProvider, MarkerSurface, PlacesProvider};
use crate::utils::error::{Result, SearchError};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// Address in, ranked eateries out.
///
/// Resolve the address, fall back to a nearby search when the match is only
/// approximate, anchor on the candidates, search around the anchor, enrich
/// every hit with bounded concurrency, rank, and emit marker coordinates.
pub struct SearchPipeline<P: PlacesProvider, C: ConfigProvider> {
    provider: P,
    config: C,
    cache: Arc<EnrichmentCache>,
}

impl<P: PlacesProvider, C: ConfigProvider> SearchPipeline<P, C> {
    pub fn new(provider: P, config: C) -> Self {
        let cache = Arc::new(EnrichmentCache::with_capacity(config.cache_capacity()));
        Self::with_cache(provider, config, cache)
    }

    /// Shares an existing cache, e.g. between pipelines for different configs.
    pub fn with_cache(provider: P, config: C, cache: Arc<EnrichmentCache>) -> Self {
        Self {
            provider,
            config,
            cache,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn cache(&self) -> &Arc<EnrichmentCache> {
        &self.cache
    }

    /// Ranked nodes for `address`; their coordinates are placed on `markers`.
    pub async fn search_nearby_place(
        &self,
        address: &str,
        markers: &mut dyn MarkerSurface,
    ) -> Result<Vec<DomainNode>> {
        let report = self.search_detailed(address).await?;
        if !report.markers.is_empty() {
            markers.place_markers(&report.markers);
        }
        Ok(report.nodes)
    }

    /// Runs the whole search and reports skipped places alongside the ranking.
    pub async fn search_detailed(&self, address: &str) -> Result<SearchReport> {
        let query = NearbyQuery::from_config(&self.config);

        let candidates = match resolve_address(&self.provider, address).await? {
            Resolution::Unresolved => {
                tracing::info!("No match for '{}'", address);
                return Ok(SearchReport::default());
            }
            Resolution::Approximate(area) => {
                tracing::info!("Searching around approximate match {}", area);
                search_nearby(&self.provider, area, &query).await?
            }
            Resolution::Resolved(ids) => ids,
        };

        let Some(first) = candidates.first() else {
            tracing::info!("No candidate places for '{}'", address);
            return Ok(SearchReport::default());
        };

        let anchor = self.anchor(first, &candidates).await?;
        tracing::info!("Anchored search for '{}' at {}", address, anchor);

        let nearby = search_nearby(&self.provider, anchor, &query).await?;
        tracing::info!("Enriching {} nearby places", nearby.len());

        let mut built = Vec::with_capacity(nearby.len());
        let mut skipped = Vec::new();
        for outcome in self.build_nodes(nearby).await {
            match outcome {
                BuildOutcome::Built(node) => built.push(node),
                BuildOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        let nodes = rank_nodes(built);
        let markers = nodes.iter().map(|node| node.location).collect();
        tracing::info!(
            "Ranked {} places for '{}' ({} skipped)",
            nodes.len(),
            address,
            skipped.len()
        );

        Ok(SearchReport {
            anchor: Some(anchor),
            nodes,
            skipped,
            markers,
        })
    }

    async fn anchor(&self, first: &PlaceId, candidates: &[PlaceId]) -> Result<Coordinate> {
        match self.config.anchor_strategy() {
            AnchorStrategy::First => locate_place(&self.provider, first).await,
            AnchorStrategy::Centroid => {
                let points: Vec<Coordinate> = stream::iter(candidates)
                    .map(|id| locate_place(&self.provider, id))
                    .buffered(self.concurrency())
                    .try_collect()
                    .await?;
                Coordinate::centroid(&points).ok_or_else(|| SearchError::ValidationError {
                    message: "no candidate places to anchor the search on".to_string(),
                })
            }
        }
    }

    /// Enriches and builds every candidate, at most `concurrent_requests` at
    /// a time. Outcomes come back in candidate order.
    async fn build_nodes(&self, ids: Vec<PlaceId>) -> Vec<BuildOutcome> {
        let size = self.config.photo_size();
        stream::iter(ids)
            .map(|id| async move {
                let enriched = enrich(&self.provider, &self.cache, &id).await;
                build_outcome(id, enriched, size, |photo, size| {
                    self.provider.photo_url(photo, size)
                })
            })
            .buffered(self.concurrency())
            .collect()
            .await
    }

    fn concurrency(&self) -> usize {
        self.config.concurrent_requests().max(1)
    }
}
