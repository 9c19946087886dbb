//! Place details lookup with a process-wide memo keyed by place identifier.
//!
//! Each key owns a `OnceCell`, so concurrent lookups of the same place join
//! the fetch already in flight instead of issuing a second details request.
//! A failed fetch gives its slot back, so only successes occupy the cache
//! and a later lookup may try again.

use crate::domain::model::{PlaceDetails, PlaceId};
use crate::domain::ports::{PlacesProvider, RawPlaceDetails};
use crate::utils::error::{Result, SearchError};
use lru::LruCache;
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<PlaceDetails>>;

/// Completed snapshots. Only successful lookups land here.
enum Store {
    Unbounded(HashMap<PlaceId, PlaceDetails>),
    Bounded(LruCache<PlaceId, PlaceDetails>),
}

impl Store {
    fn get(&mut self, id: &PlaceId) -> Option<&PlaceDetails> {
        match self {
            Store::Unbounded(map) => map.get(id),
            Store::Bounded(lru) => lru.get(id),
        }
    }

    // 只查看，不更新 LRU 順序
    fn peek(&self, id: &PlaceId) -> Option<&PlaceDetails> {
        match self {
            Store::Unbounded(map) => map.get(id),
            Store::Bounded(lru) => lru.peek(id),
        }
    }

    fn insert(&mut self, id: PlaceId, details: PlaceDetails) {
        match self {
            Store::Unbounded(map) => {
                map.insert(id, details);
            }
            Store::Bounded(lru) => {
                if let Some((evicted, _)) = lru.push(id.clone(), details) {
                    if evicted != id {
                        tracing::debug!("Evicting {} from enrichment cache", evicted);
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Store::Unbounded(map) => map.len(),
            Store::Bounded(lru) => lru.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Store::Unbounded(map) => map.clear(),
            Store::Bounded(lru) => lru.clear(),
        }
    }
}

struct Slots {
    ready: Store,
    // 進行中的查詢，完成後移除
    pending: HashMap<PlaceId, Slot>,
}

impl Slots {
    fn new(ready: Store) -> Self {
        Self {
            ready,
            pending: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.ready.len() + self.pending.len()
    }
}

pub struct EnrichmentCache {
    slots: Mutex<Slots>,
    capacity: Option<NonZeroUsize>,
}

impl Default for EnrichmentCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl EnrichmentCache {
    /// Append-only cache, lives as long as the process.
    pub fn unbounded() -> Self {
        Self {
            slots: Mutex::new(Slots::new(Store::Unbounded(HashMap::new()))),
            capacity: None,
        }
    }

    /// Keeps at most `capacity` places, dropping the least recently used.
    pub fn bounded(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            slots: Mutex::new(Slots::new(Store::Bounded(LruCache::new(capacity)))),
            capacity: Some(capacity),
        }
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }

    /// Number of identifiers with a stored snapshot.
    pub fn len(&self) -> usize {
        self.lock().ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.lock().ready.peek(id).is_some()
    }

    pub fn get(&self, id: &PlaceId) -> Option<PlaceDetails> {
        self.lock().ready.peek(id).cloned()
    }

    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.ready.clear();
        slots.pending.clear();
    }

    /// Returns the cached snapshot for `id`, running `fetch` only when no
    /// snapshot exists and no other fetch for `id` is in flight.
    pub async fn get_or_fetch<F, Fut>(&self, id: &PlaceId, fetch: F) -> Result<PlaceDetails>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PlaceDetails>>,
    {
        let slot = {
            let mut slots = self.lock();
            if let Some(details) = slots.ready.get(id) {
                tracing::debug!("Cache hit for {}", id);
                return Ok(details.clone());
            }
            Arc::clone(slots.pending.entry(id.clone()).or_default())
        };

        let outcome = slot.get_or_try_init(fetch).await.cloned();

        let mut slots = self.lock();
        // 只移除自己的 slot，已被 clear 或取代者保留
        if slots
            .pending
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, &slot))
        {
            slots.pending.remove(id);
        }
        if let Ok(details) = &outcome {
            slots.ready.insert(id.clone(), details.clone());
        }
        outcome
    }

    // 不可跨 await 持有
    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Fetches the details of `id`, at most once per identifier while cached.
pub async fn enrich<P>(provider: &P, cache: &EnrichmentCache, id: &PlaceId) -> Result<PlaceDetails>
where
    P: PlacesProvider + ?Sized,
{
    cache
        .get_or_fetch(id, || async {
            tracing::debug!("Fetching details for {}", id);
            let response = provider.place_details(id).await?;
            match (response.status.is_ok(), response.result) {
                (true, Some(raw)) => Ok(normalize(raw)),
                _ => Err(SearchError::Enrichment {
                    place_id: id.clone(),
                    status: response.status,
                }),
            }
        })
        .await
}

fn normalize(raw: RawPlaceDetails) -> PlaceDetails {
    PlaceDetails {
        name: raw.name.unwrap_or_default(),
        rating: raw.rating.unwrap_or(0.0),
        price_level: raw.price_level.unwrap_or(0),
        location: raw.location,
        types: raw.types.unwrap_or_default(),
        reviews: raw.reviews.unwrap_or_default(),
        photos: raw.photos.unwrap_or_default(),
    }
}
