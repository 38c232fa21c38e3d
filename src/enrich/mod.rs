//! Two-phase discovery
//!
//! Phase 1 is a plain nearby search. Phase 2 takes that batch and, for every
//! entity still showing the placeholder image, fetches the place details and
//! swaps in the best detail photo. Phase 2 always returns a batch with the
//! same length and order as phase 1; a failed fetch leaves its entity as it
//! was.
//!
//! Each batch carries a generation number. Starting a new discovery bumps the
//! pipeline's generation, so a caller can drop a late phase-2 result with
//! `is_current()`.

use crate::constants::photo::{HERO_HEIGHT, HERO_WIDTH, PLACEHOLDER_IMAGE_URL};
use crate::coord::Coordinates;
use crate::error::Result;
use crate::photo::select_best_photo;
use crate::place::{PhotoDescriptor, PlaceDetails, PlaceEntity};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Where the pipeline gets places and photo URLs from
pub trait PlaceSource: Send + Sync {
    /// Phase-1 query
    fn search_nearby(
        &self,
        center: Coordinates,
        radius_meters: u32,
        category: &str,
    ) -> impl Future<Output = Result<Vec<PlaceEntity>>> + Send;

    /// Detail lookup used to find a photo for one entity
    fn get_details(&self, place_id: &str) -> impl Future<Output = Result<PlaceDetails>> + Send;

    /// Media URL for a chosen photo (placeholder when it cannot be signed)
    fn photo_url(&self, photo: &PhotoDescriptor, max_width: u32, max_height: u32) -> String;
}

/// Result of `discover_and_enrich`
pub struct Discovery<'a> {
    /// Batch tag; compare with `EnrichmentPipeline::is_current`
    pub generation: u64,
    /// Phase-1 entities, ready to display
    pub initial: Vec<PlaceEntity>,
    /// Phase-2 batch, same length and order as `initial`
    pub enriched: BoxFuture<'a, Vec<PlaceEntity>>,
}

impl std::fmt::Debug for Discovery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery")
            .field("generation", &self.generation)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

/// Discovery plus photo backfill over a `PlaceSource`
#[derive(Debug)]
pub struct EnrichmentPipeline<S> {
    source: S,
    generation: AtomicU64,
}

impl<S: PlaceSource> EnrichmentPipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
        }
    }

    /// The underlying place source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run phase 1 and hand back phase 2 as a future
    ///
    /// Phase-1 errors are returned as-is. The `enriched` future never fails.
    pub async fn discover_and_enrich(
        &self,
        location: Coordinates,
        radius_meters: u32,
        category: &str,
    ) -> Result<Discovery<'_>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let initial = self
            .source
            .search_nearby(location, radius_meters, category)
            .await?;

        debug!(generation, count = initial.len(), "phase 1 complete");

        let batch = initial.clone();
        let enriched = async move { self.enrich(&batch).await }.boxed();

        Ok(Discovery {
            generation,
            initial,
            enriched,
        })
    }

    /// Phase 2 over an arbitrary batch
    ///
    /// Only placeholder entities are looked up; every lookup runs
    /// concurrently and the output keeps the input order.
    pub async fn enrich(&self, batch: &[PlaceEntity]) -> Vec<PlaceEntity> {
        let pending = batch.iter().filter(|entity| entity.needs_photo()).count();
        let enriched = join_all(batch.iter().map(|entity| self.enrich_one(entity))).await;

        let filled = enriched
            .iter()
            .zip(batch)
            .filter(|(after, before)| after.image_url != before.image_url)
            .count();
        info!(total = batch.len(), pending, filled, "photo enrichment finished");

        enriched
    }

    /// Is `generation` still the latest batch?
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn enrich_one(&self, entity: &PlaceEntity) -> PlaceEntity {
        if !entity.needs_photo() {
            return entity.clone();
        }

        let details = match self.source.get_details(&entity.id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(place_id = %entity.id, error = %e, "photo enrichment failed");
                return entity.clone();
            }
        };

        let Some(best) = select_best_photo(&details.photos) else {
            debug!(place_id = %entity.id, "no detail photos");
            return entity.clone();
        };

        let url = self.source.photo_url(best, HERO_WIDTH, HERO_HEIGHT);
        if url == PLACEHOLDER_IMAGE_URL {
            return entity.clone();
        }

        entity.with_photo(url, best.attributions.clone())
    }
}
