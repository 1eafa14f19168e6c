//! Gathering service
//!
//! Administrator CRUD plus the two public listings, which are served through
//! the listing cache.

use std::future::Future;

use chrono::Utc;
use gather_core::entities::Gathering;
use gather_core::traits::CacheKey;
use gather_core::value_objects::{EntityId, PageRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    ActiveGatheringResponse, ActiveGatheringsResponse, CreateGatheringRequest,
    GatheringListResponse, GatheringResponse, GatheringWithRegistrationsResponse,
    GatheringsWithRegistrationsResponse, MessageResponse, UpdateGatheringRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Gathering service
pub struct GatheringService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GatheringService<'a> {
    /// Create a new GatheringService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List gatherings, latest date first
    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<GatheringListResponse> {
        let page = self.ctx.gathering_repo().list(page).await?;

        Ok(GatheringListResponse {
            gatherings: page.items.iter().map(GatheringResponse::from).collect(),
            total: page.total,
        })
    }

    /// Create a gathering
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, request: CreateGatheringRequest) -> ServiceResult<GatheringResponse> {
        let title = required_text("Title", &request.title)?;
        let location = required_text("Location", &request.location)?;

        let mut gathering = Gathering::new(
            EntityId::generate(),
            title,
            location,
            request.date,
            positive_capacity(request.capacity)?,
        );
        gathering.description = request.description;
        if let Some(is_active) = request.is_active {
            gathering.is_active = is_active;
        }

        self.ctx.gathering_repo().create(&gathering).await?;
        self.ctx.invalidate_listings().await;

        info!(gathering_id = %gathering.id, capacity = gathering.capacity, "Gathering created");

        Ok(GatheringResponse::from(gathering))
    }

    /// Update a gathering.
    ///
    /// Capacity may be lowered below the current registration count; existing
    /// registrations are kept and further admissions are refused.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: EntityId,
        request: UpdateGatheringRequest,
    ) -> ServiceResult<GatheringResponse> {
        let mut gathering = self
            .ctx
            .gathering_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Gathering", id.to_string()))?;

        if let Some(title) = request.title {
            gathering.title = required_text("Title", &title)?;
        }
        if let Some(location) = request.location {
            gathering.location = required_text("Location", &location)?;
        }
        if let Some(description) = request.description {
            gathering.description = Some(description);
        }
        if let Some(date) = request.date {
            gathering.date = date;
        }
        if let Some(capacity) = request.capacity {
            gathering.capacity = positive_capacity(capacity)?;
        }
        if let Some(is_active) = request.is_active {
            gathering.is_active = is_active;
        }
        gathering.touch();

        self.ctx.gathering_repo().update(&gathering).await?;
        self.ctx.invalidate_listings().await;

        info!(gathering_id = %id, "Gathering updated");

        Ok(GatheringResponse::from(gathering))
    }

    /// Delete a gathering and its registrations
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> ServiceResult<MessageResponse> {
        self.ctx.gathering_repo().delete(id).await?;
        self.ctx.invalidate_listings().await;

        info!(gathering_id = %id, "Gathering deleted");

        Ok(MessageResponse::deleted("Gathering"))
    }

    /// Active, upcoming gatherings that still have room, earliest first
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<ActiveGatheringsResponse> {
        self.cached(CacheKey::ActiveGatherings, async {
            let open = self
                .ctx
                .gathering_repo()
                .list_open_with_counts(Utc::now(), self.ctx.capacity_policy())
                .await?;

            Ok(ActiveGatheringsResponse {
                gatherings: open
                    .into_iter()
                    .filter(|g| !g.is_full())
                    .map(ActiveGatheringResponse::from)
                    .collect(),
            })
        })
        .await
    }

    /// Active, upcoming gatherings with their registrations
    #[instrument(skip(self))]
    pub async fn list_with_registrations(
        &self,
    ) -> ServiceResult<GatheringsWithRegistrationsResponse> {
        self.cached(CacheKey::GatheringsWithRegistrations, async {
            let open = self
                .ctx
                .gathering_repo()
                .list_open_with_registrations(Utc::now())
                .await?;

            Ok(GatheringsWithRegistrationsResponse {
                gatherings: open
                    .into_iter()
                    .map(GatheringWithRegistrationsResponse::from)
                    .collect(),
            })
        })
        .await
    }

    /// Serve `key` from the listing cache, loading and storing it on a miss.
    ///
    /// Cache failures degrade to a direct load.
    async fn cached<T, F>(&self, key: CacheKey, load: F) -> ServiceResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = ServiceResult<T>>,
    {
        let cache = self.ctx.listing_cache();

        match cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(value) => {
                    debug!(key = key.as_str(), "Listing served from cache");
                    return Ok(value);
                }
                Err(e) => warn!(key = key.as_str(), error = %e, "Discarding unreadable cache entry"),
            },
            Ok(None) => {}
            Err(e) => warn!(key = key.as_str(), error = %e, "Listing cache read failed"),
        }

        let value = load.await?;

        match serde_json::to_string(&value) {
            Ok(payload) => {
                if let Err(e) = cache.put(key, payload).await {
                    warn!(key = key.as_str(), error = %e, "Listing cache write failed");
                }
            }
            Err(e) => warn!(key = key.as_str(), error = %e, "Failed to serialize listing"),
        }

        Ok(value)
    }
}

fn required_text(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn positive_capacity(capacity: i32) -> ServiceResult<i32> {
    if capacity < 1 {
        return Err(gather_core::DomainError::InvalidCapacity(capacity).into());
    }
    Ok(capacity)
}
