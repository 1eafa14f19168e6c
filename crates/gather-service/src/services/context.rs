//! Service context - dependency container for services
//!
//! Holds all repositories, the listing cache, and auth helpers needed by services.

use std::sync::Arc;

use gather_common::auth::{JwtService, PasswordService};
use gather_core::admission::CapacityPolicy;
use gather_core::traits::{
    CacheKey, GatheringListCache, GatheringRepository, MemberGroupRepository, MemberRepository,
    RegistrationRepository, StoreHealth, UserRepository,
};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories are held behind trait objects so the same services run on
/// PostgreSQL in production and on in-memory stores in tests.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    gathering_repo: Arc<dyn GatheringRepository>,
    group_repo: Arc<dyn MemberGroupRepository>,
    member_repo: Arc<dyn MemberRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    user_repo: Arc<dyn UserRepository>,
    store_health: Arc<dyn StoreHealth>,

    // Cache
    listing_cache: Arc<dyn GatheringListCache>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,

    capacity_policy: CapacityPolicy,
}

impl ServiceContext {
    // === Repositories ===

    pub fn gathering_repo(&self) -> &dyn GatheringRepository {
        self.gathering_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn MemberGroupRepository {
        self.group_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn registration_repo(&self) -> &dyn RegistrationRepository {
        self.registration_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn store_health(&self) -> &dyn StoreHealth {
        self.store_health.as_ref()
    }

    // === Cache ===

    pub fn listing_cache(&self) -> &dyn GatheringListCache {
        self.listing_cache.as_ref()
    }

    /// Drop cached gathering listings after a write.
    ///
    /// A failed invalidation is logged; entries still expire on their TTL.
    pub async fn invalidate_listings(&self) {
        if let Err(e) = self.listing_cache.invalidate_all().await {
            warn!(error = %e, keys = ?CacheKey::ALL, "Failed to invalidate gathering listings");
        }
    }

    // === Auth ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }

    /// Which registrations occupy a place in a gathering
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("listing_cache", &"...")
            .field("capacity_policy", &self.capacity_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    gathering_repo: Option<Arc<dyn GatheringRepository>>,
    group_repo: Option<Arc<dyn MemberGroupRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    registration_repo: Option<Arc<dyn RegistrationRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    store_health: Option<Arc<dyn StoreHealth>>,
    listing_cache: Option<Arc<dyn GatheringListCache>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
    capacity_policy: CapacityPolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gathering_repo(mut self, repo: Arc<dyn GatheringRepository>) -> Self {
        self.gathering_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn MemberGroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn registration_repo(mut self, repo: Arc<dyn RegistrationRepository>) -> Self {
        self.registration_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn store_health(mut self, health: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(health);
        self
    }

    pub fn listing_cache(mut self, cache: Arc<dyn GatheringListCache>) -> Self {
        self.listing_cache = Some(cache);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            gathering_repo: required(self.gathering_repo, "gathering_repo")?,
            group_repo: required(self.group_repo, "group_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            registration_repo: required(self.registration_repo, "registration_repo")?,
            user_repo: required(self.user_repo, "user_repo")?,
            store_health: required(self.store_health, "store_health")?,
            listing_cache: required(self.listing_cache, "listing_cache")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: self.password_service.unwrap_or_default(),
            capacity_policy: self.capacity_policy,
        })
    }
}
