//! PostgreSQL implementation of GatheringRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use gather_core::admission::CapacityPolicy;
use gather_core::entities::{
    Attendee, Gathering, GatheringWithCount, GatheringWithRegistrations, RegistrationDetails,
};
use gather_core::error::DomainError;
use gather_core::traits::{GatheringRepository, RepoResult};
use gather_core::value_objects::{EntityId, Page, PageRequest};

use crate::models::{GatheringModel, GatheringWithCountModel, RegistrationDetailsModel};

use super::error::{map_check_violation, map_db_error, require_row};
use super::sql::{GATHERING_COLUMNS, REGISTRATION_DETAILS_SELECT};

/// PostgreSQL implementation of GatheringRepository
#[derive(Clone)]
pub struct PgGatheringRepository {
    pool: PgPool,
}

impl PgGatheringRepository {
    /// Create a new PgGatheringRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn open_gatherings(&self, now: DateTime<Utc>) -> RepoResult<Vec<Gathering>> {
        let sql = format!(
            "SELECT {GATHERING_COLUMNS} FROM gatherings g
             WHERE g.is_active AND g.date >= $1
             ORDER BY g.date ASC"
        );
        let rows = sqlx::query_as::<_, GatheringModel>(&sql)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Gathering::from).collect())
    }
}

#[async_trait]
impl GatheringRepository for PgGatheringRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Gathering>> {
        let sql = format!("SELECT {GATHERING_COLUMNS} FROM gatherings g WHERE g.id = $1");
        let result = sqlx::query_as::<_, GatheringModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Gathering::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Gathering>> {
        let sql = format!(
            "SELECT {GATHERING_COLUMNS} FROM gatherings g
             ORDER BY g.date DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, GatheringModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gatherings")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Gathering::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_open_with_counts(
        &self,
        now: DateTime<Utc>,
        policy: CapacityPolicy,
    ) -> RepoResult<Vec<GatheringWithCount>> {
        let sql = format!(
            "SELECT {GATHERING_COLUMNS},
                    COUNT(r.id) FILTER (WHERE $2 OR r.status <> 'cancelled') AS registration_count
             FROM gatherings g
             LEFT JOIN gathering_registrations r ON r.gathering_id = g.id
             WHERE g.is_active AND g.date >= $1
             GROUP BY g.id
             ORDER BY g.date ASC"
        );
        let rows = sqlx::query_as::<_, GatheringWithCountModel>(&sql)
            .bind(now)
            .bind(policy.counts_cancelled())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(GatheringWithCount::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_open_with_registrations(
        &self,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<GatheringWithRegistrations>> {
        let gatherings = self.open_gatherings(now).await?;
        if gatherings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = gatherings.iter().map(|g| g.id.into_inner()).collect();
        let sql = format!(
            "{REGISTRATION_DETAILS_SELECT}
             WHERE r.gathering_id = ANY($1)
             ORDER BY r.created_at ASC"
        );
        let rows = sqlx::query_as::<_, RegistrationDetailsModel>(&sql)
            .bind(&ids[..])
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut by_gathering: HashMap<EntityId, Vec<Attendee>> = HashMap::new();
        for row in rows {
            let details = RegistrationDetails::from(row);
            by_gathering
                .entry(details.gathering.id)
                .or_default()
                .push(Attendee::from(details));
        }

        Ok(gatherings
            .into_iter()
            .map(|gathering| {
                let registrations = by_gathering.remove(&gathering.id).unwrap_or_default();
                GatheringWithRegistrations {
                    gathering,
                    registrations,
                }
            })
            .collect())
    }

    #[instrument(skip(self, gathering), fields(gathering_id = %gathering.id))]
    async fn create(&self, gathering: &Gathering) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO gatherings (id, title, description, location, date, capacity, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(gathering.id.into_inner())
        .bind(&gathering.title)
        .bind(&gathering.description)
        .bind(&gathering.location)
        .bind(gathering.date)
        .bind(gathering.capacity)
        .bind(gathering.is_active)
        .bind(gathering.created_at)
        .bind(gathering.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_check_violation(e, || DomainError::InvalidCapacity(gathering.capacity)))?;

        Ok(())
    }

    #[instrument(skip(self, gathering), fields(gathering_id = %gathering.id))]
    async fn update(&self, gathering: &Gathering) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE gatherings
            SET title = $2, description = $3, location = $4, date = $5, capacity = $6,
                is_active = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(gathering.id.into_inner())
        .bind(&gathering.title)
        .bind(&gathering.description)
        .bind(&gathering.location)
        .bind(gathering.date)
        .bind(gathering.capacity)
        .bind(gathering.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_check_violation(e, || DomainError::InvalidCapacity(gathering.capacity)))?;

        require_row(result, || DomainError::GatheringNotFound(gathering.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        // Registrations go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM gatherings WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        require_row(result, || DomainError::GatheringNotFound(id))
    }
}
