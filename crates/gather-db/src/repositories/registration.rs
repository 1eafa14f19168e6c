//! PostgreSQL implementation of RegistrationRepository
//!
//! Admission runs inside a single transaction that first locks the target
//! gathering row (`SELECT ... FOR UPDATE`). Concurrent admissions for the same
//! gathering therefore queue behind each other and each one sees the count
//! left by the previous commit. The `(member_id, gathering_id)` unique
//! constraint still backs the duplicate check.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument, warn};

use gather_core::admission::{self, AdmissionRequest, AdmissionSnapshot, CapacityPolicy};
use gather_core::entities::{
    Gathering, Member, MemberWithGroup, Registration, RegistrationDetails, RegistrationStatus,
};
use gather_core::error::DomainError;
use gather_core::traits::{RegistrationRepository, RepoResult};
use gather_core::value_objects::{EntityId, Page, PageRequest};

use crate::models::{GatheringModel, MemberModel, MemberWithGroupModel, RegistrationDetailsModel};

use super::error::{map_admission_insert_error, map_db_error, require_row};
use super::sql::{
    GATHERING_COLUMNS, MEMBER_COLUMNS, MEMBER_WITH_GROUP_SELECT, REGISTRATION_DETAILS_SELECT,
};

/// PostgreSQL implementation of RegistrationRepository
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    /// Create a new PgRegistrationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read everything the admission decision needs. Must run inside the
    /// transaction that will perform the insert.
    async fn snapshot(
        tx: &mut Transaction<'_, Postgres>,
        request: &AdmissionRequest,
        policy: CapacityPolicy,
    ) -> RepoResult<(AdmissionSnapshot, Option<MemberWithGroup>)> {
        let lock_sql = format!(
            "SELECT {GATHERING_COLUMNS} FROM gatherings g WHERE g.id = $1 FOR UPDATE"
        );
        let gathering = sqlx::query_as::<_, GatheringModel>(&lock_sql)
            .bind(request.gathering_id.into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?
            .map(Gathering::from);

        let already_registered = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM gathering_registrations
                WHERE member_id = $1 AND gathering_id = $2
            )
            ",
        )
        .bind(request.member_id.into_inner())
        .bind(request.gathering_id.into_inner())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        // Held until commit so the member cannot be deleted before the insert
        let member_sql = format!("{MEMBER_WITH_GROUP_SELECT} WHERE m.id = $1 FOR SHARE OF m");
        let member = sqlx::query_as::<_, MemberWithGroupModel>(&member_sql)
            .bind(request.member_id.into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?
            .map(MemberWithGroup::from);

        let occupied = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM gathering_registrations
            WHERE gathering_id = $1 AND ($2 OR status <> 'cancelled')
            ",
        )
        .bind(request.gathering_id.into_inner())
        .bind(policy.counts_cancelled())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        let snapshot = AdmissionSnapshot {
            already_registered,
            gathering,
            member: member.as_ref().map(|m| m.member.clone()),
            occupied,
        };

        Ok((snapshot, member))
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    #[instrument(skip(self, request), fields(member_id = %request.member_id, gathering_id = %request.gathering_id))]
    async fn admit(
        &self,
        request: &AdmissionRequest,
        policy: CapacityPolicy,
    ) -> RepoResult<RegistrationDetails> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let (snapshot, member) = Self::snapshot(&mut tx, request, policy).await?;

        if let Err(rejection) = admission::evaluate(request, &snapshot) {
            tx.rollback().await.map_err(map_db_error)?;
            warn!(reason = rejection.code(), "Registration rejected");
            return Err(rejection);
        }

        // evaluate() has established both are present
        let (Some(gathering), Some(member)) = (snapshot.gathering, member) else {
            return Err(DomainError::InternalError(
                "admission snapshot incomplete".to_string(),
            ));
        };

        let registration =
            Registration::new(EntityId::generate(), request.member_id, request.gathering_id);

        sqlx::query(
            r"
            INSERT INTO gathering_registrations (id, member_id, gathering_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(registration.id.into_inner())
        .bind(registration.member_id.into_inner())
        .bind(registration.gathering_id.into_inner())
        .bind(registration.status.as_str())
        .bind(registration.created_at)
        .bind(registration.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_admission_insert_error(e, request.member_id))?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            registration_id = %registration.id,
            occupied = snapshot.occupied + 1,
            capacity = gathering.capacity,
            "Registration admitted"
        );

        Ok(RegistrationDetails {
            registration,
            member: member.member,
            group: member.group,
            gathering,
        })
    }

    #[instrument(skip(self))]
    async fn find_details(&self, id: EntityId) -> RepoResult<Option<RegistrationDetails>> {
        let sql = format!("{REGISTRATION_DETAILS_SELECT} WHERE r.id = $1");
        let result = sqlx::query_as::<_, RegistrationDetailsModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(RegistrationDetails::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<RegistrationDetails>> {
        let sql = format!(
            "{REGISTRATION_DETAILS_SELECT}
             ORDER BY r.created_at DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, RegistrationDetailsModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gathering_registrations")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(RegistrationDetails::from).collect(),
            total,
        ))
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: EntityId, status: RegistrationStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE gathering_registrations
            SET status = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        require_row(result, || DomainError::RegistrationNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM gathering_registrations WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        require_row(result, || DomainError::RegistrationNotFound(id))
    }

    #[instrument(skip(self))]
    async fn count_for_gathering(&self, gathering_id: EntityId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM gathering_registrations WHERE gathering_id = $1",
        )
        .bind(gathering_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn available_members(
        &self,
        group_id: EntityId,
        gathering_id: EntityId,
    ) -> RepoResult<Vec<Member>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members m
             WHERE m.group_id = $1
               AND m.is_active
               AND NOT EXISTS (
                   SELECT 1 FROM gathering_registrations r
                   WHERE r.member_id = m.id AND r.gathering_id = $2
               )
             ORDER BY m.name ASC"
        );
        let rows = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(group_id.into_inner())
            .bind(gathering_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}
