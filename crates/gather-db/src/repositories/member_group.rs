//! PostgreSQL implementation of MemberGroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gather_core::entities::MemberGroup;
use gather_core::error::DomainError;
use gather_core::traits::{MemberGroupRepository, RepoResult};
use gather_core::value_objects::{EntityId, Page, PageRequest};

use crate::models::MemberGroupModel;

use super::error::{map_db_error, map_fk_violation, require_row};

/// PostgreSQL implementation of MemberGroupRepository
#[derive(Clone)]
pub struct PgMemberGroupRepository {
    pool: PgPool,
}

impl PgMemberGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberGroupRepository for PgMemberGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<MemberGroup>> {
        let result = sqlx::query_as::<_, MemberGroupModel>(
            r"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM member_groups
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MemberGroup::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberGroup>> {
        let rows = sqlx::query_as::<_, MemberGroupModel>(
            r"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM member_groups
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member_groups")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(MemberGroup::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<MemberGroup>> {
        let rows = sqlx::query_as::<_, MemberGroupModel>(
            r"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM member_groups
            WHERE is_active
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberGroup::from).collect())
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn create(&self, group: &MemberGroup) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO member_groups (id, name, description, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.is_active)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn update(&self, group: &MemberGroup) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE member_groups
            SET name = $2, description = $3, is_active = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        require_row(result, || DomainError::MemberGroupNotFound(group.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM member_groups WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::GroupHasMembers))?;

        require_row(result, || DomainError::MemberGroupNotFound(id))
    }
}
