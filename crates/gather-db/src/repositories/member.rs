//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gather_core::entities::{Member, MemberWithGroup};
use gather_core::error::DomainError;
use gather_core::traits::{MemberRepository, RepoResult};
use gather_core::value_objects::{EntityId, Page, PageRequest};

use crate::models::{MemberModel, MemberWithGroupModel};

use super::error::{map_db_error, map_fk_violation, require_row};
use super::sql::{MEMBER_COLUMNS, MEMBER_WITH_GROUP_SELECT};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members m WHERE m.id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_with_group(&self, id: EntityId) -> RepoResult<Option<MemberWithGroup>> {
        let sql = format!("{MEMBER_WITH_GROUP_SELECT} WHERE m.id = $1");
        let result = sqlx::query_as::<_, MemberWithGroupModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(MemberWithGroup::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberWithGroup>> {
        let sql = format!(
            "{MEMBER_WITH_GROUP_SELECT}
             ORDER BY m.created_at DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, MemberWithGroupModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(MemberWithGroup::from).collect(),
            total,
        ))
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (id, name, email, phone, address, is_active, group_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(member.is_active)
        .bind(member.group_id.into_inner())
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::MemberGroupNotFound(member.group_id)))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET name = $2, email = $3, phone = $4, address = $5, is_active = $6,
                group_id = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(member.id.into_inner())
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(member.is_active)
        .bind(member.group_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::MemberGroupNotFound(member.group_id)))?;

        require_row(result, || DomainError::MemberNotFound(member.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        require_row(result, || DomainError::MemberNotFound(id))
    }
}
