//! Member service
//!
//! Members are always returned together with their group.

use gather_core::entities::Member;
use gather_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{
    CreateMemberRequest, MemberListResponse, MemberWithGroupResponse, MessageResponse,
    UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::parse_id;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<MemberListResponse> {
        let page = self.ctx.member_repo().list(page).await?;

        Ok(MemberListResponse {
            members: page
                .items
                .into_iter()
                .map(MemberWithGroupResponse::from)
                .collect(),
            total: page.total,
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateMemberRequest) -> ServiceResult<MemberWithGroupResponse> {
        let group_id = parse_id("groupId", &request.group_id)?;
        self.require_group(group_id).await?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }

        let mut member = Member::new(
            EntityId::generate(),
            name.to_string(),
            request.email.trim().to_string(),
            group_id,
        );
        member.phone = request.phone;
        member.address = request.address;
        if let Some(is_active) = request.is_active {
            member.is_active = is_active;
        }

        self.ctx.member_repo().create(&member).await?;

        info!(member_id = %member.id, group_id = %group_id, "Member created");

        self.load(member.id).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: EntityId,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberWithGroupResponse> {
        let mut member = self
            .ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", id.to_string()))?;

        if let Some(raw) = request.group_id.as_deref() {
            let group_id = parse_id("groupId", raw)?;
            if !member.is_in_group(group_id) {
                self.require_group(group_id).await?;
                member.move_to_group(group_id);
            }
        }
        if let Some(name) = request.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::validation("Name is required"));
            }
            member.name = name.to_string();
        }
        if let Some(email) = request.email {
            member.email = email.trim().to_string();
        }
        if let Some(phone) = request.phone {
            member.phone = Some(phone);
        }
        if let Some(address) = request.address {
            member.address = Some(address);
        }
        if let Some(is_active) = request.is_active {
            member.is_active = is_active;
        }
        member.touch();

        self.ctx.member_repo().update(&member).await?;

        info!(member_id = %id, "Member updated");

        self.load(id).await
    }

    /// Delete a member and its registrations
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> ServiceResult<MessageResponse> {
        self.ctx.member_repo().delete(id).await?;
        // Registrations went with the member
        self.ctx.invalidate_listings().await;

        info!(member_id = %id, "Member deleted");

        Ok(MessageResponse::deleted("Member"))
    }

    async fn require_group(&self, group_id: EntityId) -> ServiceResult<()> {
        self.ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("Member group", group_id.to_string()))
    }

    async fn load(&self, id: EntityId) -> ServiceResult<MemberWithGroupResponse> {
        self.ctx
            .member_repo()
            .find_with_group(id)
            .await?
            .map(MemberWithGroupResponse::from)
            .ok_or_else(|| ServiceError::not_found("Member", id.to_string()))
    }
}
