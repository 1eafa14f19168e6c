//! Member group service

use gather_core::entities::MemberGroup;
use gather_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{
    ActiveGroupsResponse, CreateMemberGroupRequest, MemberGroupListResponse, MemberGroupResponse,
    MessageResponse, UpdateMemberGroupRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member group service
pub struct MemberGroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberGroupService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<MemberGroupListResponse> {
        let page = self.ctx.group_repo().list(page).await?;

        Ok(MemberGroupListResponse {
            member_groups: page.items.iter().map(MemberGroupResponse::from).collect(),
            total: page.total,
        })
    }

    /// Active groups by name, for the public registration form
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<ActiveGroupsResponse> {
        let groups = self.ctx.group_repo().list_active().await?;

        Ok(ActiveGroupsResponse {
            groups: groups.iter().map(MemberGroupResponse::from).collect(),
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: CreateMemberGroupRequest,
    ) -> ServiceResult<MemberGroupResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }

        let mut group = MemberGroup::new(EntityId::generate(), name.to_string());
        group.description = request.description;
        if let Some(is_active) = request.is_active {
            group.is_active = is_active;
        }

        self.ctx.group_repo().create(&group).await?;

        info!(group_id = %group.id, "Member group created");

        Ok(MemberGroupResponse::from(group))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: EntityId,
        request: UpdateMemberGroupRequest,
    ) -> ServiceResult<MemberGroupResponse> {
        let mut group = self
            .ctx
            .group_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member group", id.to_string()))?;

        if let Some(name) = request.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::validation("Name is required"));
            }
            group.name = name.to_string();
        }
        if let Some(description) = request.description {
            group.description = Some(description);
        }
        if let Some(is_active) = request.is_active {
            group.is_active = is_active;
        }
        group.touch();

        self.ctx.group_repo().update(&group).await?;

        info!(group_id = %id, "Member group updated");

        Ok(MemberGroupResponse::from(group))
    }

    /// Delete a group; refused while members still belong to it
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> ServiceResult<MessageResponse> {
        self.ctx.group_repo().delete(id).await?;

        info!(group_id = %id, "Member group deleted");

        Ok(MessageResponse::deleted("Member group"))
    }
}
