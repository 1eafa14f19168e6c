//! Registration service
//!
//! Public admission of registrations plus the administrator's view of them.
//! Admission itself is delegated to [`RegistrationRepository::admit`], which
//! evaluates and inserts atomically; this service only translates the
//! request and keeps the listing cache honest afterwards.
//!
//! [`RegistrationRepository::admit`]: gather_core::traits::RegistrationRepository::admit

use gather_core::admission::AdmissionRequest;
use gather_core::entities::RegistrationStatus;
use gather_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{
    AvailableMembersQuery, AvailableMembersResponse, MemberResponse, MessageResponse,
    RegistrationListResponse, RegistrationResponse, SubmitRegistrationRequest,
    UpdateRegistrationStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::parse_id;

/// Registration service
pub struct RegistrationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RegistrationService<'a> {
    /// Create a new RegistrationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admit a member to a gathering.
    ///
    /// Rejections come back as `DomainError::DuplicateRegistration`,
    /// `GatheringNotFound`, `MemberNotFound`, `GatheringInactive`,
    /// `MemberInactive` or `CapacityExceeded`; none of them writes anything.
    #[instrument(skip(self, request), fields(member_id = %request.member_id, gathering_id = %request.gathering_id))]
    pub async fn submit(
        &self,
        request: SubmitRegistrationRequest,
    ) -> ServiceResult<RegistrationResponse> {
        if let Some(status) = request.status.as_deref() {
            if status != RegistrationStatus::Registered.as_str() {
                return Err(ServiceError::validation(
                    "New registrations must have status 'registered'",
                ));
            }
        }

        let admission = AdmissionRequest::new(
            parse_id("memberId", &request.member_id)?,
            parse_id("gatheringId", &request.gathering_id)?,
        );

        let details = self
            .ctx
            .registration_repo()
            .admit(&admission, self.ctx.capacity_policy())
            .await?;

        self.ctx.invalidate_listings().await;

        info!(registration_id = %details.registration.id, "Registration submitted");

        Ok(RegistrationResponse::from(details))
    }

    /// Active members of a group not yet registered for a gathering
    #[instrument(skip(self))]
    pub async fn available_members(
        &self,
        query: AvailableMembersQuery,
    ) -> ServiceResult<AvailableMembersResponse> {
        let (Some(group_id), Some(gathering_id)) = (
            query.group_id.as_deref().filter(|s| !s.is_empty()),
            query.gathering_id.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(ServiceError::validation("Missing required parameters"));
        };

        let members = self
            .ctx
            .registration_repo()
            .available_members(
                parse_id("groupId", group_id)?,
                parse_id("gatheringId", gathering_id)?,
            )
            .await?;

        Ok(AvailableMembersResponse {
            members: members.into_iter().map(MemberResponse::from).collect(),
        })
    }

    /// List registrations, most recent first
    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<RegistrationListResponse> {
        let page = self.ctx.registration_repo().list(page).await?;

        Ok(RegistrationListResponse {
            registrations: page.items.into_iter().map(RegistrationResponse::from).collect(),
            total: page.total,
        })
    }

    /// Set a registration's status; any status may follow any other
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        id: EntityId,
        request: UpdateRegistrationStatusRequest,
    ) -> ServiceResult<RegistrationResponse> {
        let status: RegistrationStatus = request.status.parse()?;

        self.ctx.registration_repo().update_status(id, status).await?;
        self.ctx.invalidate_listings().await;

        let details = self
            .ctx
            .registration_repo()
            .find_details(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Registration", id.to_string()))?;

        info!(registration_id = %id, status = %status, "Registration status updated");

        Ok(RegistrationResponse::from(details))
    }

    /// Delete a registration, reopening its place
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> ServiceResult<MessageResponse> {
        self.ctx.registration_repo().delete(id).await?;
        self.ctx.invalidate_listings().await;

        info!(registration_id = %id, "Registration deleted");

        Ok(MessageResponse::deleted("Registration"))
    }
}
