//! Registration model -> entity mappers

use gather_core::entities::{
    Gathering, Member, MemberGroup, Registration, RegistrationDetails,
    RegistrationStatus,
};
use gather_core::value_objects::EntityId;

use crate::models::{RegistrationDetailsModel, RegistrationModel};

/// Parse a stored status; the table CHECK constraint keeps this total
pub fn status_from_db(raw: &str) -> RegistrationStatus {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(status = raw, "Unknown registration status in database");
        RegistrationStatus::default()
    })
}

impl From<RegistrationModel> for Registration {
    fn from(model: RegistrationModel) -> Self {
        Registration {
            id: EntityId::from_uuid(model.id),
            member_id: EntityId::from_uuid(model.member_id),
            gathering_id: EntityId::from_uuid(model.gathering_id),
            status: status_from_db(&model.status),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RegistrationDetailsModel> for RegistrationDetails {
    fn from(model: RegistrationDetailsModel) -> Self {
        let member = Member {
            id: EntityId::from_uuid(model.registration.member_id),
            name: model.member_name,
            email: model.member_email,
            phone: model.member_phone,
            address: model.member_address,
            is_active: model.member_is_active,
            group_id: EntityId::from_uuid(model.member_group_id),
            created_at: model.member_created_at,
            updated_at: model.member_updated_at,
        };
        let group = MemberGroup {
            id: EntityId::from_uuid(model.member_group_id),
            name: model.group_name,
            description: model.group_description,
            is_active: model.group_is_active,
            created_at: model.group_created_at,
            updated_at: model.group_updated_at,
        };
        let gathering = Gathering {
            id: EntityId::from_uuid(model.registration.gathering_id),
            title: model.gathering_title,
            description: model.gathering_description,
            location: model.gathering_location,
            date: model.gathering_date,
            capacity: model.gathering_capacity,
            is_active: model.gathering_is_active,
            created_at: model.gathering_created_at,
            updated_at: model.gathering_updated_at,
        };
        RegistrationDetails {
            registration: model.registration.into(),
            member,
            group,
            gathering,
        }
    }
}
