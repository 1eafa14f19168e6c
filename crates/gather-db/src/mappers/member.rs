//! Member and member group model -> entity mappers

use gather_core::entities::{Member, MemberGroup, MemberWithGroup};
use gather_core::value_objects::EntityId;

use crate::models::{MemberGroupModel, MemberModel, MemberWithGroupModel};

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: EntityId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            is_active: model.is_active,
            group_id: EntityId::from_uuid(model.group_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MemberGroupModel> for MemberGroup {
    fn from(model: MemberGroupModel) -> Self {
        MemberGroup {
            id: EntityId::from_uuid(model.id),
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MemberWithGroupModel> for MemberWithGroup {
    fn from(model: MemberWithGroupModel) -> Self {
        let group = MemberGroup {
            id: EntityId::from_uuid(model.member.group_id),
            name: model.group_name,
            description: model.group_description,
            is_active: model.group_is_active,
            created_at: model.group_created_at,
            updated_at: model.group_updated_at,
        };
        MemberWithGroup {
            member: model.member.into(),
            group,
        }
    }
}
