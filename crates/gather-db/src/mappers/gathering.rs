//! Gathering model -> entity mappers

use gather_core::entities::{Gathering, GatheringWithCount};
use gather_core::value_objects::EntityId;

use crate::models::{GatheringModel, GatheringWithCountModel};

impl From<GatheringModel> for Gathering {
    fn from(model: GatheringModel) -> Self {
        Gathering {
            id: EntityId::from_uuid(model.id),
            title: model.title,
            description: model.description,
            location: model.location,
            date: model.date,
            capacity: model.capacity,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<GatheringWithCountModel> for GatheringWithCount {
    fn from(model: GatheringWithCountModel) -> Self {
        GatheringWithCount {
            gathering: model.gathering.into(),
            registration_count: model.registration_count,
        }
    }
}
