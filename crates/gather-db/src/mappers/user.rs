//! User model -> entity mapper

use gather_core::entities::User;
use gather_core::value_objects::EntityId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: EntityId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
