//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod pagination;

pub use entity_id::{EntityId, EntityIdParseError};
pub use pagination::{Page, PageRequest};
