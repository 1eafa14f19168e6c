//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read from PostgreSQL.
//! Entities are written with explicit binds in the repositories.

mod gathering;
mod member;
mod registration;
mod user;

pub use registration::status_from_db;
