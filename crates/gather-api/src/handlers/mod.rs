//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod gatherings;
pub mod health;
pub mod member_groups;
pub mod members;
pub mod registrations;
pub mod users;
