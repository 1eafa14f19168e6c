//! # gather-service
//!
//! Application layer containing the registration admission use case, the
//! administrative services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, GatheringService, MemberGroupService, MemberService, RegistrationService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
