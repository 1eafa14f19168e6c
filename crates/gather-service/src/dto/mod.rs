//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AvailableMembersQuery, CreateGatheringRequest, CreateMemberGroupRequest, CreateMemberRequest,
    CreateUserRequest, LoginRequest, SubmitRegistrationRequest, UpdateGatheringRequest,
    UpdateMemberGroupRequest, UpdateMemberRequest, UpdateRegistrationStatusRequest,
    UpdateUserRequest,
};

pub use responses::{
    ActiveGatheringResponse, ActiveGatheringsResponse, ActiveGroupsResponse, AttendeeResponse,
    AvailableMembersResponse, GatheringListResponse, GatheringResponse,
    GatheringWithRegistrationsResponse, GatheringsWithRegistrationsResponse, HealthChecks,
    HealthResponse, LoginResponse, MemberGroupListResponse, MemberGroupResponse,
    MemberListResponse, MemberResponse, MemberWithGroupResponse, MessageResponse,
    ReadinessResponse, RegistrationListResponse, RegistrationResponse, UserListResponse,
    UserResponse,
};
