//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use gather_core::entities::{
    Attendee, Gathering, GatheringWithCount, GatheringWithRegistrations, Member, MemberGroup,
    MemberWithGroup, RegistrationDetails, User,
};

use super::responses::{
    ActiveGatheringResponse, AttendeeResponse, GatheringResponse,
    GatheringWithRegistrationsResponse, MemberGroupResponse, MemberResponse,
    MemberWithGroupResponse, RegistrationResponse, UserResponse,
};

// ============================================================================
// Gathering Mappers
// ============================================================================

impl From<&Gathering> for GatheringResponse {
    fn from(g: &Gathering) -> Self {
        Self {
            id: g.id.to_string(),
            title: g.title.clone(),
            description: g.description.clone(),
            location: g.location.clone(),
            date: g.date,
            capacity: g.capacity,
            is_active: g.is_active,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

impl From<Gathering> for GatheringResponse {
    fn from(g: Gathering) -> Self {
        Self::from(&g)
    }
}

impl From<GatheringWithCount> for ActiveGatheringResponse {
    fn from(g: GatheringWithCount) -> Self {
        Self {
            gathering: GatheringResponse::from(&g.gathering),
            registration_count: g.registration_count,
        }
    }
}

impl From<GatheringWithRegistrations> for GatheringWithRegistrationsResponse {
    fn from(g: GatheringWithRegistrations) -> Self {
        let registration_count = g.registration_count();
        Self {
            gathering: GatheringResponse::from(&g.gathering),
            registrations: g.registrations.into_iter().map(AttendeeResponse::from).collect(),
            registration_count,
        }
    }
}

// ============================================================================
// Member Group Mappers
// ============================================================================

impl From<&MemberGroup> for MemberGroupResponse {
    fn from(g: &MemberGroup) -> Self {
        Self {
            id: g.id.to_string(),
            name: g.name.clone(),
            description: g.description.clone(),
            is_active: g.is_active,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

impl From<MemberGroup> for MemberGroupResponse {
    fn from(g: MemberGroup) -> Self {
        Self::from(&g)
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            email: m.email.clone(),
            phone: m.phone.clone(),
            address: m.address.clone(),
            is_active: m.is_active,
            group_id: m.group_id.to_string(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self::from(&m)
    }
}

impl From<MemberWithGroup> for MemberWithGroupResponse {
    fn from(m: MemberWithGroup) -> Self {
        Self {
            member: MemberResponse::from(&m.member),
            group: MemberGroupResponse::from(&m.group),
        }
    }
}

// ============================================================================
// Registration Mappers
// ============================================================================

impl From<RegistrationDetails> for RegistrationResponse {
    fn from(d: RegistrationDetails) -> Self {
        let r = &d.registration;
        Self {
            id: r.id.to_string(),
            member_id: r.member_id.to_string(),
            gathering_id: r.gathering_id.to_string(),
            status: r.status.to_string(),
            created_at: r.created_at,
            updated_at: r.updated_at,
            member: MemberWithGroupResponse {
                member: MemberResponse::from(&d.member),
                group: MemberGroupResponse::from(&d.group),
            },
            gathering: GatheringResponse::from(&d.gathering),
        }
    }
}

impl From<Attendee> for AttendeeResponse {
    fn from(a: Attendee) -> Self {
        let r = &a.registration;
        Self {
            id: r.id.to_string(),
            member_id: r.member_id.to_string(),
            gathering_id: r.gathering_id.to_string(),
            status: r.status.to_string(),
            created_at: r.created_at,
            updated_at: r.updated_at,
            member: MemberWithGroupResponse {
                member: MemberResponse::from(&a.member),
                group: MemberGroupResponse::from(&a.group),
            },
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self::from(&u)
    }
}
