//! Shared SELECT fragments

pub const GATHERING_COLUMNS: &str = r"
    g.id, g.title, g.description, g.location, g.date, g.capacity, g.is_active,
    g.created_at, g.updated_at";

pub const MEMBER_COLUMNS: &str = r"
    m.id, m.name, m.email, m.phone, m.address, m.is_active, m.group_id,
    m.created_at, m.updated_at";

/// Member joined with its group, aliased for `MemberWithGroupModel`
pub const MEMBER_WITH_GROUP_SELECT: &str = r"
    SELECT m.id, m.name, m.email, m.phone, m.address, m.is_active, m.group_id,
           m.created_at, m.updated_at,
           mg.name AS group_name, mg.description AS group_description,
           mg.is_active AS group_is_active, mg.created_at AS group_created_at,
           mg.updated_at AS group_updated_at
    FROM members m
    JOIN member_groups mg ON mg.id = m.group_id";

/// Registration joined with member, group and gathering, aliased for
/// `RegistrationDetailsModel`
pub const REGISTRATION_DETAILS_SELECT: &str = r"
    SELECT r.id, r.member_id, r.gathering_id, r.status, r.created_at, r.updated_at,
           m.name AS member_name, m.email AS member_email, m.phone AS member_phone,
           m.address AS member_address, m.is_active AS member_is_active,
           m.group_id AS member_group_id, m.created_at AS member_created_at,
           m.updated_at AS member_updated_at,
           mg.name AS group_name, mg.description AS group_description,
           mg.is_active AS group_is_active, mg.created_at AS group_created_at,
           mg.updated_at AS group_updated_at,
           g.title AS gathering_title, g.description AS gathering_description,
           g.location AS gathering_location, g.date AS gathering_date,
           g.capacity AS gathering_capacity, g.is_active AS gathering_is_active,
           g.created_at AS gathering_created_at, g.updated_at AS gathering_updated_at
    FROM gathering_registrations r
    JOIN members m ON m.id = r.member_id
    JOIN member_groups mg ON mg.id = m.group_id
    JOIN gatherings g ON g.id = r.gathering_id";
