//! sqlx error translation

use gather_core::error::DomainError;
use gather_core::EntityId;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgQueryResult;
use sqlx::Error as SqlxError;

pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// `on_match` if `e` is a constraint violation of `kind`, otherwise a
/// database error
fn map_violation(
    e: SqlxError,
    kind: ErrorKind,
    on_match: impl FnOnce() -> DomainError,
) -> DomainError {
    match e.as_database_error() {
        Some(db_err) if db_err.kind() == kind => on_match(),
        _ => map_db_error(e),
    }
}

pub fn map_unique_violation(e: SqlxError, on_unique: impl FnOnce() -> DomainError) -> DomainError {
    map_violation(e, ErrorKind::UniqueViolation, on_unique)
}

pub fn map_fk_violation(e: SqlxError, on_fk: impl FnOnce() -> DomainError) -> DomainError {
    map_violation(e, ErrorKind::ForeignKeyViolation, on_fk)
}

pub fn map_check_violation(e: SqlxError, on_check: impl FnOnce() -> DomainError) -> DomainError {
    map_violation(e, ErrorKind::CheckViolation, on_check)
}

/// Errors from inserting an admitted registration: the unique pair means a
/// duplicate, a dangling member reference means the member is gone
pub fn map_admission_insert_error(e: SqlxError, member_id: EntityId) -> DomainError {
    match e.as_database_error().map(|db_err| db_err.kind()) {
        Some(ErrorKind::UniqueViolation) => DomainError::DuplicateRegistration,
        Some(ErrorKind::ForeignKeyViolation) => DomainError::MemberNotFound(member_id),
        _ => map_db_error(e),
    }
}

/// An UPDATE or DELETE that matched nothing means the row does not exist
pub fn require_row(
    result: PgQueryResult,
    missing: impl FnOnce() -> DomainError,
) -> Result<(), DomainError> {
    if result.rows_affected() == 0 {
        Err(missing())
    } else {
        Ok(())
    }
}
