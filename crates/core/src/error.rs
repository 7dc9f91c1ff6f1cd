use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failure a handler can surface maps to exactly one of these
/// variants; the HTTP layer owns the status-code mapping.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Time slot conflict: {0}")]
    SlotConflict(String),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
