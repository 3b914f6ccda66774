//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Kind of record a lookup was made for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Part,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Part => "part",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Every variant except `Unavailable` is a deterministic rejection of the
/// caller's input or of the current state of the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An external identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The referenced record does not exist.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// A category with the same `(name, parent)` pair already exists.
    #[error("category with the same name and parent already exists")]
    DuplicateCategory,

    /// Another part already carries this serial number.
    #[error("part with serial number {0:?} already exists")]
    DuplicateSerialNumber(String),

    /// Parts may only be assigned to side categories.
    #[error("cannot assign a part to a base category")]
    BaseCategoryAssignment,

    /// A side category with parts cannot become a base category.
    #[error("cannot change a category with assigned parts to a base category")]
    CategoryHasAssignedParts,

    /// A location key outside the allowed set was supplied.
    #[error("invalid location field: {0}")]
    InvalidLocationField(String),

    /// The record is still referenced by parts or child categories.
    #[error("category cannot be deleted because it is referenced by other objects")]
    ReferencedByOthers,

    /// A payload value failed validation (missing, malformed, out of range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record storage could not complete a read or write.
    #[error("storage unavailable")]
    Unavailable,
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound(kind)
    }

    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidIdentifier(_) => "invalid_identifier",
            DomainError::NotFound(_) => "not_found",
            DomainError::DuplicateCategory => "duplicate_category",
            DomainError::DuplicateSerialNumber(_) => "duplicate_serial_number",
            DomainError::BaseCategoryAssignment => "base_category_assignment",
            DomainError::CategoryHasAssignedParts => "category_has_assigned_parts",
            DomainError::InvalidLocationField(_) => "invalid_location_field",
            DomainError::ReferencedByOthers => "referenced_by_others",
            DomainError::Validation(_) => "validation_error",
            DomainError::Unavailable => "unavailable",
        }
    }
}
