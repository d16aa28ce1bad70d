//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeDashError`] via `#[from]`. None of them is fatal: every failure is a
//! local validation problem the caller can recover from.

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum HomeDashError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An unknown device or room identifier was passed to an accessor.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A room outside the catalog was selected.
    #[error(transparent)]
    InvalidRoom(#[from] InvalidRoomError),

    /// A storage collaborator failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected while building or mutating domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("identifier must not be empty")]
    EmptyId,

    #[error("duplicate {kind} identifier {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("device {device} references unknown room {room}")]
    DanglingDevice { device: String, room: String },

    #[error("room {room} and device {device} disagree on membership")]
    RoomMismatch { room: String, device: String },

    #[error("{field} is not applicable to {category} devices")]
    NotApplicable {
        field: &'static str,
        category: &'static str,
    },

    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        actual: i32,
    },
}

/// Lookup of an unknown identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Selection of a room that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("room {id} is not part of the catalog")]
pub struct InvalidRoomError {
    pub id: String,
}
