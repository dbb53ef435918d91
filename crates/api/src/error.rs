// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use goaltrack::CoreError;
use goaltrack_domain::DomainError;
use goaltrack_persistence::PersistenceError;

/// Caller identity errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable caller identity was supplied.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A requested resource was not found, or is not visible to the caller.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The caller is known but not permitted to perform the operation.
    Forbidden {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// The request is well-formed but the resource's state does not allow it.
    InvalidOperation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The request would duplicate existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable snake-case name of this error's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidOperation { .. } => "invalid_operation",
            Self::Conflict { .. } => "conflict",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Forbidden { message }
            | Self::InvalidOperation { message }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Every variant is mapped explicitly. `NotGoalOwner` is reported as a
/// missing goal so that a caller cannot probe for goals they do not own.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::GoalNotFound(_) => not_found("Goal", &err),
        DomainError::NotGoalOwner { ref goal_id, .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Goal"),
            message: format!("Goal '{goal_id}' not found"),
        },
        DomainError::StepNotFound { .. } => not_found("Step", &err),
        DomainError::ParticipantNotFound(_) => not_found("Participant", &err),
        DomainError::InvitationNotFound(_) => not_found("Invitation", &err),
        DomainError::NotParticipant { .. }
        | DomainError::ParticipationNotAccepted { .. }
        | DomainError::PermissionDenied { .. } => ApiError::Forbidden {
            message: err.to_string(),
        },
        DomainError::GoalAlreadyCompleted(_)
        | DomainError::GoalAlreadyArchived(_)
        | DomainError::GoalNotArchived(_)
        | DomainError::NotHabitGoal(_)
        | DomainError::NotGroupGoal(_)
        | DomainError::ParticipantLimitReached { .. }
        | DomainError::InvitationAlreadyResponded(_)
        | DomainError::CannotRemoveOwner => ApiError::InvalidOperation {
            message: err.to_string(),
        },
        DomainError::AlreadyParticipant(_) | DomainError::DuplicateStepId(_) => {
            ApiError::Conflict {
                message: err.to_string(),
            }
        }
        DomainError::InvalidStepText(_) => invalid_input("text", &err),
        DomainError::InvalidGoalName(_) => invalid_input("goal_name", &err),
        DomainError::InvalidCategory(_) => invalid_input("category", &err),
        DomainError::InvalidGoalValue { .. } => invalid_input("value", &err),
        DomainError::InvalidUserId(_) => invalid_input("user_id", &err),
        DomainError::InvalidGroupSettings(_) => invalid_input("group_settings", &err),
        DomainError::InvalidFilter(_) => invalid_input("filter", &err),
        DomainError::InvalidRole(_) | DomainError::OwnerRoleImmutable => {
            invalid_input("role", &err)
        }
        DomainError::InvalidDateRange { .. } => invalid_input("end_date", &err),
        DomainError::InvalidInvitationResponse => invalid_input("status", &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records become `ResourceNotFound`, a duplicate goal id becomes
/// `Conflict`, and everything else is an internal failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::GoalNotFound(goal_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Goal"),
            message: format!("Goal '{goal_id}' not found"),
        },
        PersistenceError::ImageNotFound(reference) => ApiError::ResourceNotFound {
            resource_type: String::from("Image"),
            message: format!("Image '{reference}' not found"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::DuplicateGoal(goal_id) => ApiError::Conflict {
            message: format!("Goal '{goal_id}' already exists"),
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
