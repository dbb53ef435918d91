// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use goaltrack_domain::DomainError;

/// The failure classes a transition can report to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The goal, step, participant, or invitation does not exist for the caller.
    NotFound,
    /// The caller is known but not permitted.
    Forbidden,
    /// The request is well-formed but the goal's state does not allow it.
    InvalidOperation,
    /// The request would duplicate existing state.
    Conflict,
    /// A supplied field is malformed.
    InvalidInput,
}

/// Errors that can occur during goal transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl CoreError {
    /// Classifies this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DomainViolation(err) => classify(err),
        }
    }
}

/// Classifies a domain error.
///
/// Ownership failures on solo goals read as `NotFound` so that other users'
/// goals are indistinguishable from missing ones.
#[must_use]
pub const fn classify(err: &DomainError) -> ErrorClass {
    match err {
        DomainError::GoalNotFound(_)
        | DomainError::StepNotFound { .. }
        | DomainError::NotGoalOwner { .. }
        | DomainError::ParticipantNotFound(_)
        | DomainError::InvitationNotFound(_) => ErrorClass::NotFound,
        DomainError::NotParticipant { .. }
        | DomainError::ParticipationNotAccepted { .. }
        | DomainError::PermissionDenied { .. } => ErrorClass::Forbidden,
        DomainError::GoalAlreadyCompleted(_)
        | DomainError::GoalAlreadyArchived(_)
        | DomainError::GoalNotArchived(_)
        | DomainError::NotHabitGoal(_)
        | DomainError::NotGroupGoal(_)
        | DomainError::ParticipantLimitReached { .. }
        | DomainError::InvitationAlreadyResponded(_)
        | DomainError::CannotRemoveOwner => ErrorClass::InvalidOperation,
        DomainError::AlreadyParticipant(_) | DomainError::DuplicateStepId(_) => {
            ErrorClass::Conflict
        }
        DomainError::InvalidStepText(_)
        | DomainError::InvalidGoalName(_)
        | DomainError::InvalidCategory(_)
        | DomainError::InvalidGoalValue { .. }
        | DomainError::InvalidUserId(_)
        | DomainError::InvalidGroupSettings(_)
        | DomainError::InvalidFilter(_)
        | DomainError::InvalidRole(_)
        | DomainError::InvalidDateRange { .. }
        | DomainError::InvalidInvitationResponse
        | DomainError::OwnerRoleImmutable => ErrorClass::InvalidInput,
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
