// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{GoalId, StepId, UserId};

/// Errors that can occur while validating or mutating a goal aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Goal does not exist, or the caller cannot see it.
    GoalNotFound(GoalId),
    /// Step does not exist on the goal.
    StepNotFound {
        /// The goal that was searched.
        goal_id: GoalId,
        /// The missing step.
        step_id: StepId,
    },
    /// Step identifiers must be unique within a goal.
    DuplicateStepId(StepId),
    /// Step text is empty or invalid.
    InvalidStepText(String),
    /// Goal name is empty or invalid.
    InvalidGoalName(String),
    /// Goal category is empty or invalid.
    InvalidCategory(String),
    /// Goal value is outside the accepted range.
    InvalidGoalValue {
        /// The rejected value.
        value: u16,
    },
    /// A user identifier is empty or invalid.
    InvalidUserId(String),
    /// Group settings are invalid.
    InvalidGroupSettings(String),
    /// Goal listing filter is not recognised.
    InvalidFilter(String),
    /// Participant role is not recognised.
    InvalidRole(String),
    /// Goal end date precedes its start date.
    InvalidDateRange {
        /// The goal start date.
        start_date: time::Date,
        /// The rejected end date.
        end_date: time::Date,
    },
    /// Goal has already been completed.
    GoalAlreadyCompleted(GoalId),
    /// Goal is already archived.
    GoalAlreadyArchived(GoalId),
    /// Goal is not archived.
    GoalNotArchived(GoalId),
    /// Operation requires a habit goal.
    NotHabitGoal(GoalId),
    /// Operation requires a group goal.
    NotGroupGoal(GoalId),
    /// The acting user is not a participant of the group goal.
    NotParticipant {
        /// The group goal.
        goal_id: GoalId,
        /// The acting user.
        user_id: UserId,
    },
    /// The acting user is a participant but has not accepted the invitation.
    ParticipationNotAccepted {
        /// The group goal.
        goal_id: GoalId,
        /// The acting user.
        user_id: UserId,
    },
    /// The acting user's role does not permit the operation.
    PermissionDenied {
        /// The acting user.
        user_id: UserId,
        /// Description of the denied operation.
        operation: &'static str,
    },
    /// Only the goal owner may perform the operation.
    NotGoalOwner {
        /// The goal.
        goal_id: GoalId,
        /// The acting user.
        user_id: UserId,
    },
    /// The roster is full.
    ParticipantLimitReached {
        /// The configured cap.
        max_participants: u16,
    },
    /// The user is already on the roster.
    AlreadyParticipant(UserId),
    /// The target user is not on the roster.
    ParticipantNotFound(UserId),
    /// The user has no invitation for the group goal.
    InvitationNotFound(UserId),
    /// The invitation has already been accepted or declined.
    InvitationAlreadyResponded(UserId),
    /// Invitation responses must be `accepted` or `declined`.
    InvalidInvitationResponse,
    /// The owner role cannot be granted or removed.
    OwnerRoleImmutable,
    /// The owner can never be removed from the roster.
    CannotRemoveOwner,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalNotFound(goal_id) => write!(f, "Goal '{goal_id}' not found"),
            Self::StepNotFound { goal_id, step_id } => {
                write!(f, "Step '{step_id}' not found in goal '{goal_id}'")
            }
            Self::DuplicateStepId(step_id) => {
                write!(f, "Step id '{step_id}' is used more than once")
            }
            Self::InvalidStepText(msg) => write!(f, "Invalid step text: {msg}"),
            Self::InvalidGoalName(msg) => write!(f, "Invalid goal name: {msg}"),
            Self::InvalidCategory(msg) => write!(f, "Invalid category: {msg}"),
            Self::InvalidGoalValue { value } => {
                write!(f, "Goal value must be between 1 and 500, got {value}")
            }
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::InvalidGroupSettings(msg) => write!(f, "Invalid group settings: {msg}"),
            Self::InvalidFilter(filter) => write!(f, "Unknown goal filter '{filter}'"),
            Self::InvalidRole(role) => write!(f, "Unknown participant role '{role}'"),
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => write!(
                f,
                "End date {end_date} must not precede start date {start_date}"
            ),
            Self::GoalAlreadyCompleted(_) => write!(f, "Goal already completed"),
            Self::GoalAlreadyArchived(_) => write!(f, "Goal already archived"),
            Self::GoalNotArchived(_) => write!(f, "Goal is not archived"),
            Self::NotHabitGoal(_) => write!(f, "This is not a habit goal"),
            Self::NotGroupGoal(_) => write!(f, "This is not a group goal"),
            Self::NotParticipant { user_id, .. } => {
                write!(f, "User '{user_id}' is not a participant of this goal")
            }
            Self::ParticipationNotAccepted { user_id, .. } => write!(
                f,
                "User '{user_id}' has not accepted the invitation to this goal"
            ),
            Self::PermissionDenied { user_id, operation } => {
                write!(f, "User '{user_id}' is not permitted to {operation}")
            }
            Self::NotGoalOwner { goal_id, user_id } => {
                write!(f, "User '{user_id}' does not own goal '{goal_id}'")
            }
            Self::ParticipantLimitReached { max_participants } => write!(
                f,
                "Maximum number of participants reached ({max_participants})"
            ),
            Self::AlreadyParticipant(user_id) => {
                write!(f, "User '{user_id}' is already a participant")
            }
            Self::ParticipantNotFound(_) => write!(f, "Participant not found"),
            Self::InvitationNotFound(_) => write!(f, "Invitation not found"),
            Self::InvitationAlreadyResponded(_) => write!(f, "Invitation already responded"),
            Self::InvalidInvitationResponse => {
                write!(f, "Invitation response must be 'accepted' or 'declined'")
            }
            Self::OwnerRoleImmutable => write!(f, "The owner role cannot be assigned"),
            Self::CannotRemoveOwner => write!(f, "Cannot remove the goal owner"),
        }
    }
}

impl std::error::Error for DomainError {}
