// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use goaltrack_domain::{
    GoalDraft, GoalId, GoalUpdate, GroupSettings, InvitationStatus, ParticipantRole, StepId,
    UserId,
};
use time::OffsetDateTime;

/// A command that brings a new goal into existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateCommand {
    /// Create a solo goal owned by the actor.
    CreateGoal {
        /// Identifier for the new goal.
        goal_id: GoalId,
        /// Client-supplied fields.
        draft: GoalDraft,
    },
    /// Create a group goal owned by the actor and invite others to it.
    CreateGroupGoal {
        /// Identifier for the new goal.
        goal_id: GoalId,
        /// Client-supplied fields.
        draft: GoalDraft,
        /// Users invited as members.
        invitees: Vec<UserId>,
        /// Group settings.
        settings: GroupSettings,
    },
}

impl CreateCommand {
    /// Returns the audit action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateGoal { .. } => "create_goal",
            Self::CreateGroupGoal { .. } => "create_group_goal",
        }
    }
}

/// A command represents user intent against one existing goal, as data only.
///
/// Commands are the only way to request goal state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit descriptive fields, value, schedule, settings, or replace the step list.
    UpdateGoal {
        /// The fields to change.
        update: GoalUpdate,
    },
    /// Mark the goal completed.
    CompleteGoal,
    /// Archive the goal.
    ArchiveGoal,
    /// Restore an archived goal.
    UnarchiveGoal,
    /// Delete the goal permanently.
    DeleteGoal,
    /// Append a new incomplete step.
    AddStep {
        /// Identifier for the new step.
        step_id: StepId,
        /// Step text.
        text: String,
    },
    /// Change a step's text.
    EditStep {
        /// The step to edit.
        step_id: StepId,
        /// New text.
        text: String,
    },
    /// Remove a step.
    DeleteStep {
        /// The step to remove.
        step_id: StepId,
    },
    /// Set a step's completion flag.
    ToggleStep {
        /// The step to toggle.
        step_id: StepId,
        /// The requested flag.
        is_completed: bool,
    },
    /// Record a habit day.
    MarkHabitDay {
        /// Any instant on the day being marked.
        date: OffsetDateTime,
        /// The requested flag.
        is_completed: bool,
    },
    /// Invite a user to a group goal.
    AddParticipant {
        /// The invited user.
        user_id: UserId,
        /// The role granted on acceptance.
        role: ParticipantRole,
    },
    /// Accept or decline the actor's own invitation.
    RespondToInvitation {
        /// `Accepted` or `Declined`.
        status: InvitationStatus,
    },
    /// Remove a participant from a group goal.
    RemoveParticipant {
        /// The participant to remove.
        user_id: UserId,
    },
}

impl Command {
    /// Returns the audit action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateGoal { .. } => "update_goal",
            Self::CompleteGoal => "complete_goal",
            Self::ArchiveGoal => "archive_goal",
            Self::UnarchiveGoal => "unarchive_goal",
            Self::DeleteGoal => "delete_goal",
            Self::AddStep { .. } => "add_step",
            Self::EditStep { .. } => "edit_step",
            Self::DeleteStep { .. } => "delete_step",
            Self::ToggleStep { .. } => "toggle_step",
            Self::MarkHabitDay { .. } => "mark_habit_day",
            Self::AddParticipant { .. } => "add_participant",
            Self::RespondToInvitation { .. } => "respond_to_invitation",
            Self::RemoveParticipant { .. } => "remove_participant",
        }
    }
}
