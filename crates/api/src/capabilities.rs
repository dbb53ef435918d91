// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what the caller is permitted to do with a goal
//! without leaking domain internals. They are advisory only and do not
//! replace the checks made when an operation runs.

use goaltrack_domain::{Goal, GoalType, GroupRoster, InvitationStatus, Participant, UserId};

use crate::request_response::{Capability, GoalCapabilities};

/// Computes the caller's capabilities on `goal`.
///
/// Lifecycle flags follow the goal's current state, so `can_complete` is
/// denied once the goal is completed and `can_archive` and
/// `can_unarchive` are never both allowed.
#[must_use]
pub fn compute_goal_capabilities(goal: &Goal, user_id: &UserId) -> GoalCapabilities {
    let is_owner: bool = goal.owner_id() == user_id;
    let can_manage: bool = goal.require_manager(user_id).is_ok();
    let can_contribute: bool = goal.require_contributor(user_id).is_ok();

    let roster: Option<&GroupRoster> = goal.roster();
    let entry: Option<&Participant> = roster.and_then(|r| r.participant(user_id));
    let accepted: Option<&Participant> = entry.filter(|p| p.is_accepted());

    let can_invite: bool = roster.zip(accepted).is_some_and(|(r, p)| {
        p.role.can_invite(r.settings())
            && r.participants().len() < usize::from(r.settings().max_participants)
    });
    let can_remove: bool = accepted.is_some_and(|p| p.role.can_remove_others());
    let can_respond: bool =
        entry.is_some_and(|p| p.invitation_status == InvitationStatus::Pending);
    let is_habit: bool = goal.goal_type() == GoalType::Habit;

    GoalCapabilities {
        can_edit: Capability::from_bool(can_manage),
        can_complete: Capability::from_bool(can_manage && !goal.is_completed()),
        can_archive: Capability::from_bool(can_manage && !goal.is_archived()),
        can_unarchive: Capability::from_bool(can_manage && goal.is_archived()),
        can_delete: Capability::from_bool(is_owner),
        can_manage_steps: Capability::from_bool(can_contribute),
        can_mark_habit_days: Capability::from_bool(can_contribute && is_habit),
        can_invite: Capability::from_bool(can_invite),
        can_remove_participants: Capability::from_bool(can_remove),
        can_respond_to_invitation: Capability::from_bool(can_respond),
        can_view_audit_trail: Capability::from_bool(is_owner),
    }
}
