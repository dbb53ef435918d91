// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only views over a goal. These never produce audit events.

use crate::error::CoreError;
use goaltrack_domain::{
    DomainError, Goal, GroupGoalStats, GroupRoster, HabitStats, UserId, compute_habit_stats,
};

/// Fails unless `viewer` may read `goal`.
///
/// # Errors
///
/// Returns `DomainError::GoalNotFound` so that hidden goals are
/// indistinguishable from missing ones.
pub fn ensure_visible(goal: &Goal, viewer: &UserId) -> Result<(), CoreError> {
    if !goal.is_visible_to(viewer) {
        return Err(DomainError::GoalNotFound(goal.id().clone()).into());
    }
    Ok(())
}

/// Computes habit statistics for a goal the viewer can see.
///
/// # Errors
///
/// Returns an error if the goal is hidden from `viewer` or is not a habit goal.
pub fn habit_stats(goal: &Goal, viewer: &UserId) -> Result<HabitStats, CoreError> {
    ensure_visible(goal, viewer)?;
    Ok(compute_habit_stats(goal)?)
}

/// Computes roster statistics for a group goal.
///
/// # Errors
///
/// Returns an error if the goal is not a group goal or `viewer` is not on
/// its roster.
pub fn group_goal_stats(goal: &Goal, viewer: &UserId) -> Result<GroupGoalStats, CoreError> {
    let roster: &GroupRoster = goal
        .roster()
        .ok_or_else(|| DomainError::NotGroupGoal(goal.id().clone()))?;
    roster.require_participant(goal.id(), viewer)?;
    Ok(roster.stats())
}
