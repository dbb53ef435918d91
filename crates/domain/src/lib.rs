// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod goal;
mod habit;
mod participant;
mod progress;
mod types;
mod user_stats;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use goal::{Goal, GoalDraft, GoalKind, GoalUpdate, Step};
pub use habit::{HabitDay, HabitMark, HabitStats, compute_habit_stats, normalize_habit_date};
pub use participant::{
    GroupGoalStats, GroupRoster, GroupSettings, InvitationStatus, InviteOutcome, Participant,
    ParticipantRole, TOP_CONTRIBUTOR_LIMIT, TopContributor,
};
pub use progress::compute_progress;
pub use types::{
    ActivityEntry, ActivityType, DayOfWeek, GoalDetails, GoalId, GoalStatusFilter, GoalType,
    GoalValue, HabitSchedule, Privacy, StepId, UserId, iso_date,
};
pub use user_stats::{CounterOutcome, StatsChange, UserStats, apply_rating_delta};
pub use validation::{validate_goal_details, validate_step_text, validate_steps, validate_user_id};
