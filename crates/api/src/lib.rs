// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for goal tracking.
//!
//! Each operation takes a store implementing every collaborator
//! trait, a [`RequestContext`] describing the caller, and a request DTO.
//! They return response DTOs or an [`ApiError`] from the client-facing
//! taxonomy.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod ledger;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, RequestContext};
pub use capabilities::compute_goal_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    Stores, add_participant, add_step, archive_goal, complete_goal, create_goal,
    create_group_goal, delete_goal, delete_step, edit_step, get_goal, get_goal_audit_trail,
    get_group_goal_stats, get_habit_stats, get_profile_stats, list_archived_goals, list_goals,
    list_group_goals, list_invitations, list_notifications, mark_habit_day,
    mark_notifications_read, record_blog_posts, remove_participant, respond_to_invitation,
    toggle_step, unarchive_goal, update_goal, upload_image,
};
pub use ledger::StatsLedger;
pub use request_response::{
    AddParticipantRequest, AddStepRequest, AuditTrailResponse, Capability, CreateGoalRequest,
    CreateGroupGoalRequest, DEFAULT_LIMIT, DEFAULT_PAGE, DeleteGoalResponse, EditStepRequest,
    GoalCapabilities, GoalInfo, GoalListResponse, GoalResponse, ListGoalsQuery,
    ListNotificationsQuery, MAX_LIMIT, MIN_PAGE, MarkHabitDayRequest,
    MarkNotificationsReadRequest, MarkNotificationsReadResponse, NotificationListResponse,
    RecordBlogPostsRequest, RespondToInvitationRequest, StepInput, ToggleStepRequest,
    UpdateGoalRequest, UploadImageResponse, UserStatsResponse,
};
