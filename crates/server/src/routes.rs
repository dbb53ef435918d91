// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers and router.
//!
//! Each handler builds a request context, takes the persistence lock for the
//! duration of one API call, and maps the result onto JSON.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::{get, patch, post},
};
use goaltrack_api::{
    AddParticipantRequest, AddStepRequest, AuditTrailResponse, AuthenticatedActor,
    CreateGoalRequest, CreateGroupGoalRequest, DeleteGoalResponse, EditStepRequest,
    GoalListResponse, GoalResponse, ListGoalsQuery, ListNotificationsQuery, MarkHabitDayRequest,
    MarkNotificationsReadRequest, MarkNotificationsReadResponse, NotificationListResponse,
    RecordBlogPostsRequest, RequestContext, RespondToInvitationRequest, ToggleStepRequest,
    UpdateGoalRequest, UploadImageResponse, UserStatsResponse,
};
use goaltrack_audit::Cause;
use goaltrack_domain::{GoalId, GroupGoalStats, HabitStats, StepId, UserId};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::HttpError, identity::CallerIdentity};

type JsonResult<T> = Result<Json<T>, HttpError>;
type CreatedResult<T> = Result<(StatusCode, Json<T>), HttpError>;

/// Builds the context for one request. Every request gets its own cause id.
fn request_context(actor: AuthenticatedActor, operation: &str) -> RequestContext {
    let cause: Cause = Cause::new(Uuid::new_v4().to_string(), format!("HTTP {operation}"));
    RequestContext::new(actor, cause, OffsetDateTime::now_utc())
}

// ============================================================================
// Images
// ============================================================================

/// Handler for POST `/images`. The body is the raw image.
async fn handle_upload_image(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    headers: HeaderMap,
    body: Bytes,
) -> CreatedResult<UploadImageResponse> {
    let content_type: &str = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info!(
        user_id = %actor.user_id,
        content_type,
        size = body.len(),
        "Handling upload_image request"
    );

    let ctx: RequestContext = request_context(actor, "upload_image");
    let mut persistence = app_state.persistence.lock().await;
    let response: UploadImageResponse =
        goaltrack_api::upload_image(&mut *persistence, &ctx, content_type, &body)?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// Goals
// ============================================================================

/// Handler for POST `/goals`.
async fn handle_create_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<CreateGoalRequest>,
) -> CreatedResult<GoalResponse> {
    info!(user_id = %actor.user_id, goal_name = %req.goal_name, "Handling create_goal request");

    let ctx: RequestContext = request_context(actor, "create_goal");
    let mut persistence = app_state.persistence.lock().await;
    let response: GoalResponse = goaltrack_api::create_goal(&mut *persistence, &ctx, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/goals`.
async fn handle_list_goals(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListGoalsQuery>,
) -> JsonResult<GoalListResponse> {
    let ctx: RequestContext = request_context(actor, "list_goals");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::list_goals(
        &mut *persistence,
        &ctx,
        &query,
    )?))
}

/// Handler for GET `/goals/archived`.
async fn handle_list_archived_goals(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListGoalsQuery>,
) -> JsonResult<GoalListResponse> {
    let ctx: RequestContext = request_context(actor, "list_archived_goals");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::list_archived_goals(
        &mut *persistence,
        &ctx,
        &query,
    )?))
}

/// Handler for GET `/goals/{goal_id}`.
async fn handle_get_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "get_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::get_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for PATCH `/goals/{goal_id}`.
async fn handle_update_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
    Json(req): Json<UpdateGoalRequest>,
) -> JsonResult<GoalResponse> {
    info!(user_id = %actor.user_id, goal_id = %goal_id, "Handling update_goal request");

    let ctx: RequestContext = request_context(actor, "update_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::update_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
        &req,
    )?))
}

/// Handler for DELETE `/goals/{goal_id}`.
async fn handle_delete_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<DeleteGoalResponse> {
    info!(user_id = %actor.user_id, goal_id = %goal_id, "Handling delete_goal request");

    let ctx: RequestContext = request_context(actor, "delete_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::delete_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for POST `/goals/{goal_id}/complete`.
async fn handle_complete_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<GoalResponse> {
    info!(user_id = %actor.user_id, goal_id = %goal_id, "Handling complete_goal request");

    let ctx: RequestContext = request_context(actor, "complete_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::complete_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for POST `/goals/{goal_id}/archive`.
async fn handle_archive_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "archive_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::archive_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for POST `/goals/{goal_id}/unarchive`.
async fn handle_unarchive_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "unarchive_goal");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::unarchive_goal(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for GET `/goals/{goal_id}/audit`.
async fn handle_get_goal_audit_trail(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<AuditTrailResponse> {
    let ctx: RequestContext = request_context(actor, "get_goal_audit_trail");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::get_goal_audit_trail(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

// ============================================================================
// Steps and habit days
// ============================================================================

/// Handler for POST `/goals/{goal_id}/steps`.
async fn handle_add_step(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
    Json(req): Json<AddStepRequest>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "add_step");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::add_step(
        &mut *persistence,
        &ctx,
        &goal_id,
        &req,
    )?))
}

/// Handler for PATCH `/goals/{goal_id}/steps/{step_id}`.
async fn handle_edit_step(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path((goal_id, step_id)): Path<(GoalId, StepId)>,
    Json(req): Json<EditStepRequest>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "edit_step");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::edit_step(
        &mut *persistence,
        &ctx,
        &goal_id,
        &step_id,
        &req,
    )?))
}

/// Handler for DELETE `/goals/{goal_id}/steps/{step_id}`.
async fn handle_delete_step(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path((goal_id, step_id)): Path<(GoalId, StepId)>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "delete_step");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::delete_step(
        &mut *persistence,
        &ctx,
        &goal_id,
        &step_id,
    )?))
}

/// Handler for POST `/goals/{goal_id}/steps/{step_id}/completion`.
async fn handle_toggle_step(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path((goal_id, step_id)): Path<(GoalId, StepId)>,
    Json(req): Json<ToggleStepRequest>,
) -> JsonResult<GoalResponse> {
    info!(
        user_id = %actor.user_id,
        goal_id = %goal_id,
        step_id = %step_id,
        is_completed = req.is_completed,
        "Handling toggle_step request"
    );

    let ctx: RequestContext = request_context(actor, "toggle_step");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::toggle_step(
        &mut *persistence,
        &ctx,
        &goal_id,
        &step_id,
        &req,
    )?))
}

/// Handler for POST `/goals/{goal_id}/habit-days`.
async fn handle_mark_habit_day(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
    Json(req): Json<MarkHabitDayRequest>,
) -> JsonResult<GoalResponse> {
    let ctx: RequestContext = request_context(actor, "mark_habit_day");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::mark_habit_day(
        &mut *persistence,
        &ctx,
        &goal_id,
        &req,
    )?))
}

/// Handler for GET `/goals/{goal_id}/habit-stats`.
async fn handle_get_habit_stats(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<HabitStats> {
    let ctx: RequestContext = request_context(actor, "get_habit_stats");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::get_habit_stats(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

// ============================================================================
// Group goals
// ============================================================================

/// Handler for POST `/group-goals`.
async fn handle_create_group_goal(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<CreateGroupGoalRequest>,
) -> CreatedResult<GoalResponse> {
    info!(
        user_id = %actor.user_id,
        goal_name = %req.goal.goal_name,
        invitees = req.invitees.len(),
        "Handling create_group_goal request"
    );

    let ctx: RequestContext = request_context(actor, "create_group_goal");
    let mut persistence = app_state.persistence.lock().await;
    let response: GoalResponse = goaltrack_api::create_group_goal(&mut *persistence, &ctx, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/group-goals`.
async fn handle_list_group_goals(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListGoalsQuery>,
) -> JsonResult<GoalListResponse> {
    let ctx: RequestContext = request_context(actor, "list_group_goals");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::list_group_goals(
        &mut *persistence,
        &ctx,
        &query,
    )?))
}

/// Handler for GET `/group-goals/invitations`.
async fn handle_list_invitations(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListGoalsQuery>,
) -> JsonResult<GoalListResponse> {
    let ctx: RequestContext = request_context(actor, "list_invitations");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::list_invitations(
        &mut *persistence,
        &ctx,
        &query,
    )?))
}

/// Handler for GET `/group-goals/{goal_id}/stats`.
async fn handle_get_group_goal_stats(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
) -> JsonResult<GroupGoalStats> {
    let ctx: RequestContext = request_context(actor, "get_group_goal_stats");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::get_group_goal_stats(
        &mut *persistence,
        &ctx,
        &goal_id,
    )?))
}

/// Handler for POST `/group-goals/{goal_id}/participants`.
async fn handle_add_participant(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
    Json(req): Json<AddParticipantRequest>,
) -> JsonResult<GoalResponse> {
    info!(
        user_id = %actor.user_id,
        goal_id = %goal_id,
        invitee = %req.user_id,
        "Handling add_participant request"
    );

    let ctx: RequestContext = request_context(actor, "add_participant");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::add_participant(
        &mut *persistence,
        &ctx,
        &goal_id,
        &req,
    )?))
}

/// Handler for DELETE `/group-goals/{goal_id}/participants/{user_id}`.
async fn handle_remove_participant(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path((goal_id, target)): Path<(GoalId, UserId)>,
) -> JsonResult<GoalResponse> {
    info!(
        user_id = %actor.user_id,
        goal_id = %goal_id,
        target = %target,
        "Handling remove_participant request"
    );

    let ctx: RequestContext = request_context(actor, "remove_participant");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::remove_participant(
        &mut *persistence,
        &ctx,
        &goal_id,
        &target,
    )?))
}

/// Handler for POST `/group-goals/{goal_id}/invitation`.
async fn handle_respond_to_invitation(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(goal_id): Path<GoalId>,
    Json(req): Json<RespondToInvitationRequest>,
) -> JsonResult<GoalResponse> {
    info!(
        user_id = %actor.user_id,
        goal_id = %goal_id,
        status = %req.status,
        "Handling respond_to_invitation request"
    );

    let ctx: RequestContext = request_context(actor, "respond_to_invitation");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::respond_to_invitation(
        &mut *persistence,
        &ctx,
        &goal_id,
        &req,
    )?))
}

// ============================================================================
// Profiles and notifications
// ============================================================================

/// Handler for GET `/profiles/{user_id}/stats`.
async fn handle_get_profile_stats(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(user_id): Path<UserId>,
) -> JsonResult<UserStatsResponse> {
    let ctx: RequestContext = request_context(actor, "get_profile_stats");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::get_profile_stats(
        &mut *persistence,
        &ctx,
        &user_id,
    )?))
}

/// Handler for POST `/profiles/me/blog-posts`.
async fn handle_record_blog_posts(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<RecordBlogPostsRequest>,
) -> JsonResult<UserStatsResponse> {
    let ctx: RequestContext = request_context(actor, "record_blog_posts");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::record_blog_posts(
        &mut *persistence,
        &ctx,
        &req,
    )?))
}

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListNotificationsQuery>,
) -> JsonResult<NotificationListResponse> {
    let ctx: RequestContext = request_context(actor, "list_notifications");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::list_notifications(
        &mut *persistence,
        &ctx,
        query,
    )?))
}

/// Handler for POST `/notifications/read`.
async fn handle_mark_notifications_read(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<MarkNotificationsReadRequest>,
) -> JsonResult<MarkNotificationsReadResponse> {
    let ctx: RequestContext = request_context(actor, "mark_notifications_read");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(goaltrack_api::mark_notifications_read(
        &mut *persistence,
        &ctx,
        &req,
    )?))
}

/// Builds the application router.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/images", post(handle_upload_image))
        .route("/goals", post(handle_create_goal).get(handle_list_goals))
        .route("/goals/archived", get(handle_list_archived_goals))
        .route(
            "/goals/{goal_id}",
            get(handle_get_goal)
                .patch(handle_update_goal)
                .delete(handle_delete_goal),
        )
        .route("/goals/{goal_id}/complete", post(handle_complete_goal))
        .route("/goals/{goal_id}/archive", post(handle_archive_goal))
        .route("/goals/{goal_id}/unarchive", post(handle_unarchive_goal))
        .route("/goals/{goal_id}/audit", get(handle_get_goal_audit_trail))
        .route("/goals/{goal_id}/steps", post(handle_add_step))
        .route(
            "/goals/{goal_id}/steps/{step_id}",
            patch(handle_edit_step).delete(handle_delete_step),
        )
        .route(
            "/goals/{goal_id}/steps/{step_id}/completion",
            post(handle_toggle_step),
        )
        .route("/goals/{goal_id}/habit-days", post(handle_mark_habit_day))
        .route("/goals/{goal_id}/habit-stats", get(handle_get_habit_stats))
        .route(
            "/group-goals",
            post(handle_create_group_goal).get(handle_list_group_goals),
        )
        .route("/group-goals/invitations", get(handle_list_invitations))
        .route(
            "/group-goals/{goal_id}/stats",
            get(handle_get_group_goal_stats),
        )
        .route(
            "/group-goals/{goal_id}/participants",
            post(handle_add_participant),
        )
        .route(
            "/group-goals/{goal_id}/participants/{user_id}",
            axum::routing::delete(handle_remove_participant),
        )
        .route(
            "/group-goals/{goal_id}/invitation",
            post(handle_respond_to_invitation),
        )
        .route("/profiles/{user_id}/stats", get(handle_get_profile_stats))
        .route("/profiles/me/blog-posts", post(handle_record_blog_posts))
        .route("/notifications", get(handle_list_notifications))
        .route("/notifications/read", post(handle_mark_notifications_read))
        .with_state(app_state)
}
