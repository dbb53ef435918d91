// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal tracking operations.
//!
//! Every mutation follows the same path: load the goal, run the pure
//! transition in the core crate, write the resulting document, append the
//! audit event, apply ledger effects through [`StatsLedger`], and finally
//! dispatch notifications. Notification failures are logged and swallowed.

use std::str::FromStr;

use goaltrack::{
    Command, CreateCommand, GoalOutcome, NotificationIntent, TransitionResult, apply,
    apply_create, ensure_visible, group_goal_stats, habit_stats,
};
use goaltrack_audit::AuditEvent;
use goaltrack_domain::{
    Goal, GoalDetails, GoalDraft, GoalId, GoalStatusFilter, GoalUpdate, GoalValue,
    GroupGoalStats, HabitSchedule, HabitStats, InvitationStatus, ParticipantRole, Step, StepId,
    UserId,
};
use goaltrack_persistence::{
    AuditLog, GoalFilter, GoalScope, GoalStore, ImageStore, NotificationData, NotificationSink,
    PageRequest, ProfileStore, UserStatsStore,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::RequestContext;
use crate::capabilities::compute_goal_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::ledger::StatsLedger;
use crate::request_response::{
    AddParticipantRequest, AddStepRequest, AuditTrailResponse, CreateGoalRequest,
    CreateGroupGoalRequest, DEFAULT_LIMIT, DEFAULT_PAGE, DeleteGoalResponse, EditStepRequest,
    GoalInfo, GoalListResponse, GoalResponse, ListGoalsQuery, ListNotificationsQuery, MAX_LIMIT,
    MIN_PAGE, MarkHabitDayRequest, MarkNotificationsReadRequest, MarkNotificationsReadResponse,
    NotificationListResponse, RecordBlogPostsRequest, RespondToInvitationRequest, StepInput,
    ToggleStepRequest, UpdateGoalRequest, UploadImageResponse, UserStatsResponse,
};

/// Every collaborator an operation may touch.
pub trait Stores:
    GoalStore + UserStatsStore + ProfileStore + NotificationSink + ImageStore + AuditLog
{
}

impl<T> Stores for T where
    T: GoalStore + UserStatsStore + ProfileStore + NotificationSink + ImageStore + AuditLog
{
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn load_goal<S: Stores>(store: &mut S, goal_id: &GoalId) -> Result<Goal, ApiError> {
    store
        .find_goal(goal_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Goal"),
            message: format!("Goal '{goal_id}' not found"),
        })
}

fn goal_response(goal: &Goal, user_id: &UserId) -> GoalResponse {
    GoalResponse {
        goal: GoalInfo::from(goal),
        capabilities: compute_goal_capabilities(goal, user_id),
    }
}

fn dispatch_notifications<S: Stores>(
    store: &mut S,
    intents: &[NotificationIntent],
    now: OffsetDateTime,
) {
    for intent in intents {
        if let Err(e) = store.notify(intent, now) {
            warn!(
                recipient = %intent.recipient,
                kind = intent.kind.as_str(),
                error = %e,
                "Failed to deliver notification"
            );
        }
    }
}

/// Persists a transition and runs its side effects.
///
/// Once the goal write succeeds, the audit append and every ledger effect
/// are attempted. Notifications are dispatched, then the first audit or
/// ledger failure is reported.
fn commit<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    result: TransitionResult,
) -> Result<Goal, ApiError> {
    let TransitionResult {
        outcome,
        ledger_effects,
        notifications,
        audit_event,
    } = result;

    let goal: Goal = match outcome {
        GoalOutcome::Created(goal) => {
            store
                .insert_goal(&goal, ctx.now)
                .map_err(translate_persistence_error)?;
            goal
        }
        GoalOutcome::Updated(goal) => {
            store
                .update_goal(&goal, ctx.now)
                .map_err(translate_persistence_error)?;
            goal
        }
        GoalOutcome::Deleted(goal) => {
            store
                .delete_goal(goal.id())
                .map_err(translate_persistence_error)?;
            goal
        }
    };

    let audit_result: Result<(), ApiError> = match store.append_audit_event(&audit_event) {
        Ok(event_id) => {
            info!(
                goal_id = %goal.id(),
                user_id = %ctx.user_id(),
                action = %audit_event.action.name,
                event_id,
                "Goal transition committed"
            );
            Ok(())
        }
        Err(e) => {
            error!(
                goal_id = %goal.id(),
                action = %audit_event.action.name,
                error = %e,
                "Failed to append audit event"
            );
            Err(translate_persistence_error(e))
        }
    };

    let ledger_result: Result<(), ApiError> =
        StatsLedger::new(store, ctx.now).apply_effects(&ledger_effects);
    dispatch_notifications(store, &notifications, ctx.now);
    audit_result?;
    ledger_result?;

    Ok(goal)
}

fn mutate<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    command: Command,
) -> Result<Goal, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;
    let result: TransitionResult = apply(
        &goal,
        command,
        ctx.actor.to_audit_actor(),
        ctx.cause.clone(),
        ctx.now,
    )
    .map_err(translate_core_error)?;
    commit(store, ctx, result)
}

fn parse_goal_value(value: Option<u16>) -> Result<Option<GoalValue>, ApiError> {
    value
        .map(GoalValue::new)
        .transpose()
        .map_err(translate_domain_error)
}

fn build_steps(inputs: &[StepInput]) -> Vec<Step> {
    inputs
        .iter()
        .map(|input| Step {
            id: StepId::new(input.id.as_deref().unwrap_or(&new_id())),
            text: input.text.clone(),
            is_completed: input.is_completed,
        })
        .collect()
}

fn build_draft(request: &CreateGoalRequest, now: OffsetDateTime) -> Result<GoalDraft, ApiError> {
    let start_date: Date = request.start_date.unwrap_or_else(|| now.date());
    let details: GoalDetails = GoalDetails {
        name: request.goal_name.clone(),
        category: request.category.clone(),
        description: request.description.clone(),
        start_date,
        end_date: request.end_date,
        image: request.image.clone(),
        reward: request.reward.clone(),
        consequence: request.consequence.clone(),
        privacy: request.privacy.unwrap_or_default(),
    };

    Ok(GoalDraft {
        details,
        goal_type: request.goal_type.unwrap_or_default(),
        value: parse_goal_value(request.value)?.unwrap_or_default(),
        habit_schedule: HabitSchedule {
            days_of_week: request.habit_days_of_week.clone(),
            duration_days: request.habit_duration,
        },
        steps: build_steps(&request.steps),
    })
}

fn resolve_page(page: Option<u32>, limit: Option<u32>) -> Result<PageRequest, ApiError> {
    let page: u32 = page.unwrap_or(DEFAULT_PAGE);
    let limit: u32 = limit.unwrap_or(DEFAULT_LIMIT);
    if page < MIN_PAGE {
        return Err(ApiError::InvalidInput {
            field: String::from("page"),
            message: format!("page must be at least {MIN_PAGE}"),
        });
    }
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: format!("limit must be between 1 and {MAX_LIMIT}"),
        });
    }
    Ok(PageRequest { page, limit })
}

fn resolve_filter(filter: Option<&str>) -> Result<GoalStatusFilter, ApiError> {
    filter.map_or(Ok(GoalStatusFilter::default()), |f| {
        GoalStatusFilter::from_str(f).map_err(translate_domain_error)
    })
}

fn list_page<S: Stores>(
    store: &mut S,
    filter: &GoalFilter,
    page: PageRequest,
) -> Result<GoalListResponse, ApiError> {
    let total: u64 = store
        .count_goals(filter)
        .map_err(translate_persistence_error)?;
    let goals: Vec<Goal> = store
        .find_goals(filter, page)
        .map_err(translate_persistence_error)?;
    debug!(?filter, total, returned = goals.len(), "Listed goals");
    Ok(GoalListResponse::new(
        goals.iter().map(GoalInfo::from).collect(),
        total,
        page.page,
        page.limit,
    ))
}

// ============================================================================
// Goal creation and reads
// ============================================================================

/// Creates a solo goal owned by the caller.
///
/// # Errors
///
/// Returns `InvalidInput` if a field fails validation, or an error if the
/// store fails.
pub fn create_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    request: &CreateGoalRequest,
) -> Result<GoalResponse, ApiError> {
    let command: CreateCommand = CreateCommand::CreateGoal {
        goal_id: GoalId::new(&new_id()),
        draft: build_draft(request, ctx.now)?,
    };
    let result: TransitionResult = apply_create(
        command,
        ctx.actor.to_audit_actor(),
        ctx.cause.clone(),
        ctx.now,
    )
    .map_err(translate_core_error)?;
    let goal: Goal = commit(store, ctx, result)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Creates a group goal owned by the caller and invites `request.invitees`.
///
/// # Errors
///
/// Returns `InvalidInput` if a field or the group settings fail validation,
/// `InvalidOperation` if the invitees exceed the participant cap, or an error
/// if the store fails.
pub fn create_group_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    request: &CreateGroupGoalRequest,
) -> Result<GoalResponse, ApiError> {
    let command: CreateCommand = CreateCommand::CreateGroupGoal {
        goal_id: GoalId::new(&new_id()),
        draft: build_draft(&request.goal, ctx.now)?,
        invitees: request
            .invitees
            .iter()
            .map(|id| UserId::new(id.trim()))
            .collect(),
        settings: request.group_settings.unwrap_or_default(),
    };
    let result: TransitionResult = apply_create(
        command,
        ctx.actor.to_audit_actor(),
        ctx.cause.clone(),
        ctx.now,
    )
    .map_err(translate_core_error)?;
    let goal: Goal = commit(store, ctx, result)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Returns a goal with the caller's capabilities on it.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the goal is missing or not visible to the caller.
pub fn get_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<GoalResponse, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;
    ensure_visible(&goal, ctx.user_id()).map_err(translate_core_error)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Lists the caller's solo goals, newest first.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown filter or out-of-range paging.
pub fn list_goals<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    query: &ListGoalsQuery,
) -> Result<GoalListResponse, ApiError> {
    let status: GoalStatusFilter = resolve_filter(query.filter.as_deref())?;
    let page: PageRequest = resolve_page(query.page, query.limit)?;
    let filter: GoalFilter =
        GoalFilter::new(GoalScope::OwnedSolo(ctx.user_id().clone()), Some(status));
    list_page(store, &filter, page)
}

/// Lists every archived goal the caller owns, solo or group.
///
/// # Errors
///
/// Returns `InvalidInput` for out-of-range paging.
pub fn list_archived_goals<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    query: &ListGoalsQuery,
) -> Result<GoalListResponse, ApiError> {
    let page: PageRequest = resolve_page(query.page, query.limit)?;
    let filter: GoalFilter = GoalFilter::new(
        GoalScope::Owned(ctx.user_id().clone()),
        Some(GoalStatusFilter::Archived),
    );
    list_page(store, &filter, page)
}

/// Lists group goals the caller has joined.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown filter or out-of-range paging.
pub fn list_group_goals<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    query: &ListGoalsQuery,
) -> Result<GoalListResponse, ApiError> {
    let status: GoalStatusFilter = resolve_filter(query.filter.as_deref())?;
    let page: PageRequest = resolve_page(query.page, query.limit)?;
    let filter: GoalFilter =
        GoalFilter::new(GoalScope::GroupMember(ctx.user_id().clone()), Some(status));
    list_page(store, &filter, page)
}

/// Lists group goals where the caller's invitation is pending.
///
/// # Errors
///
/// Returns `InvalidInput` for out-of-range paging.
pub fn list_invitations<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    query: &ListGoalsQuery,
) -> Result<GoalListResponse, ApiError> {
    let page: PageRequest = resolve_page(query.page, query.limit)?;
    let filter: GoalFilter =
        GoalFilter::new(GoalScope::PendingInvitations(ctx.user_id().clone()), None);
    list_page(store, &filter, page)
}

// ============================================================================
// Goal lifecycle
// ============================================================================

/// Updates a goal's descriptive fields, value, schedule, settings, or steps.
///
/// Habit schedule fields that are not supplied keep their current values.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing or foreign solo goal,
/// `Forbidden` when a group member lacks manage rights, or `InvalidInput`
/// when a field fails validation.
pub fn update_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    request: &UpdateGoalRequest,
) -> Result<GoalResponse, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;

    let habit_schedule: Option<HabitSchedule> =
        if request.habit_days_of_week.is_some() || request.habit_duration.is_some() {
            let current: &HabitSchedule = goal.habit_schedule();
            Some(HabitSchedule {
                days_of_week: request
                    .habit_days_of_week
                    .clone()
                    .unwrap_or_else(|| current.days_of_week.clone()),
                duration_days: request.habit_duration.or(current.duration_days),
            })
        } else {
            None
        };

    let update: GoalUpdate = GoalUpdate {
        name: request.goal_name.clone(),
        category: request.category.clone(),
        description: request.description.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        image: request.image.clone(),
        reward: request.reward.clone(),
        consequence: request.consequence.clone(),
        privacy: request.privacy,
        goal_type: request.goal_type,
        value: parse_goal_value(request.value)?,
        habit_schedule,
        steps: request.steps.as_deref().map(build_steps),
        group_settings: request.group_settings,
    };

    let result: TransitionResult = apply(
        &goal,
        Command::UpdateGoal { update },
        ctx.actor.to_audit_actor(),
        ctx.cause.clone(),
        ctx.now,
    )
    .map_err(translate_core_error)?;
    let updated: Goal = commit(store, ctx, result)?;
    Ok(goal_response(&updated, ctx.user_id()))
}

/// Marks a goal completed and credits the owner.
///
/// # Errors
///
/// Returns `InvalidOperation` if the goal is already completed.
pub fn complete_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<GoalResponse, ApiError> {
    let goal: Goal = mutate(store, ctx, goal_id, Command::CompleteGoal)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Archives a goal.
///
/// # Errors
///
/// Returns `InvalidOperation` if the goal is already archived.
pub fn archive_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<GoalResponse, ApiError> {
    let goal: Goal = mutate(store, ctx, goal_id, Command::ArchiveGoal)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Restores an archived goal.
///
/// # Errors
///
/// Returns `InvalidOperation` if the goal is not archived.
pub fn unarchive_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<GoalResponse, ApiError> {
    let goal: Goal = mutate(store, ctx, goal_id, Command::UnarchiveGoal)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Deletes a goal permanently. Owner only.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the goal is missing or not owned by the caller.
pub fn delete_goal<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<DeleteGoalResponse, ApiError> {
    let goal: Goal = mutate(store, ctx, goal_id, Command::DeleteGoal)?;
    Ok(DeleteGoalResponse {
        goal_id: goal.id().to_string(),
        message: String::from("Goal deleted"),
    })
}

// ============================================================================
// Steps and habit days
// ============================================================================

/// Appends a new incomplete step with a fresh id.
///
/// # Errors
///
/// Returns `InvalidInput` for blank text, or a permission error.
pub fn add_step<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    request: &AddStepRequest,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::AddStep {
        step_id: StepId::new(&new_id()),
        text: request.text.clone(),
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Changes a step's text.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown step, `InvalidInput` for blank
/// text, or a permission error.
pub fn edit_step<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    step_id: &StepId,
    request: &EditStepRequest,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::EditStep {
        step_id: step_id.clone(),
        text: request.text.clone(),
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Removes a step and recomputes progress.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown step, or a permission error.
pub fn delete_step<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    step_id: &StepId,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::DeleteStep {
        step_id: step_id.clone(),
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Sets a step's completion flag, moving closed tasks, rating, and the
/// caller's contribution score.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown step, or a permission error.
pub fn toggle_step<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    step_id: &StepId,
    request: &ToggleStepRequest,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::ToggleStep {
        step_id: step_id.clone(),
        is_completed: request.is_completed,
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Records a habit day for the UTC date containing `request.date`.
///
/// # Errors
///
/// Returns `InvalidOperation` for a regular goal, or a permission error.
pub fn mark_habit_day<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    request: &MarkHabitDayRequest,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::MarkHabitDay {
        date: request.date,
        is_completed: request.is_completed,
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Returns streak statistics for a habit goal.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the goal is not visible to the caller, or
/// `InvalidOperation` for a regular goal.
pub fn get_habit_stats<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<HabitStats, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;
    habit_stats(&goal, ctx.user_id()).map_err(translate_core_error)
}

/// Lists a goal's audit events, oldest first. Owner only.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the goal is missing or not owned by the caller.
pub fn get_goal_audit_trail<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<AuditTrailResponse, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;
    goal.require_owner(ctx.user_id())
        .map_err(translate_domain_error)?;
    let events: Vec<AuditEvent> = store
        .goal_audit_trail(goal_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditTrailResponse {
        goal_id: goal_id.to_string(),
        events,
    })
}

// ============================================================================
// Group participants
// ============================================================================

/// Invites a user to a group goal.
///
/// A previously declined participant is re-invited in place.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown or `owner` role, `Forbidden` when
/// the caller may not invite, `InvalidOperation` for a solo goal or a full
/// roster, and `Conflict` for an existing participant.
pub fn add_participant<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    request: &AddParticipantRequest,
) -> Result<GoalResponse, ApiError> {
    let role: ParticipantRole = request
        .role
        .as_deref()
        .map_or(Ok(ParticipantRole::Member), ParticipantRole::from_str)
        .map_err(translate_domain_error)?;
    let command: Command = Command::AddParticipant {
        user_id: UserId::new(request.user_id.trim()),
        role,
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Accepts or declines the caller's invitation.
///
/// # Errors
///
/// Returns `InvalidInput` for a status other than `accepted` or `declined`,
/// `ResourceNotFound` if the caller has no invitation, and
/// `InvalidOperation` if it was already answered.
pub fn respond_to_invitation<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    request: &RespondToInvitationRequest,
) -> Result<GoalResponse, ApiError> {
    let status: InvitationStatus =
        InvitationStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let goal: Goal = mutate(
        store,
        ctx,
        goal_id,
        Command::RespondToInvitation { status },
    )?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Removes a participant from a group goal.
///
/// # Errors
///
/// Returns `InvalidOperation` when the target is the owner, `Forbidden`
/// when a member removes someone else, and `ResourceNotFound` for an
/// unknown target.
pub fn remove_participant<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
    target: &UserId,
) -> Result<GoalResponse, ApiError> {
    let command: Command = Command::RemoveParticipant {
        user_id: target.clone(),
    };
    let goal: Goal = mutate(store, ctx, goal_id, command)?;
    Ok(goal_response(&goal, ctx.user_id()))
}

/// Returns roster statistics for a group goal.
///
/// # Errors
///
/// Returns `InvalidOperation` for a solo goal and `Forbidden` when the
/// caller is not on the roster.
pub fn get_group_goal_stats<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    goal_id: &GoalId,
) -> Result<GroupGoalStats, ApiError> {
    let goal: Goal = load_goal(store, goal_id)?;
    group_goal_stats(&goal, ctx.user_id()).map_err(translate_core_error)
}

// ============================================================================
// Images, profiles, notifications
// ============================================================================

/// Stores an uploaded image and returns its reference.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty body or a non-image content type.
pub fn upload_image<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    content_type: &str,
    data: &[u8],
) -> Result<UploadImageResponse, ApiError> {
    if !content_type.starts_with("image/") {
        return Err(ApiError::InvalidInput {
            field: String::from("content_type"),
            message: format!("expected an image content type, got '{content_type}'"),
        });
    }
    if data.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("image"),
            message: String::from("image body is empty"),
        });
    }
    let image: String = store
        .store_image(content_type, data, ctx.now)
        .map_err(translate_persistence_error)?;
    debug!(user_id = %ctx.user_id(), image = %image, bytes = data.len(), "Stored image");
    Ok(UploadImageResponse { image })
}

/// Returns a user's ledger counters and rating.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_profile_stats<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    user_id: &UserId,
) -> Result<UserStatsResponse, ApiError> {
    StatsLedger::new(store, ctx.now).get_stats(user_id)
}

/// Adds to the caller's blog-post counter.
///
/// # Errors
///
/// Returns `InvalidInput` if `amount` is zero.
pub fn record_blog_posts<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    request: &RecordBlogPostsRequest,
) -> Result<UserStatsResponse, ApiError> {
    StatsLedger::new(store, ctx.now).record_blog_posts(ctx.user_id(), request.amount)
}

/// Lists the caller's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_notifications<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    query: ListNotificationsQuery,
) -> Result<NotificationListResponse, ApiError> {
    let notifications: Vec<NotificationData> = store
        .list_notifications(ctx.user_id(), query.unread_only)
        .map_err(translate_persistence_error)?;
    Ok(NotificationListResponse {
        user_id: ctx.user_id().clone(),
        notifications,
    })
}

/// Marks the caller's notifications read. Ids belonging to other users are ignored.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn mark_notifications_read<S: Stores>(
    store: &mut S,
    ctx: &RequestContext,
    request: &MarkNotificationsReadRequest,
) -> Result<MarkNotificationsReadResponse, ApiError> {
    let updated: usize = store
        .mark_notifications_read(ctx.user_id(), &request.ids)
        .map_err(translate_persistence_error)?;
    Ok(MarkNotificationsReadResponse { updated })
}
