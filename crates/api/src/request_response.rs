// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request types deserialize straight from JSON bodies and query strings.
//! Response types are flat, `snake_case`, and never expose the goal
//! document's storage layout.

use goaltrack_audit::AuditEvent;
use goaltrack_domain::{
    ActivityEntry, DayOfWeek, Goal, GoalDetails, GoalType, GroupSettings, HabitDay, Participant,
    Privacy, Step, UserId, UserStats, iso_date,
};
use goaltrack_persistence::{NotificationData, ProfileData};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Smallest accepted page number.
pub const MIN_PAGE: u32 = 1;
/// Page used when the client does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

// ============================================================================
// Goal requests
// ============================================================================

/// A step supplied with a new goal or a bulk step replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepInput {
    /// Existing step id to keep. A fresh id is assigned when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// API request to create a solo goal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGoalRequest {
    pub goal_name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to the request date.
    #[serde(with = "iso_date::option", default)]
    pub start_date: Option<Date>,
    #[serde(with = "iso_date::option", default)]
    pub end_date: Option<Date>,
    /// Image reference returned by the image upload endpoint.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub reward: Option<String>,
    #[serde(default)]
    pub consequence: Option<String>,
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default)]
    pub goal_type: Option<GoalType>,
    /// Reward weight, 1-500. Defaults to 100.
    #[serde(default)]
    pub value: Option<u16>,
    #[serde(default)]
    pub habit_days_of_week: Vec<DayOfWeek>,
    #[serde(default)]
    pub habit_duration: Option<u32>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

/// API request to create a group goal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGroupGoalRequest {
    #[serde(flatten)]
    pub goal: CreateGoalRequest,
    /// Users to invite as members.
    #[serde(default)]
    pub invitees: Vec<String>,
    #[serde(default)]
    pub group_settings: Option<GroupSettings>,
}

/// API request to update a goal. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct UpdateGoalRequest {
    pub goal_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(with = "iso_date::option")]
    pub start_date: Option<Date>,
    #[serde(with = "iso_date::option")]
    pub end_date: Option<Date>,
    pub image: Option<String>,
    pub reward: Option<String>,
    pub consequence: Option<String>,
    pub privacy: Option<Privacy>,
    pub goal_type: Option<GoalType>,
    pub value: Option<u16>,
    pub habit_days_of_week: Option<Vec<DayOfWeek>>,
    pub habit_duration: Option<u32>,
    /// Replaces the whole step list.
    pub steps: Option<Vec<StepInput>>,
    pub group_settings: Option<GroupSettings>,
}

/// API request to add a step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddStepRequest {
    pub text: String,
}

/// API request to change a step's text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditStepRequest {
    pub text: String,
}

/// API request to set a step's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ToggleStepRequest {
    pub is_completed: bool,
}

/// API request to record a habit day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MarkHabitDayRequest {
    /// Any instant on the day; normalized to the UTC calendar date.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub is_completed: bool,
}

/// Query parameters for goal listings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListGoalsQuery {
    /// `active`, `completed`, or `archived`. Defaults to `active`.
    pub filter: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ============================================================================
// Group requests
// ============================================================================

/// API request to invite a user to a group goal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddParticipantRequest {
    pub user_id: String,
    /// `admin` or `member`. Defaults to `member`.
    #[serde(default)]
    pub role: Option<String>,
}

/// API request to accept or decline an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RespondToInvitationRequest {
    /// `accepted` or `declined`.
    pub status: String,
}

// ============================================================================
// Profile and notification requests
// ============================================================================

/// API request to add to the caller's blog-post counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecordBlogPostsRequest {
    pub amount: u32,
}

/// Query parameters for notification polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListNotificationsQuery {
    pub unread_only: bool,
}

/// API request to mark notifications read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkNotificationsReadRequest {
    pub ids: Vec<i64>,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What the caller may do with one goal.
///
/// Advisory only; every operation re-checks permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalCapabilities {
    pub can_edit: Capability,
    pub can_complete: Capability,
    pub can_archive: Capability,
    pub can_unarchive: Capability,
    pub can_delete: Capability,
    pub can_manage_steps: Capability,
    pub can_mark_habit_days: Capability,
    pub can_invite: Capability,
    pub can_remove_participants: Capability,
    pub can_respond_to_invitation: Capability,
    pub can_view_audit_trail: Capability,
}

// ============================================================================
// Goal responses
// ============================================================================

/// A goal as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalInfo {
    pub goal_id: String,
    pub owner_id: String,
    pub goal_name: String,
    pub category: String,
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date::option")]
    pub end_date: Option<Date>,
    pub image: Option<String>,
    pub reward: Option<String>,
    pub consequence: Option<String>,
    pub privacy: Privacy,
    pub goal_type: GoalType,
    pub value: u16,
    pub habit_days_of_week: Vec<DayOfWeek>,
    pub habit_duration: Option<u32>,
    pub habit_completed_days: Vec<HabitDay>,
    pub steps: Vec<Step>,
    pub progress: u8,
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_date: Option<OffsetDateTime>,
    pub is_archived: bool,
    pub activity: Vec<ActivityEntry>,
    pub is_group: bool,
    /// Group goals only.
    pub participants: Option<Vec<Participant>>,
    /// Group goals only.
    pub group_settings: Option<GroupSettings>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Goal> for GoalInfo {
    fn from(goal: &Goal) -> Self {
        let details: &GoalDetails = goal.details();
        Self {
            goal_id: goal.id().to_string(),
            owner_id: goal.owner_id().to_string(),
            goal_name: details.name.clone(),
            category: details.category.clone(),
            description: details.description.clone(),
            start_date: details.start_date,
            end_date: details.end_date,
            image: details.image.clone(),
            reward: details.reward.clone(),
            consequence: details.consequence.clone(),
            privacy: details.privacy,
            goal_type: goal.goal_type(),
            value: goal.value().value(),
            habit_days_of_week: goal.habit_schedule().days_of_week.clone(),
            habit_duration: goal.habit_schedule().duration_days,
            habit_completed_days: goal.habit_days().to_vec(),
            steps: goal.steps().to_vec(),
            progress: goal.progress(),
            is_completed: goal.is_completed(),
            completed_date: goal.completed_date(),
            is_archived: goal.is_archived(),
            activity: goal.activity().to_vec(),
            is_group: goal.is_group(),
            participants: goal.roster().map(|r| r.participants().to_vec()),
            group_settings: goal.roster().map(|r| *r.settings()),
            created_at: goal.created_at(),
        }
    }
}

/// API response carrying one goal and the caller's capabilities on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalResponse {
    pub goal: GoalInfo,
    pub capabilities: GoalCapabilities,
}

/// API response for a deleted goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteGoalResponse {
    pub goal_id: String,
    pub message: String,
}

/// One page of goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalListResponse {
    pub goals: Vec<GoalInfo>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl GoalListResponse {
    /// Builds a page response, deriving the page count and navigation flags.
    #[must_use]
    pub fn new(goals: Vec<GoalInfo>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages: u64 = total.div_ceil(u64::from(limit.max(1)));
        Self {
            goals,
            total,
            page,
            limit,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_prev_page: page > MIN_PAGE,
        }
    }
}

/// API response listing a goal's audit events, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditTrailResponse {
    pub goal_id: String,
    pub events: Vec<AuditEvent>,
}

// ============================================================================
// Other responses
// ============================================================================

/// API response for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadImageResponse {
    /// Opaque reference to put in a goal's `image` field.
    pub image: String,
}

/// A user's ledger counters and rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStatsResponse {
    pub user_id: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub goals_created_this_month: u32,
    pub active_goals_now: u32,
    pub completed_goals: u32,
    pub closed_tasks: u32,
    pub blog_posts: u32,
    pub rating: i64,
}

impl UserStatsResponse {
    /// Combines a stats record with the matching profile.
    #[must_use]
    pub fn from_parts(stats: &UserStats, profile: &ProfileData) -> Self {
        Self {
            user_id: stats.user_id.to_string(),
            display_name: profile.display_name.clone(),
            avatar: profile.avatar.clone(),
            goals_created_this_month: stats.goals_created_this_month,
            active_goals_now: stats.active_goals_now,
            completed_goals: stats.completed_goals,
            closed_tasks: stats.closed_tasks,
            blog_posts: stats.blog_posts,
            rating: profile.rating,
        }
    }
}

/// API response for notification polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationListResponse {
    pub user_id: UserId,
    pub notifications: Vec<NotificationData>,
}

/// API response for marking notifications read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkNotificationsReadResponse {
    /// How many notifications changed from unread to read.
    pub updated: usize,
}
