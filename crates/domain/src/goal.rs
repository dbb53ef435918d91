// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The goal aggregate root.
//!
//! A [`Goal`] owns its steps, habit days, activity log and (for group goals)
//! its roster. Derived state is never written directly: every mutation that
//! touches the step list recomputes `progress` before returning.

use crate::error::DomainError;
use crate::habit::HabitDay;
use crate::participant::{GroupRoster, GroupSettings};
use crate::progress::compute_progress;
use crate::types::{
    ActivityEntry, ActivityType, GoalDetails, GoalId, GoalType, GoalValue, HabitSchedule, Privacy,
    StepId, UserId,
};
use crate::validation::{validate_goal_details, validate_step_text, validate_steps};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// One checklist item of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Step {
    /// Creates an incomplete step.
    #[must_use]
    pub fn new(id: StepId, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            is_completed: false,
        }
    }
}

/// Solo or group. Group-only state lives inside the `Group` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    Solo,
    Group(GroupRoster),
}

/// Client-supplied fields for a new goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub details: GoalDetails,
    pub goal_type: GoalType,
    pub value: GoalValue,
    pub habit_schedule: HabitSchedule,
    /// Initial steps. Completion flags are taken as given.
    pub steps: Vec<Step>,
}

/// Partial update of a goal's editable fields. `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub image: Option<String>,
    pub reward: Option<String>,
    pub consequence: Option<String>,
    pub privacy: Option<Privacy>,
    pub goal_type: Option<GoalType>,
    pub value: Option<GoalValue>,
    pub habit_schedule: Option<HabitSchedule>,
    /// Replaces the whole step list.
    pub steps: Option<Vec<Step>>,
    /// Group goals only.
    pub group_settings: Option<GroupSettings>,
}

/// The goal aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub(crate) id: GoalId,
    pub(crate) owner_id: UserId,
    pub(crate) details: GoalDetails,
    pub(crate) goal_type: GoalType,
    pub(crate) value: GoalValue,
    pub(crate) habit_schedule: HabitSchedule,
    pub(crate) steps: Vec<Step>,
    pub(crate) habit_days: Vec<HabitDay>,
    pub(crate) progress: u8,
    pub(crate) is_completed: bool,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub(crate) completed_date: Option<OffsetDateTime>,
    pub(crate) is_archived: bool,
    pub(crate) activity: Vec<ActivityEntry>,
    pub(crate) kind: GoalKind,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

impl Goal {
    /// Creates a new goal from a validated draft.
    ///
    /// # Arguments
    ///
    /// * `id` - The new goal's identifier
    /// * `owner_id` - The creating user
    /// * `draft` - The client-supplied fields
    /// * `kind` - Solo, or group with its initial roster
    /// * `now` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the details or steps fail validation.
    pub fn create(
        id: GoalId,
        owner_id: UserId,
        draft: GoalDraft,
        kind: GoalKind,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_goal_details(&draft.details)?;
        validate_steps(&draft.steps)?;

        let progress: u8 = compute_progress(&draft.steps);
        Ok(Self {
            id,
            owner_id,
            details: draft.details,
            goal_type: draft.goal_type,
            value: draft.value,
            habit_schedule: draft.habit_schedule,
            steps: draft.steps,
            habit_days: Vec::new(),
            progress,
            is_completed: false,
            completed_date: None,
            is_archived: false,
            activity: Vec::new(),
            kind,
            created_at: now,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &GoalId {
        &self.id
    }

    #[must_use]
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    #[must_use]
    pub const fn details(&self) -> &GoalDetails {
        &self.details
    }

    #[must_use]
    pub const fn goal_type(&self) -> GoalType {
        self.goal_type
    }

    #[must_use]
    pub const fn value(&self) -> GoalValue {
        self.value
    }

    #[must_use]
    pub const fn habit_schedule(&self) -> &HabitSchedule {
        &self.habit_schedule
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn habit_days(&self) -> &[HabitDay] {
        &self.habit_days
    }

    /// Returns the derived progress percentage.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    #[must_use]
    pub const fn completed_date(&self) -> Option<OffsetDateTime> {
        self.completed_date
    }

    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
    }

    #[must_use]
    pub fn activity(&self) -> &[ActivityEntry] {
        &self.activity
    }

    #[must_use]
    pub const fn kind(&self) -> &GoalKind {
        &self.kind
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns whether this is a group goal.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, GoalKind::Group(_))
    }

    /// Returns the roster of a group goal.
    #[must_use]
    pub const fn roster(&self) -> Option<&GroupRoster> {
        match &self.kind {
            GoalKind::Solo => None,
            GoalKind::Group(roster) => Some(roster),
        }
    }

    /// Returns the roster of a group goal for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotGroupGoal` for a solo goal.
    pub fn roster_mut(&mut self) -> Result<&mut GroupRoster, DomainError> {
        match &mut self.kind {
            GoalKind::Solo => Err(DomainError::NotGroupGoal(self.id.clone())),
            GoalKind::Group(roster) => Ok(roster),
        }
    }

    /// Returns whether the goal counts toward `activeGoalsNow`.
    #[must_use]
    pub const fn is_active_for_ledger(&self) -> bool {
        !self.is_completed && !self.is_archived
    }

    /// Returns whether `user_id` may read this goal.
    ///
    /// Solo goals are visible to their owner, group goals to anyone on the roster.
    #[must_use]
    pub fn is_visible_to(&self, user_id: &UserId) -> bool {
        match &self.kind {
            GoalKind::Solo => &self.owner_id == user_id,
            GoalKind::Group(roster) => roster.participant(user_id).is_some(),
        }
    }

    /// Fails unless `user_id` owns the goal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotGoalOwner` otherwise.
    pub fn require_owner(&self, user_id: &UserId) -> Result<(), DomainError> {
        if &self.owner_id != user_id {
            return Err(DomainError::NotGoalOwner {
                goal_id: self.id.clone(),
                user_id: user_id.clone(),
            });
        }
        Ok(())
    }

    /// Fails unless `user_id` may work on steps and habit days.
    ///
    /// # Errors
    ///
    /// Returns `NotGoalOwner` for a solo goal the user does not own, or the
    /// roster error for a group goal the user has not joined.
    pub fn require_contributor(&self, user_id: &UserId) -> Result<(), DomainError> {
        match &self.kind {
            GoalKind::Solo => self.require_owner(user_id),
            GoalKind::Group(roster) => roster.require_accepted(&self.id, user_id).map(|_| ()),
        }
    }

    /// Fails unless `user_id` may complete, archive, or edit the goal.
    ///
    /// # Errors
    ///
    /// Returns `NotGoalOwner` for a solo goal the user does not own. For a
    /// group goal returns `NotParticipant` or `PermissionDenied`.
    pub fn require_manager(&self, user_id: &UserId) -> Result<(), DomainError> {
        match &self.kind {
            GoalKind::Solo => self.require_owner(user_id),
            GoalKind::Group(roster) => {
                let participant = roster.require_accepted(&self.id, user_id)?;
                if !participant.role.can_manage_goal() {
                    return Err(DomainError::PermissionDenied {
                        user_id: user_id.clone(),
                        operation: "manage this goal",
                    });
                }
                Ok(())
            }
        }
    }

    /// Marks the goal completed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GoalAlreadyCompleted` if it already is.
    pub fn complete(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.is_completed {
            return Err(DomainError::GoalAlreadyCompleted(self.id.clone()));
        }
        self.is_completed = true;
        self.completed_date = Some(now);
        Ok(())
    }

    /// Archives the goal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GoalAlreadyArchived` if it already is.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.is_archived {
            return Err(DomainError::GoalAlreadyArchived(self.id.clone()));
        }
        self.is_archived = true;
        Ok(())
    }

    /// Restores an archived goal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GoalNotArchived` if it is not archived.
    pub fn unarchive(&mut self) -> Result<(), DomainError> {
        if !self.is_archived {
            return Err(DomainError::GoalNotArchived(self.id.clone()));
        }
        self.is_archived = false;
        Ok(())
    }

    /// Applies a partial update of the editable fields.
    ///
    /// Progress, completion, archive state, activity, and the roster are
    /// never touched here. A replaced step list recomputes progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting details or steps are invalid, or if
    /// group settings are supplied for a solo goal.
    pub fn apply_update(&mut self, update: GoalUpdate) -> Result<(), DomainError> {
        let mut details: GoalDetails = self.details.clone();
        if let Some(name) = update.name {
            details.name = name;
        }
        if let Some(category) = update.category {
            details.category = category;
        }
        if let Some(description) = update.description {
            details.description = Some(description);
        }
        if let Some(start_date) = update.start_date {
            details.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            details.end_date = Some(end_date);
        }
        if let Some(image) = update.image {
            details.image = Some(image);
        }
        if let Some(reward) = update.reward {
            details.reward = Some(reward);
        }
        if let Some(consequence) = update.consequence {
            details.consequence = Some(consequence);
        }
        if let Some(privacy) = update.privacy {
            details.privacy = privacy;
        }
        validate_goal_details(&details)?;
        if let Some(steps) = &update.steps {
            validate_steps(steps)?;
        }
        if let Some(settings) = update.group_settings {
            self.roster_mut()?.replace_settings(settings)?;
        }

        self.details = details;
        if let Some(goal_type) = update.goal_type {
            self.goal_type = goal_type;
        }
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(habit_schedule) = update.habit_schedule {
            self.habit_schedule = habit_schedule;
        }
        if let Some(steps) = update.steps {
            self.steps = steps;
            self.recompute_progress();
        }
        Ok(())
    }

    /// Appends a new incomplete step.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank or the id is already used.
    pub fn add_step(&mut self, id: StepId, text: &str) -> Result<&Step, DomainError> {
        validate_step_text(text)?;
        if self.steps.iter().any(|s| s.id == id) {
            return Err(DomainError::DuplicateStepId(id));
        }
        self.steps.push(Step::new(id, text));
        self.recompute_progress();
        let last: usize = self.steps.len() - 1;
        Ok(&self.steps[last])
    }

    /// Changes a step's text. Progress is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank or the step does not exist.
    pub fn edit_step(&mut self, step_id: &StepId, text: &str) -> Result<(), DomainError> {
        validate_step_text(text)?;
        let step: &mut Step = self.step_mut(step_id)?;
        step.text = text.to_string();
        Ok(())
    }

    /// Removes a step and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepNotFound` if the step does not exist.
    pub fn remove_step(&mut self, step_id: &StepId) -> Result<Step, DomainError> {
        let index: usize = self
            .steps
            .iter()
            .position(|s| &s.id == step_id)
            .ok_or_else(|| self.step_not_found(step_id))?;
        let removed: Step = self.steps.remove(index);
        self.recompute_progress();
        Ok(removed)
    }

    /// Sets a step's completion flag and logs the activity.
    ///
    /// Returns whether the flag actually changed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepNotFound` if the step does not exist.
    pub fn set_step_completed(
        &mut self,
        step_id: &StepId,
        is_completed: bool,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let step: &mut Step = self.step_mut(step_id)?;
        let changed: bool = step.is_completed != is_completed;
        step.is_completed = is_completed;

        let activity_type: ActivityType = if is_completed {
            ActivityType::MarkStep
        } else {
            ActivityType::UnmarkStep
        };
        self.record_activity(activity_type, now);
        self.recompute_progress();
        Ok(changed)
    }

    pub(crate) fn record_activity(&mut self, activity_type: ActivityType, date: OffsetDateTime) {
        self.activity.push(ActivityEntry {
            activity_type,
            date,
        });
    }

    fn recompute_progress(&mut self) {
        self.progress = compute_progress(&self.steps);
    }

    fn step_mut(&mut self, step_id: &StepId) -> Result<&mut Step, DomainError> {
        let not_found: DomainError = self.step_not_found(step_id);
        self.steps
            .iter_mut()
            .find(|s| &s.id == step_id)
            .ok_or(not_found)
    }

    fn step_not_found(&self, step_id: &StepId) -> DomainError {
        DomainError::StepNotFound {
            goal_id: self.id.clone(),
            step_id: step_id.clone(),
        }
    }
}
