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
    clippy::unwrap_used,
    clippy::expect_used
)]

use goaltrack_domain::{Goal, GoalId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The kind of entity that initiated a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    /// An authenticated end user.
    User,
    /// A background or administrative process.
    System,
}

impl ActorType {
    /// Converts this actor type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's identifier.
    pub user_id: UserId,
    /// The type of actor.
    pub actor_type: ActorType,
}

impl Actor {
    /// Creates an actor for an authenticated user.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            actor_type: ActorType::User,
        }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`complete_goal`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The accounting-relevant state of a goal at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub progress: u8,
    pub is_completed: bool,
    pub is_archived: bool,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub habit_days: usize,
    /// Roster size; zero for solo goals.
    pub participants: usize,
}

impl GoalSnapshot {
    /// Captures a goal's accounting-relevant state.
    #[must_use]
    pub fn of(goal: &Goal) -> Self {
        Self {
            progress: goal.progress(),
            is_completed: goal.is_completed(),
            is_archived: goal.is_archived(),
            total_steps: goal.steps().len(),
            completed_steps: goal.steps().iter().filter(|s| s.is_completed).count(),
            habit_days: goal.habit_days().len(),
            participants: goal.roster().map_or(0, |r| r.participants().len()),
        }
    }
}

/// An immutable audit event representing one goal transition.
///
/// Every successful transition produces exactly one audit event. `before`
/// is absent for creation and `after` is absent for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned by the store once persisted.
    pub event_id: Option<i64>,
    /// The goal the transition applied to.
    pub goal_id: GoalId,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: Option<GoalSnapshot>,
    /// The state after the transition.
    pub after: Option<GoalSnapshot>,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `goal_id` - The goal the transition applied to
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `occurred_at` - When the transition happened
    #[must_use]
    pub const fn new(
        goal_id: GoalId,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: Option<GoalSnapshot>,
        after: Option<GoalSnapshot>,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            goal_id,
            actor,
            cause,
            action,
            before,
            after,
            occurred_at,
        }
    }

    /// Returns a copy carrying the store-assigned identifier.
    #[must_use]
    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}
