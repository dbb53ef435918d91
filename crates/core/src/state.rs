// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::effects::{LedgerEffect, NotificationIntent};
use goaltrack_audit::AuditEvent;
use goaltrack_domain::Goal;

/// What the store must do with the goal document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Insert a new document.
    Created(Goal),
    /// Replace the existing document.
    Updated(Goal),
    /// Delete the document. Carries the goal as it was before deletion.
    Deleted(Goal),
}

/// The result of applying a command.
///
/// The transition itself is pure: nothing here has been persisted yet.
/// Callers save the goal first, then apply the ledger effects, then dispatch
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new goal state and how to persist it.
    pub outcome: GoalOutcome,
    /// Ledger changes, in the order they should be applied.
    pub ledger_effects: Vec<LedgerEffect>,
    /// Notifications to deliver, best-effort.
    pub notifications: Vec<NotificationIntent>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

impl TransitionResult {
    /// Returns the goal carried by the outcome.
    #[must_use]
    pub const fn goal(&self) -> &Goal {
        match &self.outcome {
            GoalOutcome::Created(goal)
            | GoalOutcome::Updated(goal)
            | GoalOutcome::Deleted(goal) => goal,
        }
    }
}
