// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event serialization round trips.

use goaltrack::{Command, TransitionResult};
use goaltrack_audit::AuditEvent;
use goaltrack_domain::GoalId;

use super::{create_test_goal, create_test_persistence, run};
use crate::{AuditLog, PersistenceError};

#[test]
fn test_audit_event_round_trips() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");

    let event_id: i64 = persistence
        .append_audit_event(&created.audit_event)
        .unwrap();
    let loaded: AuditEvent = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(loaded.event_id, Some(event_id));
    assert_eq!(loaded, created.audit_event.clone().with_event_id(event_id));
}

#[test]
fn test_goal_trail_is_oldest_first_and_survives_delete() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");
    let completed: TransitionResult = run(created.goal(), Command::CompleteGoal, "alice");
    let deleted: TransitionResult = run(completed.goal(), Command::DeleteGoal, "alice");
    let unrelated: TransitionResult = create_test_goal("g2", "alice");

    for result in [&created, &completed, &deleted, &unrelated] {
        persistence.append_audit_event(&result.audit_event).unwrap();
    }

    let trail: Vec<AuditEvent> = persistence.goal_audit_trail(&GoalId::new("g1")).unwrap();
    let actions: Vec<&str> = trail.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(actions, vec!["create_goal", "complete_goal", "delete_goal"]);
    assert!(trail[0].before.is_none());
    assert!(trail[2].after.is_none());
}

#[test]
fn test_unknown_audit_event_is_not_found() {
    let mut persistence = create_test_persistence();
    let result = persistence.get_audit_event(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
