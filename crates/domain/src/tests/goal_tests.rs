// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_draft, create_test_goal, create_test_group_goal, create_test_step, test_now,
};
use crate::{
    ActivityType, DomainError, Goal, GoalId, GoalKind, GoalType, GoalUpdate, GoalValue,
    GroupSettings, InvitationStatus, StepId, UserId,
};
use time::macros::{date, datetime};

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_derives_progress_from_initial_steps() {
    let goal: Goal = create_test_goal(vec![
        create_test_step("a", true),
        create_test_step("b", false),
    ]);

    assert_eq!(goal.progress(), 50);
    assert!(!goal.is_completed());
    assert!(!goal.is_archived());
    assert!(goal.is_active_for_ledger());
    assert!(goal.activity().is_empty());
}

#[test]
fn test_create_rejects_duplicate_step_ids() {
    let result: Result<Goal, DomainError> = Goal::create(
        GoalId::new("goal-1"),
        UserId::new("owner"),
        create_test_draft(
            GoalType::Regular,
            vec![create_test_step("a", false), create_test_step("a", true)],
        ),
        GoalKind::Solo,
        test_now(),
    );

    assert!(matches!(result, Err(DomainError::DuplicateStepId(_))));
}

#[test]
fn test_goal_value_range() {
    assert!(GoalValue::new(0).is_err());
    assert!(GoalValue::new(1).is_ok());
    assert!(GoalValue::new(500).is_ok());
    assert!(matches!(
        GoalValue::new(501),
        Err(DomainError::InvalidGoalValue { value: 501 })
    ));
    assert_eq!(GoalValue::default().value(), 100);
    assert_eq!(GoalValue::new(105).unwrap().increment_reward(), 10);
    assert_eq!(GoalValue::new(9).unwrap().increment_reward(), 0);
}

#[test]
fn test_goal_value_rejected_when_deserializing() {
    let result: Result<GoalValue, serde_json::Error> = serde_json::from_str("900");
    assert!(result.is_err());
}

#[test]
fn test_goal_round_trips_through_json_document() {
    let mut goal: Goal = create_test_group_goal(&["alice"]);
    goal.add_step(StepId::new("a"), "First").unwrap();

    let json: String = serde_json::to_string(&goal).unwrap();
    let restored: Goal = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, goal);
}

// ============================================================================
// Lifecycle flags
// ============================================================================

#[test]
fn test_complete_sets_completed_date_once() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let first = datetime!(2024-03-20 09:00 UTC);

    goal.complete(first).unwrap();
    assert!(goal.is_completed());
    assert_eq!(goal.completed_date(), Some(first));

    let result = goal.complete(datetime!(2024-03-21 09:00 UTC));
    assert!(matches!(result, Err(DomainError::GoalAlreadyCompleted(_))));
    assert_eq!(goal.completed_date(), Some(first));
}

#[test]
fn test_archive_and_unarchive_are_not_repeatable() {
    let mut goal: Goal = create_test_goal(Vec::new());

    assert!(matches!(
        goal.unarchive(),
        Err(DomainError::GoalNotArchived(_))
    ));
    goal.archive().unwrap();
    assert!(!goal.is_active_for_ledger());
    assert!(matches!(
        goal.archive(),
        Err(DomainError::GoalAlreadyArchived(_))
    ));
    goal.unarchive().unwrap();
    assert!(goal.is_active_for_ledger());
}

#[test]
fn test_completed_and_archived_are_independent() {
    let mut goal: Goal = create_test_goal(Vec::new());
    goal.complete(test_now()).unwrap();
    goal.archive().unwrap();
    goal.unarchive().unwrap();

    assert!(goal.is_completed());
    assert!(!goal.is_archived());
    assert!(!goal.is_active_for_ledger());
}

// ============================================================================
// Steps
// ============================================================================

#[test]
fn test_set_step_completed_reports_change_and_logs_activity() {
    let mut goal: Goal = create_test_goal(vec![create_test_step("a", false)]);
    let step_id: StepId = StepId::new("a");

    assert!(goal.set_step_completed(&step_id, true, test_now()).unwrap());
    assert!(!goal.set_step_completed(&step_id, true, test_now()).unwrap());
    assert!(goal.set_step_completed(&step_id, false, test_now()).unwrap());

    let kinds: Vec<ActivityType> = goal.activity().iter().map(|a| a.activity_type).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityType::MarkStep,
            ActivityType::MarkStep,
            ActivityType::UnmarkStep
        ]
    );
}

#[test]
fn test_unknown_step_is_not_found() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let missing: StepId = StepId::new("missing");

    assert!(matches!(
        goal.remove_step(&missing),
        Err(DomainError::StepNotFound { .. })
    ));
    assert!(matches!(
        goal.edit_step(&missing, "text"),
        Err(DomainError::StepNotFound { .. })
    ));
    assert!(matches!(
        goal.set_step_completed(&missing, true, test_now()),
        Err(DomainError::StepNotFound { .. })
    ));
}

#[test]
fn test_add_step_rejects_blank_text() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let result = goal.add_step(StepId::new("a"), "   ");
    assert!(matches!(result, Err(DomainError::InvalidStepText(_))));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_replaces_steps_and_recomputes_progress() {
    let mut goal: Goal = create_test_goal(vec![create_test_step("a", false)]);
    goal.complete(test_now()).unwrap();

    let update: GoalUpdate = GoalUpdate {
        name: Some(String::from("Run two marathons")),
        value: Some(GoalValue::new(250).unwrap()),
        steps: Some(vec![
            create_test_step("x", true),
            create_test_step("y", true),
            create_test_step("z", false),
            create_test_step("w", false),
        ]),
        ..GoalUpdate::default()
    };
    goal.apply_update(update).unwrap();

    assert_eq!(goal.details().name, "Run two marathons");
    assert_eq!(goal.value().value(), 250);
    assert_eq!(goal.progress(), 50);
    assert!(goal.is_completed());
}

#[test]
fn test_update_rejects_inverted_date_range_without_partial_write() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let update: GoalUpdate = GoalUpdate {
        name: Some(String::from("Changed")),
        end_date: Some(date!(2024-01-01)),
        ..GoalUpdate::default()
    };

    let result = goal.apply_update(update);
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    assert_eq!(goal.details().name, "Run a marathon");
}

#[test]
fn test_update_group_settings_on_solo_goal_fails() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let update: GoalUpdate = GoalUpdate {
        group_settings: Some(GroupSettings::default()),
        ..GoalUpdate::default()
    };
    assert!(matches!(
        goal.apply_update(update),
        Err(DomainError::NotGroupGoal(_))
    ));
}

// ============================================================================
// Access rules
// ============================================================================

#[test]
fn test_solo_goal_access_is_owner_only() {
    let goal: Goal = create_test_goal(Vec::new());
    let stranger: UserId = UserId::new("stranger");

    assert!(goal.is_visible_to(&UserId::new("owner")));
    assert!(!goal.is_visible_to(&stranger));
    assert!(matches!(
        goal.require_contributor(&stranger),
        Err(DomainError::NotGoalOwner { .. })
    ));
    assert!(matches!(
        goal.require_manager(&stranger),
        Err(DomainError::NotGoalOwner { .. })
    ));
}

#[test]
fn test_group_goal_pending_participant_cannot_contribute() {
    let goal: Goal = create_test_group_goal(&["alice"]);
    let alice: UserId = UserId::new("alice");

    assert!(goal.is_visible_to(&alice));
    assert_eq!(
        goal.roster().unwrap().participant(&alice).unwrap().invitation_status,
        InvitationStatus::Pending
    );
    assert!(matches!(
        goal.require_contributor(&alice),
        Err(DomainError::ParticipationNotAccepted { .. })
    ));
}

#[test]
fn test_group_goal_member_cannot_manage() {
    let mut goal: Goal = create_test_group_goal(&["alice"]);
    let alice: UserId = UserId::new("alice");
    goal.roster_mut()
        .unwrap()
        .respond(&alice, InvitationStatus::Accepted, test_now())
        .unwrap();

    assert!(goal.require_contributor(&alice).is_ok());
    assert!(matches!(
        goal.require_manager(&alice),
        Err(DomainError::PermissionDenied { .. })
    ));
    assert!(goal.require_manager(&UserId::new("owner")).is_ok());
}
