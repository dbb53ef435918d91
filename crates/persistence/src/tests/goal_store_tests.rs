// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal document storage and listing filters.

use goaltrack::{Command, TransitionResult};
use goaltrack_domain::{Goal, GoalId, GoalStatusFilter, InvitationStatus, StepId, UserId};

use super::{create_test_goal, create_test_group_goal, create_test_persistence, run, test_now};
use crate::{GoalFilter, GoalScope, GoalStore, PageRequest, Persistence, PersistenceError};

fn insert(persistence: &mut Persistence, result: &TransitionResult) {
    persistence.insert_goal(result.goal(), test_now()).unwrap();
}

fn owned_solo(user: &str, status: GoalStatusFilter) -> GoalFilter {
    GoalFilter::new(GoalScope::OwnedSolo(UserId::new(user)), Some(status))
}

fn first_page() -> PageRequest {
    PageRequest { page: 1, limit: 10 }
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_inserted_goal_is_found_unchanged() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");
    let with_step: TransitionResult = run(
        created.goal(),
        Command::AddStep {
            step_id: StepId::new("s1"),
            text: String::from("Buy shoes"),
        },
        "alice",
    );
    insert(&mut persistence, &with_step);

    let found: Option<Goal> = persistence.find_goal(&GoalId::new("g1")).unwrap();
    assert_eq!(found.as_ref(), Some(with_step.goal()));
}

#[test]
fn test_missing_goal_is_none() {
    let mut persistence = create_test_persistence();
    let found: Option<Goal> = persistence.find_goal(&GoalId::new("nope")).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");
    insert(&mut persistence, &created);

    let result = persistence.insert_goal(created.goal(), test_now());
    assert!(matches!(result, Err(PersistenceError::DuplicateGoal(_))));
}

#[test]
fn test_update_replaces_document_and_projection() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");
    insert(&mut persistence, &created);

    let completed: TransitionResult = run(created.goal(), Command::CompleteGoal, "alice");
    persistence.update_goal(completed.goal(), test_now()).unwrap();

    let found: Goal = persistence.find_goal(&GoalId::new("g1")).unwrap().unwrap();
    assert!(found.is_completed());
    assert_eq!(
        persistence
            .count_goals(&owned_solo("alice", GoalStatusFilter::Completed))
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .count_goals(&owned_solo("alice", GoalStatusFilter::Active))
            .unwrap(),
        0
    );
}

#[test]
fn test_update_of_missing_goal_fails() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");

    let result = persistence.update_goal(created.goal(), test_now());
    assert!(matches!(result, Err(PersistenceError::GoalNotFound(_))));
}

#[test]
fn test_delete_removes_goal() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_group_goal("g1", "alice", &["bob"]);
    insert(&mut persistence, &created);

    persistence.delete_goal(&GoalId::new("g1")).unwrap();

    assert!(persistence.find_goal(&GoalId::new("g1")).unwrap().is_none());
    let pending: GoalFilter =
        GoalFilter::new(GoalScope::PendingInvitations(UserId::new("bob")), None);
    assert_eq!(persistence.count_goals(&pending).unwrap(), 0);
    assert!(matches!(
        persistence.delete_goal(&GoalId::new("g1")),
        Err(PersistenceError::GoalNotFound(_))
    ));
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_listing_is_newest_first_and_paged() {
    let mut persistence = create_test_persistence();
    for id in ["g1", "g2", "g3"] {
        insert(&mut persistence, &create_test_goal(id, "alice"));
    }
    insert(&mut persistence, &create_test_goal("other", "bob"));

    let filter: GoalFilter = owned_solo("alice", GoalStatusFilter::Active);
    let page_one: Vec<Goal> = persistence
        .find_goals(&filter, PageRequest { page: 1, limit: 2 })
        .unwrap();
    let page_two: Vec<Goal> = persistence
        .find_goals(&filter, PageRequest { page: 2, limit: 2 })
        .unwrap();

    let ids: Vec<&str> = page_one.iter().map(|g| g.id().as_str()).collect();
    assert_eq!(ids, vec!["g3", "g2"]);
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].id().as_str(), "g1");
    assert_eq!(persistence.count_goals(&filter).unwrap(), 3);
}

#[test]
fn test_solo_listing_excludes_group_goals() {
    let mut persistence = create_test_persistence();
    insert(&mut persistence, &create_test_goal("solo", "alice"));
    insert(&mut persistence, &create_test_group_goal("group", "alice", &[]));

    let solo: Vec<Goal> = persistence
        .find_goals(&owned_solo("alice", GoalStatusFilter::Active), first_page())
        .unwrap();
    assert_eq!(solo.len(), 1);
    assert_eq!(solo[0].id().as_str(), "solo");

    let owned_archived: GoalFilter = GoalFilter::new(
        GoalScope::Owned(UserId::new("alice")),
        Some(GoalStatusFilter::Archived),
    );
    assert_eq!(persistence.count_goals(&owned_archived).unwrap(), 0);
}

#[test]
fn test_completed_archived_goal_matches_archived_and_completed_filters() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_goal("g1", "alice");
    insert(&mut persistence, &created);
    let completed: TransitionResult = run(created.goal(), Command::CompleteGoal, "alice");
    let archived: TransitionResult = run(completed.goal(), Command::ArchiveGoal, "alice");
    persistence.update_goal(archived.goal(), test_now()).unwrap();

    assert_eq!(
        persistence
            .count_goals(&owned_solo("alice", GoalStatusFilter::Archived))
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .count_goals(&owned_solo("alice", GoalStatusFilter::Completed))
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .count_goals(&owned_solo("alice", GoalStatusFilter::Active))
            .unwrap(),
        0
    );
}

#[test]
fn test_group_scopes_follow_invitation_status() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_group_goal("g1", "alice", &["bob", "carol"]);
    insert(&mut persistence, &created);

    let bob_pending: GoalFilter =
        GoalFilter::new(GoalScope::PendingInvitations(UserId::new("bob")), None);
    let bob_member: GoalFilter = GoalFilter::new(
        GoalScope::GroupMember(UserId::new("bob")),
        Some(GoalStatusFilter::Active),
    );
    let alice_member: GoalFilter = GoalFilter::new(
        GoalScope::GroupMember(UserId::new("alice")),
        Some(GoalStatusFilter::Active),
    );
    assert_eq!(persistence.count_goals(&bob_pending).unwrap(), 1);
    assert_eq!(persistence.count_goals(&bob_member).unwrap(), 0);
    assert_eq!(persistence.count_goals(&alice_member).unwrap(), 1);

    let accepted: TransitionResult = run(
        created.goal(),
        Command::RespondToInvitation {
            status: InvitationStatus::Accepted,
        },
        "bob",
    );
    persistence.update_goal(accepted.goal(), test_now()).unwrap();

    assert_eq!(persistence.count_goals(&bob_pending).unwrap(), 0);
    assert_eq!(persistence.count_goals(&bob_member).unwrap(), 1);

    let carol_pending: GoalFilter =
        GoalFilter::new(GoalScope::PendingInvitations(UserId::new("carol")), None);
    assert_eq!(persistence.count_goals(&carol_pending).unwrap(), 1);
}
