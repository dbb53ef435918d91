// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens `Persistence::new_in_memory()`, so
//! connection setup and migrations are exercised throughout. These cover
//! isolation and foreign key enforcement explicitly.

use goaltrack_domain::GoalId;

use super::{create_test_goal, test_now};
use crate::{GoalStore, Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.insert_goal(create_test_goal("g1", "alice").goal(), test_now())
        .unwrap();

    assert!(db1.find_goal(&GoalId::new("g1")).unwrap().is_some());
    assert!(db2.find_goal(&GoalId::new("g1")).unwrap().is_none());
}
