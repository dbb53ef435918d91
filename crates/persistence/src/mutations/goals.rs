// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal document mutations.
//!
//! Every save rewrites the JSON document, the projection columns, and the
//! roster projection inside one transaction.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack_domain::{Goal, GoalId, GroupRoster};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::conversions::{flag, format_timestamp};
use crate::diesel_schema::{goal_members, goals};
use crate::error::PersistenceError;
use crate::queries::goals::goal_exists;

fn replace_members(conn: &mut SqliteConnection, goal: &Goal) -> Result<(), PersistenceError> {
    diesel::delete(goal_members::table.filter(goal_members::goal_id.eq(goal.id().as_str())))
        .execute(conn)?;

    let participants = goal.roster().map_or(&[][..], GroupRoster::participants);
    for participant in participants {
        diesel::insert_into(goal_members::table)
            .values((
                goal_members::goal_id.eq(goal.id().as_str()),
                goal_members::user_id.eq(participant.user_id.as_str()),
                goal_members::role.eq(participant.role.as_str()),
                goal_members::invitation_status.eq(participant.invitation_status.as_str()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a new goal.
///
/// # Returns
///
/// The insertion sequence number, which orders listings newest first.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateGoal` if the id is taken, or an
/// error if serialization or the insert fails.
pub fn insert_goal(
    conn: &mut SqliteConnection,
    goal: &Goal,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let document_json: String = serde_json::to_string(goal)?;
    let created_at: String = format_timestamp(goal.created_at())?;
    let updated_at: String = format_timestamp(now)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if goal_exists(conn, goal.id())? {
            return Err(PersistenceError::DuplicateGoal(goal.id().to_string()));
        }

        diesel::insert_into(goals::table)
            .values((
                goals::goal_id.eq(goal.id().as_str()),
                goals::owner_id.eq(goal.owner_id().as_str()),
                goals::is_group.eq(flag(goal.is_group())),
                goals::is_completed.eq(flag(goal.is_completed())),
                goals::is_archived.eq(flag(goal.is_archived())),
                goals::created_at.eq(&created_at),
                goals::updated_at.eq(&updated_at),
                goals::document_json.eq(&document_json),
            ))
            .execute(conn)?;
        let seq: i64 = get_last_insert_rowid(conn)?;

        replace_members(conn, goal)?;

        info!(goal_id = %goal.id(), seq, "Inserted goal");
        Ok(seq)
    })
}

/// Replaces a stored goal with `goal`.
///
/// The last write wins; there is no version check.
///
/// # Errors
///
/// Returns `PersistenceError::GoalNotFound` if the goal does not exist.
pub fn update_goal(
    conn: &mut SqliteConnection,
    goal: &Goal,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let document_json: String = serde_json::to_string(goal)?;
    let updated_at: String = format_timestamp(now)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize =
            diesel::update(goals::table.filter(goals::goal_id.eq(goal.id().as_str())))
                .set((
                    goals::owner_id.eq(goal.owner_id().as_str()),
                    goals::is_group.eq(flag(goal.is_group())),
                    goals::is_completed.eq(flag(goal.is_completed())),
                    goals::is_archived.eq(flag(goal.is_archived())),
                    goals::updated_at.eq(&updated_at),
                    goals::document_json.eq(&document_json),
                ))
                .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::GoalNotFound(goal.id().to_string()));
        }

        replace_members(conn, goal)?;

        debug!(goal_id = %goal.id(), "Updated goal");
        Ok(())
    })
}

/// Deletes a goal. Roster rows cascade; audit rows are kept.
///
/// # Errors
///
/// Returns `PersistenceError::GoalNotFound` if the goal does not exist.
pub fn delete_goal(conn: &mut SqliteConnection, goal_id: &GoalId) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(goals::table.filter(goals::goal_id.eq(goal_id.as_str()))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::GoalNotFound(goal_id.to_string()));
    }

    info!(goal_id = %goal_id, "Deleted goal");
    Ok(())
}
