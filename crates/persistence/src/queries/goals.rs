// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal document queries.
//!
//! Listing filters run against the projection columns and the
//! `goal_members` table; the returned goals are decoded from the stored
//! JSON document.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use goaltrack_domain::{Goal, GoalId, GoalStatusFilter, InvitationStatus};
use tracing::debug;

use crate::data_models::{GoalFilter, GoalScope, PageRequest};
use crate::diesel_schema::{goal_members, goals};
use crate::error::PersistenceError;

/// Builds the filtered goal query shared by listing and counting.
fn filtered(filter: &GoalFilter) -> goals::BoxedQuery<'_, Sqlite> {
    let mut query = goals::table.into_boxed();

    query = match &filter.scope {
        GoalScope::OwnedSolo(user_id) => query
            .filter(goals::owner_id.eq(user_id.as_str()))
            .filter(goals::is_group.eq(0)),
        GoalScope::Owned(user_id) => query.filter(goals::owner_id.eq(user_id.as_str())),
        GoalScope::GroupMember(user_id) => query.filter(goals::is_group.eq(1)).filter(
            goals::goal_id.eq_any(
                goal_members::table
                    .filter(goal_members::user_id.eq(user_id.as_str()))
                    .filter(
                        goal_members::invitation_status.eq(InvitationStatus::Accepted.as_str()),
                    )
                    .select(goal_members::goal_id),
            ),
        ),
        GoalScope::PendingInvitations(user_id) => query.filter(goals::is_group.eq(1)).filter(
            goals::goal_id.eq_any(
                goal_members::table
                    .filter(goal_members::user_id.eq(user_id.as_str()))
                    .filter(goal_members::invitation_status.eq(InvitationStatus::Pending.as_str()))
                    .select(goal_members::goal_id),
            ),
        ),
    };

    match filter.status {
        Some(GoalStatusFilter::Active) => query
            .filter(goals::is_completed.eq(0))
            .filter(goals::is_archived.eq(0)),
        Some(GoalStatusFilter::Completed) => query.filter(goals::is_completed.eq(1)),
        Some(GoalStatusFilter::Archived) => query.filter(goals::is_archived.eq(1)),
        None => query,
    }
}

fn decode(document_json: &str) -> Result<Goal, PersistenceError> {
    Ok(serde_json::from_str(document_json)?)
}

/// Loads a goal by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored document cannot be
/// decoded. Returns `Ok(None)` if no goal has this id.
pub fn find_goal(
    conn: &mut SqliteConnection,
    goal_id: &GoalId,
) -> Result<Option<Goal>, PersistenceError> {
    debug!(goal_id = %goal_id, "Loading goal document");

    let document: Option<String> = goals::table
        .filter(goals::goal_id.eq(goal_id.as_str()))
        .select(goals::document_json)
        .first::<String>(conn)
        .optional()?;

    document.as_deref().map(decode).transpose()
}

/// Loads one page of goals matching `filter`, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored document cannot be decoded.
pub fn find_goals(
    conn: &mut SqliteConnection,
    filter: &GoalFilter,
    page: PageRequest,
) -> Result<Vec<Goal>, PersistenceError> {
    debug!(?filter, page = page.page, limit = page.limit, "Listing goals");

    let documents: Vec<String> = filtered(filter)
        .order(goals::seq.desc())
        .limit(i64::from(page.limit))
        .offset(page.offset())
        .select(goals::document_json)
        .load::<String>(conn)?;

    documents.iter().map(|doc| decode(doc)).collect()
}

/// Counts the goals matching `filter`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_goals(
    conn: &mut SqliteConnection,
    filter: &GoalFilter,
) -> Result<u64, PersistenceError> {
    let count: i64 = filtered(filter).count().get_result(conn)?;
    Ok(count.unsigned_abs())
}

/// Returns whether a goal with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn goal_exists(
    conn: &mut SqliteConnection,
    goal_id: &GoalId,
) -> Result<bool, PersistenceError> {
    let count: i64 = goals::table
        .filter(goals::goal_id.eq(goal_id.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
