// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User stats and profile queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack_domain::{UserId, UserStats};
use tracing::debug;

use crate::conversions::{counter, parse_date};
use crate::data_models::ProfileData;
use crate::diesel_schema::{profiles, user_stats};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user stats rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = user_stats)]
struct UserStatsRow {
    user_id: String,
    goals_created_this_month: i64,
    active_goals_now: i64,
    completed_goals: i64,
    closed_tasks: i64,
    blog_posts: i64,
    last_month_reset: String,
}

impl TryFrom<UserStatsRow> for UserStats {
    type Error = PersistenceError;

    fn try_from(row: UserStatsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(&row.user_id),
            goals_created_this_month: counter(
                row.goals_created_this_month,
                "goals_created_this_month",
            )?,
            active_goals_now: counter(row.active_goals_now, "active_goals_now")?,
            completed_goals: counter(row.completed_goals, "completed_goals")?,
            closed_tasks: counter(row.closed_tasks, "closed_tasks")?,
            blog_posts: counter(row.blog_posts, "blog_posts")?,
            last_month_reset: parse_date(&row.last_month_reset)?,
        })
    }
}

/// Diesel Queryable struct for profile rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = profiles)]
struct ProfileRow {
    user_id: String,
    display_name: String,
    avatar: Option<String>,
    rating: i64,
}

/// Loads a user's stats record.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if the user has no record yet.
pub fn find_user_stats(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Option<UserStats>, PersistenceError> {
    debug!(user_id = %user_id, "Loading user stats");

    let row: Option<UserStatsRow> = user_stats::table
        .filter(user_stats::user_id.eq(user_id.as_str()))
        .select(UserStatsRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserStats::try_from).transpose()
}

/// Loads a user's profile.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the profile does not exist.
pub fn find_profile(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Option<ProfileData>, PersistenceError> {
    let row: Option<ProfileRow> = profiles::table
        .filter(profiles::user_id.eq(user_id.as_str()))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| ProfileData {
        user_id: UserId::new(&row.user_id),
        display_name: row.display_name,
        avatar: row.avatar,
        rating: row.rating,
    }))
}
