// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User stats and profile mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack_domain::{CounterOutcome, UserId, UserStats, apply_rating_delta};
use tracing::{debug, warn};

use crate::conversions::format_date;
use crate::data_models::ProfileData;
use crate::diesel_schema::{profiles, user_stats};
use crate::error::PersistenceError;
use crate::queries::ledger::find_profile;

/// Inserts a new stats record.
///
/// # Errors
///
/// Returns an error if the record already exists or the insert fails.
pub fn insert_user_stats(
    conn: &mut SqliteConnection,
    stats: &UserStats,
) -> Result<(), PersistenceError> {
    debug!(user_id = %stats.user_id, "Creating user stats");

    diesel::insert_into(user_stats::table)
        .values((
            user_stats::user_id.eq(stats.user_id.as_str()),
            user_stats::goals_created_this_month.eq(i64::from(stats.goals_created_this_month)),
            user_stats::active_goals_now.eq(i64::from(stats.active_goals_now)),
            user_stats::completed_goals.eq(i64::from(stats.completed_goals)),
            user_stats::closed_tasks.eq(i64::from(stats.closed_tasks)),
            user_stats::blog_posts.eq(i64::from(stats.blog_posts)),
            user_stats::last_month_reset.eq(format_date(stats.last_month_reset)?),
        ))
        .execute(conn)?;
    Ok(())
}

/// Overwrites an existing stats record.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user has no record.
pub fn update_user_stats(
    conn: &mut SqliteConnection,
    stats: &UserStats,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        user_stats::table.filter(user_stats::user_id.eq(stats.user_id.as_str())),
    )
    .set((
        user_stats::goals_created_this_month.eq(i64::from(stats.goals_created_this_month)),
        user_stats::active_goals_now.eq(i64::from(stats.active_goals_now)),
        user_stats::completed_goals.eq(i64::from(stats.completed_goals)),
        user_stats::closed_tasks.eq(i64::from(stats.closed_tasks)),
        user_stats::blog_posts.eq(i64::from(stats.blog_posts)),
        user_stats::last_month_reset.eq(format_date(stats.last_month_reset)?),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User stats for {}",
            stats.user_id
        )));
    }
    Ok(())
}

/// Returns the user's profile, creating it with rating 0 if absent.
///
/// # Errors
///
/// Returns an error if the query or insert fails.
pub fn ensure_profile(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<ProfileData, PersistenceError> {
    if let Some(profile) = find_profile(conn, user_id)? {
        return Ok(profile);
    }

    debug!(user_id = %user_id, "Creating profile");
    diesel::insert_into(profiles::table)
        .values((
            profiles::user_id.eq(user_id.as_str()),
            profiles::display_name.eq(user_id.as_str()),
            profiles::rating.eq(0_i64),
        ))
        .execute(conn)?;

    Ok(ProfileData {
        user_id: user_id.clone(),
        display_name: user_id.to_string(),
        avatar: None,
        rating: 0,
    })
}

/// Moves a user's rating by `delta`, clamping at zero.
///
/// # Returns
///
/// The rating after the change.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or written.
pub fn adjust_rating(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    delta: i64,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let profile: ProfileData = ensure_profile(conn, user_id)?;
        let (rating, outcome): (i64, CounterOutcome) = apply_rating_delta(profile.rating, delta);
        if outcome == CounterOutcome::ClampedAtZero {
            warn!(
                user_id = %user_id,
                previous = profile.rating,
                delta,
                "Rating clamped at zero"
            );
        }

        diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.as_str())))
            .set(profiles::rating.eq(rating))
            .execute(conn)?;
        Ok(rating)
    })
}
