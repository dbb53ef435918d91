// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack::NotificationIntent;
use goaltrack_domain::UserId;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::conversions::format_timestamp;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Stores a notification for its recipient.
///
/// # Returns
///
/// The new notification id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    intent: &NotificationIntent,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(notifications::table)
        .values((
            notifications::user_id.eq(intent.recipient.as_str()),
            notifications::kind.eq(intent.kind.as_str()),
            notifications::title.eq(&intent.title),
            notifications::message.eq(&intent.message),
            notifications::goal_id.eq(Some(intent.goal_id.as_str())),
            notifications::sender_id.eq(Some(intent.sender_id.as_str())),
            notifications::is_read.eq(0),
            notifications::created_at.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    let notification_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        notification_id,
        recipient = %intent.recipient,
        kind = intent.kind.as_str(),
        "Stored notification"
    );
    Ok(notification_id)
}

/// Marks the given notifications read. Ids owned by other users are ignored.
///
/// # Returns
///
/// The number of notifications changed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_notifications_read(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    notification_ids: &[i64],
) -> Result<usize, PersistenceError> {
    let updated: usize = diesel::update(
        notifications::table
            .filter(notifications::user_id.eq(user_id.as_str()))
            .filter(notifications::notification_id.eq_any(notification_ids))
            .filter(notifications::is_read.eq(0)),
    )
    .set(notifications::is_read.eq(1))
    .execute(conn)?;
    Ok(updated)
}
