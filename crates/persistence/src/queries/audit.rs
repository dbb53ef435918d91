// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack_audit::{Action, Actor, AuditEvent, Cause, GoalSnapshot};
use goaltrack_domain::GoalId;

use crate::conversions::parse_timestamp;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    goal_id: String,
    #[allow(dead_code)]
    actor_user_id: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: Option<String>,
    after_snapshot_json: Option<String>,
    created_at: String,
}

fn snapshot(raw: Option<&str>) -> Result<Option<GoalSnapshot>, PersistenceError> {
    raw.map(serde_json::from_str::<GoalSnapshot>)
        .transpose()
        .map_err(PersistenceError::from)
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;

        Ok(Self::new(
            GoalId::new(&row.goal_id),
            actor,
            cause,
            action,
            snapshot(row.before_snapshot_json.as_deref())?,
            snapshot(row.after_snapshot_json.as_deref())?,
            parse_timestamp(&row.created_at)?,
        )
        .with_event_id(row.event_id))
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Audit event {event_id}")))?;

    AuditEvent::try_from(row)
}

/// Retrieves the audit trail of a goal, oldest first.
///
/// Events survive goal deletion, so the trail of a deleted goal is still
/// readable here.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_goal_audit_trail(
    conn: &mut SqliteConnection,
    goal_id: &GoalId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::goal_id.eq(goal_id.as_str()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AuditEvent::try_from).collect()
}
