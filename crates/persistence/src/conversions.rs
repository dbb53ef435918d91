// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.
//!
//! Timestamps are stored as RFC 3339 text, calendar dates as `YYYY-MM-DD`,
//! flags as `0`/`1` integers, and counters as `BIGINT`.

use num_traits::ToPrimitive;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;

pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(at.format(&Rfc3339)?)
}

pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(raw, &Rfc3339)?)
}

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

pub fn parse_date(raw: &str) -> Result<Date, PersistenceError> {
    Ok(Date::parse(raw, format_description!("[year]-[month]-[day]"))?)
}

pub const fn flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

pub const fn is_set(value: i32) -> bool {
    value != 0
}

/// Reads a stored counter back into its domain width.
pub fn counter(value: i64, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}
