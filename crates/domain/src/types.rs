// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            value: String,
        }

        impl $name {
            /// Creates a new identifier from its string form.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self {
                    value: value.to_string(),
                }
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.value
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.value)
            }
        }
    };
}

string_id!(
    /// Identifies a user. Supplied verbatim by the caller's identity context.
    UserId
);
string_id!(
    /// Identifies a goal.
    GoalId
);
string_id!(
    /// Identifies a step, unique within its goal.
    StepId
);

/// Whether a goal is tracked by steps alone or also by daily habit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Step-tracked goal.
    #[default]
    Regular,
    /// Habit goal with per-day completion records.
    Habit,
}

impl GoalType {
    /// Converts this goal type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Habit => "habit",
        }
    }
}

/// Who may see a goal on the owner's public surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Visible to the owner only.
    #[default]
    Private,
    /// Visible to friends.
    Friends,
    /// Visible to everyone.
    Public,
}

/// A day of the week a habit is scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Kinds of entries written to a goal's activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// A step was marked complete.
    MarkStep,
    /// A step was marked incomplete.
    UnmarkStep,
    /// A habit day was marked complete.
    MarkHabitDay,
    /// A habit day was marked incomplete.
    UnmarkHabitDay,
}

impl ActivityType {
    /// Converts this activity type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarkStep => "mark_step",
            Self::UnmarkStep => "unmark_step",
            Self::MarkHabitDay => "mark_habit_day",
            Self::UnmarkHabitDay => "unmark_habit_day",
        }
    }
}

/// One entry in a goal's append-only activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// What happened.
    pub activity_type: ActivityType,
    /// When it happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// Reward weight of a goal. Scales every rating change the goal causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct GoalValue(u16);

impl GoalValue {
    /// Smallest accepted value.
    pub const MIN: u16 = 1;
    /// Largest accepted value.
    pub const MAX: u16 = 500;
    /// Value used when the client does not supply one.
    pub const DEFAULT: u16 = 100;

    /// Creates a goal value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGoalValue` if `value` is outside `1..=500`.
    pub const fn new(value: u16) -> Result<Self, DomainError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(DomainError::InvalidGoalValue { value });
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Rating awarded when the whole goal is completed.
    #[must_use]
    pub fn completion_reward(self) -> i64 {
        i64::from(self.0)
    }

    /// Rating moved by one step toggle or one habit day: `floor(value / 10)`.
    #[must_use]
    pub fn increment_reward(self) -> i64 {
        i64::from(self.0 / 10)
    }
}

impl Default for GoalValue {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u16> for GoalValue {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GoalValue> for u16 {
    fn from(value: GoalValue) -> Self {
        value.0
    }
}

/// Descriptive goal fields. Carried verbatim; no engine rule reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDetails {
    /// Display name. Must not be blank.
    pub name: String,
    /// Free-form category. Must not be blank.
    pub category: String,
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date::option", default)]
    pub end_date: Option<Date>,
    /// Opaque reference returned by the image store.
    pub image: Option<String>,
    pub reward: Option<String>,
    pub consequence: Option<String>,
    pub privacy: Privacy,
}

impl GoalDetails {
    /// Creates details with only the required fields set.
    ///
    /// # Arguments
    ///
    /// * `name` - The goal name
    /// * `category` - The goal category
    /// * `start_date` - The day tracking starts
    #[must_use]
    pub fn new(name: &str, category: &str, start_date: Date) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            start_date,
            end_date: None,
            image: None,
            reward: None,
            consequence: None,
            privacy: Privacy::default(),
        }
    }
}

/// Which days a habit is scheduled on and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HabitSchedule {
    pub days_of_week: Vec<DayOfWeek>,
    /// Planned duration in days, if any.
    pub duration_days: Option<u32>,
}

/// Filter applied when listing goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatusFilter {
    /// Neither completed nor archived.
    #[default]
    Active,
    /// Completed, whether archived or not.
    Completed,
    /// Archived, whether completed or not.
    Archived,
}

impl FromStr for GoalStatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidFilter(s.to_string())),
        }
    }
}

impl GoalStatusFilter {
    /// Returns whether a goal with the given flags passes this filter.
    #[must_use]
    pub const fn matches(&self, is_completed: bool, is_archived: bool) -> bool {
        match self {
            Self::Active => !is_completed && !is_archived,
            Self::Completed => is_completed,
            Self::Archived => is_archived,
        }
    }
}
