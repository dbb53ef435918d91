// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::goal::Step;
use crate::types::{GoalDetails, UserId};
use std::collections::HashSet;

/// Validates the descriptive fields of a goal.
///
/// # Arguments
///
/// * `details` - The details to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The category is blank
/// - The end date precedes the start date
pub fn validate_goal_details(details: &GoalDetails) -> Result<(), DomainError> {
    if details.name.trim().is_empty() {
        return Err(DomainError::InvalidGoalName(String::from(
            "Goal name cannot be empty",
        )));
    }

    if details.category.trim().is_empty() {
        return Err(DomainError::InvalidCategory(String::from(
            "Category cannot be empty",
        )));
    }

    if let Some(end_date) = details.end_date
        && end_date < details.start_date
    {
        return Err(DomainError::InvalidDateRange {
            start_date: details.start_date,
            end_date,
        });
    }

    Ok(())
}

/// Validates step text.
///
/// # Errors
///
/// Returns `DomainError::InvalidStepText` if the text is blank.
pub fn validate_step_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::InvalidStepText(String::from(
            "Step text cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a whole step list.
///
/// # Errors
///
/// Returns an error if any step text is blank or a step id repeats.
pub fn validate_steps(steps: &[Step]) -> Result<(), DomainError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for step in steps {
        validate_step_text(&step.text)?;
        if !seen.insert(step.id.as_str()) {
            return Err(DomainError::DuplicateStepId(step.id.clone()));
        }
    }
    Ok(())
}

/// Validates a caller-supplied user id.
///
/// # Errors
///
/// Returns `DomainError::InvalidUserId` if the id is blank or padded with
/// whitespace.
pub fn validate_user_id(user_id: &UserId) -> Result<(), DomainError> {
    let value: &str = user_id.as_str();
    if value.is_empty() {
        return Err(DomainError::InvalidUserId(String::from(
            "User id cannot be empty",
        )));
    }
    if value.trim() != value {
        return Err(DomainError::InvalidUserId(format!(
            "User id '{value}' has surrounding whitespace"
        )));
    }
    Ok(())
}
