// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod effects;
mod error;
mod queries;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create};
pub use command::{Command, CreateCommand};
pub use effects::{LedgerEffect, NotificationIntent, NotificationKind};
pub use error::{CoreError, ErrorClass, classify};
pub use queries::{ensure_visible, group_goal_stats, habit_stats};
pub use state::{GoalOutcome, TransitionResult};
