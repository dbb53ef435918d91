// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::goal::Step;

/// Computes goal progress from its steps.
///
/// Progress is `round(100 × completed / total)` with halves rounded up, and
/// `0` for a goal without steps. The result is always within `0..=100`.
///
/// # Arguments
///
/// * `steps` - The goal's step list
///
/// # Returns
///
/// The derived progress percentage.
#[must_use]
pub fn compute_progress(steps: &[Step]) -> u8 {
    let total: usize = steps.len();
    if total == 0 {
        return 0;
    }
    let completed: usize = steps.iter().filter(|s| s.is_completed).count();

    // floor(100c/t + 1/2) == floor((200c + t) / 2t)
    let percent: usize = (completed * 200 + total) / (total * 2);
    u8::try_from(percent.min(100)).unwrap_or(100)
}
