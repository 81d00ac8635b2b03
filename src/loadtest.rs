// SPDX-License-Identifier: MIT

use log::*;

use crate::command::{self, Command};
use crate::tracker::UsedIdTracker;

/// Lazily generates `count` sequential `SET` commands, ids starting one past
/// the tracker's current maximum.
///
/// The run is finite and not restartable: a second call picks up from
/// whatever the tracker holds by then. A run ends early, with a warning,
/// once the id space is exhausted.
pub fn generate(tracker: &mut UsedIdTracker, count: u64) -> LoadTestRun<'_> {
    LoadTestRun {
        tracker,
        remaining: count,
    }
}

pub struct LoadTestRun<'a> {
    tracker: &'a mut UsedIdTracker,
    remaining: u64,
}

impl Iterator for LoadTestRun<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        if self.remaining == 0 {
            return None;
        }
        let Some(id) = self.tracker.next_available() else {
            warn!("id space exhausted, ending load-test run early");
            self.remaining = 0;
            return None;
        };
        self.remaining -= 1;

        // Routed through the same validation as manual commands so the
        // dedup invariant has a single enforcement point.
        let raw = format!("SET {id} message_{id}");
        match command::validate(&raw, self.tracker) {
            Ok(cmd) => Some(cmd),
            Err(reject) => {
                unreachable!("freshly computed id {id} was rejected: {reject}")
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Exhaustion can end the run before `remaining` commands.
        (0, Some(self.remaining as usize))
    }
}
