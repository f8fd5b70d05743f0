//! Console reporting and the failure-streak state machine.

use crate::evaluate::Warning;
use std::io::{self, Write};

/// Consecutive failures after which the notice is printed
pub const FAILURE_NOTICE_THRESHOLD: u32 = 3;

/// Line printed once per failure streak
pub const FAILURE_NOTICE: &str = "Unable to fetch server statistic.";

/// Health of the poll loop as seen by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    /// Last poll succeeded
    Healthy,
    /// Failing, notice not yet due
    Degraded(u32),
    /// Notice printed for the current streak
    Alerting(u32),
}

/// Failure bookkeeping threaded through the poll loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerState {
    consecutive_failures: u32,
    notice_printed: bool,
}

impl PollerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn notice_printed(&self) -> bool {
        self.notice_printed
    }

    /// A successful poll ends the streak and re-arms the notice
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.notice_printed = false;
    }

    /// Count a failed poll.
    ///
    /// Returns true exactly once per streak, when the notice is due.
    pub fn record_failure(&mut self) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= FAILURE_NOTICE_THRESHOLD && !self.notice_printed {
            self.notice_printed = true;
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> StreakStatus {
        match self.consecutive_failures {
            0 => StreakStatus::Healthy,
            n if self.notice_printed => StreakStatus::Alerting(n),
            n => StreakStatus::Degraded(n),
        }
    }
}

/// Writes operator-facing lines to a sink, stdout in production
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print each warning on its own line
    pub fn warnings(&mut self, warnings: &[Warning]) -> io::Result<()> {
        for warning in warnings {
            writeln!(self.out, "{}", warning)?;
        }
        self.out.flush()
    }

    pub fn failure_notice(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", FAILURE_NOTICE)?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
