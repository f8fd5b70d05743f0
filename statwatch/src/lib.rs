// Statwatch Library
//
// Polls a server statistics endpoint, evaluates the reported resource usage
// against fixed thresholds and reports warnings on the console.

// Enforce panic-free code in production
#![cfg_attr(not(test), warn(clippy::unwrap_used))]
#![cfg_attr(not(test), warn(clippy::expect_used))]
#![cfg_attr(not(test), warn(clippy::panic))]
// Test-specific allows
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod error;
pub mod evaluate;
pub mod fetch;
pub mod poller;
pub mod reporter;
pub mod shutdown;
pub mod snapshot;

pub use config::PollerConfig;
pub use error::{PollError, Result};
pub use evaluate::{BandwidthUnit, EvalPolicy, Evaluator, PercentRounding, Thresholds, Warning};
pub use fetch::{HttpStatsSource, StatsSource};
pub use poller::{CycleOutcome, Poller};
pub use reporter::{PollerState, Reporter, StreakStatus};
pub use snapshot::StatsSnapshot;
