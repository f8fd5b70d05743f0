//! The poll loop: fetch, parse, evaluate, report, sleep.

use crate::config::PollerConfig;
use crate::error::Result;
use crate::evaluate::{Evaluator, Warning};
use crate::fetch::StatsSource;
use crate::reporter::{PollerState, Reporter};
use crate::snapshot::StatsSnapshot;
use std::io::{self, Write};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Snapshot evaluated; the warnings were printed
    Reported(Vec<Warning>),
    /// Cycle failed; `notice` is true when the failure notice was printed
    Failed { notice: bool },
}

pub struct Poller<S: StatsSource, W: Write> {
    config: PollerConfig,
    source: S,
    evaluator: Evaluator,
    state: PollerState,
    reporter: Reporter<W>,
}

impl<S: StatsSource, W: Write> Poller<S, W> {
    pub fn new(config: PollerConfig, source: S, evaluator: Evaluator, reporter: Reporter<W>) -> Self {
        Self {
            config,
            source,
            evaluator,
            state: PollerState::new(),
            reporter,
        }
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }

    /// Run one cycle. Only a failure to write to the console is an error.
    pub async fn poll_once(&mut self) -> io::Result<CycleOutcome> {
        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let warnings = self.evaluator.evaluate(&snapshot);
                self.reporter.warnings(&warnings)?;
                if self.state.notice_printed() {
                    info!("Statistics endpoint reachable again");
                }
                self.state.record_success();
                Ok(CycleOutcome::Reported(warnings))
            }
            Err(e) => {
                let notice = self.state.record_failure();
                debug!(
                    "Poll failed ({} in a row): {}",
                    self.state.consecutive_failures(),
                    e
                );
                if notice {
                    self.reporter.failure_notice()?;
                }
                Ok(CycleOutcome::Failed { notice })
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<StatsSnapshot> {
        let body = self.source.fetch().await?;
        StatsSnapshot::parse(&body)
    }

    /// Poll until `stop` turns true or its sender is dropped.
    ///
    /// Returns the number of completed cycles.
    pub async fn run(&mut self, mut stop: watch::Receiver<bool>) -> io::Result<u64> {
        let mut cycles = 0u64;
        info!(
            "Polling {} every {:?}",
            self.config.url, self.config.interval
        );

        loop {
            if *stop.borrow() {
                break;
            }

            self.poll_once().await?;
            cycles += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        warn!("Stop signal sender dropped, stopping poll loop");
                        break;
                    }
                }
            }
        }

        info!("Poll loop stopped after {} cycles", cycles);
        Ok(cycles)
    }
}
