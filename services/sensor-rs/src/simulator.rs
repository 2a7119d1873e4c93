use std::future::Future;

use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DeliveryError, SimulatorError};
use crate::event::EventGenerator;
use crate::publisher::Publisher;
use crate::reporter::{Reporter, TracingReporter};

/// What happened to the event of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    Rejected(StatusCode),
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub iterations: u64,
    pub delivered: u64,
    pub rejected: u64,
    pub failed: u64,
}

impl RunStats {
    fn record(&mut self, outcome: Outcome) {
        self.iterations += 1;
        match outcome {
            Outcome::Delivered => self.delivered += 1,
            Outcome::Rejected(_) => self.rejected += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Generate, send, report, wait. Repeats until told to stop.
pub struct Simulator<R = TracingReporter> {
    config: Config,
    generator: EventGenerator,
    publisher: Publisher,
    reporter: R,
    stats: RunStats,
}

impl<R: Reporter> Simulator<R> {
    pub fn new(config: Config, reporter: R) -> Result<Self, SimulatorError> {
        config.validate()?;
        let generator = EventGenerator::from_config(&config);
        let publisher = Publisher::new(&config)?;
        Ok(Self {
            config,
            generator,
            publisher,
            reporter,
            stats: RunStats::default(),
        })
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// One iteration without the trailing wait. Failures are reported, never returned.
    pub async fn run_iteration(&mut self) -> Outcome {
        let event = self.generator.next_event();

        let outcome = match self.publisher.publish(&event).await {
            Ok(()) => {
                self.reporter.delivered(&event);
                Outcome::Delivered
            }
            Err(DeliveryError::Rejected(status)) => {
                self.reporter.rejected(&event, status);
                Outcome::Rejected(status)
            }
            Err(err) => {
                self.reporter.failed(&event, &err);
                Outcome::Failed
            }
        };

        self.stats.record(outcome);
        outcome
    }

    /// Runs until `shutdown` resolves or `max_iterations` is reached.
    ///
    /// `shutdown` is only observed between iterations; a request already in
    /// flight finishes (or times out) first.
    pub async fn run_until<F>(&mut self, shutdown: F) -> RunStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let interval = self.config.interval();

        info!(
            endpoint = %self.publisher.endpoint(),
            interval_ms = self.config.interval_ms,
            max_iterations = ?self.config.max_iterations,
            "simulation started"
        );

        loop {
            if self.limit_reached() {
                break;
            }
            self.run_iteration().await;
            if self.limit_reached() {
                debug!(iterations = self.stats.iterations, "iteration limit reached");
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping simulation");
                    break;
                }
                _ = sleep(interval) => {}
            }
        }

        self.stats
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_iterations
            .is_some_and(|max| self.stats.iterations >= max)
    }
}
