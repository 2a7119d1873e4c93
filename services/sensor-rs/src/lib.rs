//! Simulated CitySense camera: posts random road-issue detections to the
//! live-data endpoint on a fixed interval.

pub mod config;
pub mod error;
pub mod event;
pub mod publisher;
pub mod reporter;
pub mod simulator;
pub mod telemetry;

pub use config::Config;
pub use error::{ConfigError, DeliveryError, SimulatorError};
pub use event::{DetectionEvent, EventGenerator, IssueType, Severity};
pub use publisher::Publisher;
pub use reporter::{Reporter, TracingReporter};
pub use simulator::{Outcome, RunStats, Simulator};
