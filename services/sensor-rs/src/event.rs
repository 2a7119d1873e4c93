use std::fmt;

use chrono::{DateTime, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Local date-time without offset, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Pothole,
    Garbage,
    WaterLogging,
}

impl IssueType {
    pub const ALL: [IssueType; 3] = [IssueType::Pothole, IssueType::Garbage, IssueType::WaterLogging];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Pothole => "pothole",
            IssueType::Garbage => "garbage",
            IssueType::WaterLogging => "water_logging",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Low, Severity::Medium, Severity::High, Severity::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated camera detection, serialized as the body of the live-data POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionEvent {
    /// Unix seconds at creation, as a decimal string.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IssueType,
    pub severity: Severity,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: String,
    pub image_url: String,
}

/// Produces detection events scattered around a base coordinate.
pub struct EventGenerator {
    base_lat: f64,
    base_lng: f64,
    max_offset: f64,
    image_url: String,
    rng: StdRng,
}

impl EventGenerator {
    /// A negative `max_offset` is taken by magnitude; a non-finite one disables jitter.
    pub fn new(base_lat: f64, base_lng: f64, max_offset: f64, image_url: impl Into<String>, rng: StdRng) -> Self {
        Self {
            base_lat,
            base_lng,
            max_offset: if max_offset.is_finite() { max_offset.abs() } else { 0.0 },
            image_url: image_url.into(),
            rng,
        }
    }

    /// Seeded from `config.seed` when set, OS entropy otherwise.
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config.base_lat, config.base_lng, config.max_offset, config.image_url.clone(), rng)
    }

    pub fn next_event(&mut self) -> DetectionEvent {
        self.event_at(Local::now())
    }

    /// `id` and `timestamp` both come from `now`.
    pub fn event_at(&mut self, now: DateTime<Local>) -> DetectionEvent {
        let kind = IssueType::ALL[self.rng.random_range(0..IssueType::ALL.len())];
        let severity = Severity::ALL[self.rng.random_range(0..Severity::ALL.len())];
        let lat = self.base_lat + self.jitter();
        let lng = self.base_lng + self.jitter();

        DetectionEvent {
            id: now.timestamp().to_string(),
            kind,
            severity,
            lat,
            lng,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            image_url: self.image_url.clone(),
        }
    }

    fn jitter(&mut self) -> f64 {
        self.rng.random_range(-self.max_offset..=self.max_offset)
    }
}
