//! Glucose reading data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sensor glucose entry as reported by Nightscout
///
/// `raw_value` and `delta` are always in mg/dL; convert before display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub raw_value: f64,
    pub trend_code: Option<String>,
    pub device_label: Option<String>,
    pub raw_unfiltered: Option<f64>,
    pub noise_level: Option<f64>,
    pub delta: Option<f64>,
}

impl Reading {
    /// Create a reading with only the required fields
    pub fn new(timestamp: DateTime<Utc>, raw_value: f64) -> Self {
        Self {
            timestamp,
            raw_value,
            trend_code: None,
            device_label: None,
            raw_unfiltered: None,
            noise_level: None,
            delta: None,
        }
    }

    pub fn with_trend(mut self, code: impl Into<String>) -> Self {
        self.trend_code = Some(code.into());
        self
    }

    pub fn with_device(mut self, label: impl Into<String>) -> Self {
        self.device_label = Some(label.into());
        self
    }

    pub fn with_unfiltered(mut self, raw: f64) -> Self {
        self.raw_unfiltered = Some(raw);
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise_level = Some(noise);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Epoch milliseconds, as stored upstream
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
