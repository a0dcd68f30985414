//! Glucose status classification

use serde::{Deserialize, Serialize};

use crate::units::UnitMode;

/// Classification of a glucose value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Normal,
    Hypo,
    Hyper,
}

impl Status {
    /// Colored marker shown in front of the status label
    pub fn emoji(self) -> &'static str {
        match self {
            Status::Normal => "🟢",
            Status::Hypo => "🔴",
            Status::Hyper => "🟡",
        }
    }
}

/// Classify a value expressed in `mode` units
///
/// Thresholds are strict: a value exactly on a threshold is `Normal`.
pub fn classify(value: f64, mode: UnitMode) -> Status {
    let thresholds = mode.status_thresholds();
    if value < thresholds.low {
        Status::Hypo
    } else if value > thresholds.high {
        Status::Hyper
    } else {
        Status::Normal
    }
}
