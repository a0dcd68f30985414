//! Glucose display units and unit-dependent constants
//!
//! Nightscout always reports glucose in mg/dL. Every value shown to the user
//! goes through [`convert`] first, and every threshold is looked up from the
//! same [`UnitMode`], so status text and chart coloring never mix units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// mg/dL per mmol/L for glucose
pub const MG_DL_PER_MMOL_L: f64 = 18.0182;

/// User's preferred display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitMode {
    #[serde(rename = "mg/dL")]
    #[default]
    MgDl,
    #[serde(rename = "mmol/L")]
    MmolL,
}

/// A closed `[low, high]` glucose range in one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `value` lies inside the range, bounds included
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

impl UnitMode {
    /// Parse a configured unit string
    ///
    /// Only `mmol/L` (any case) selects mmol/L; everything else, including
    /// typos, falls back to mg/dL.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("mmol/l") {
            UnitMode::MmolL
        } else {
            UnitMode::MgDl
        }
    }

    /// Get the unit label
    pub fn label(self) -> &'static str {
        match self {
            UnitMode::MgDl => "mg/dL",
            UnitMode::MmolL => "mmol/L",
        }
    }

    /// Hypo/hyper thresholds used for the status line
    pub fn status_thresholds(self) -> Range {
        match self {
            UnitMode::MgDl => Range::new(70.0, 180.0),
            UnitMode::MmolL => Range::new(4.0, 10.0),
        }
    }

    /// Shaded normal band on the chart
    ///
    /// Narrower at the top than [`UnitMode::status_thresholds`]; kept as the
    /// monitor has always drawn it.
    pub fn chart_band(self) -> Range {
        match self {
            UnitMode::MgDl => Range::new(70.0, 160.0),
            UnitMode::MmolL => Range::new(4.0, 9.0),
        }
    }

    /// Fixed Y-axis bounds of the chart
    pub fn axis_range(self) -> Range {
        match self {
            UnitMode::MgDl => Range::new(40.0, 400.0),
            UnitMode::MmolL => Range::new(2.2, 22.2),
        }
    }

    /// Format an already converted value without unit suffix
    pub fn format_value(self, value: f64) -> String {
        match self {
            UnitMode::MgDl => format!("{value}"),
            UnitMode::MmolL => format!("{value:.1}"),
        }
    }

    /// Format an already converted value with unit suffix
    pub fn format(self, value: f64) -> String {
        format!("{} {}", self.format_value(value), self.label())
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a raw mg/dL value into the display unit
///
/// mmol/L results are rounded to one decimal place.
pub fn convert(raw_mg_dl: f64, mode: UnitMode) -> f64 {
    match mode {
        UnitMode::MgDl => raw_mg_dl,
        UnitMode::MmolL => round_to_tenth(raw_mg_dl / MG_DL_PER_MMOL_L),
    }
}

/// Convert a display value back to mg/dL
pub fn to_mg_dl(value: f64, mode: UnitMode) -> f64 {
    match mode {
        UnitMode::MgDl => value,
        UnitMode::MmolL => value * MG_DL_PER_MMOL_L,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mg_dl_is_identity() {
        for x in [0.0, 39.0, 70.0, 99.5, 180.0, 401.0, -12.0] {
            assert_eq!(convert(x, UnitMode::MgDl), x);
        }
    }

    #[test]
    fn test_mmol_conversion_rounds_to_one_decimal() {
        assert_eq!(convert(90.0, UnitMode::MmolL), 5.0);
        assert_eq!(convert(180.0, UnitMode::MmolL), 10.0);
        assert_eq!(convert(100.0, UnitMode::MmolL), 5.5);
        assert_eq!(convert(-18.0, UnitMode::MmolL), -1.0);
    }

    #[test]
    fn test_back_conversion() {
        assert_eq!(to_mg_dl(120.0, UnitMode::MgDl), 120.0);
        assert!((to_mg_dl(5.0, UnitMode::MmolL) - 90.091).abs() < 1e-9);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_lenient() {
        assert_eq!(UnitMode::parse("mmol/L"), UnitMode::MmolL);
        assert_eq!(UnitMode::parse("MMOL/l"), UnitMode::MmolL);
        assert_eq!(UnitMode::parse("mg/dL"), UnitMode::MgDl);
        assert_eq!(UnitMode::parse("furlongs"), UnitMode::MgDl);
        assert_eq!(UnitMode::parse(""), UnitMode::MgDl);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(UnitMode::MgDl.format(250.0), "250 mg/dL");
        assert_eq!(UnitMode::MmolL.format(5.0), "5.0 mmol/L");
        assert_eq!(UnitMode::MmolL.format_value(12.345), "12.3");
    }

    #[test]
    fn test_band_and_thresholds_per_mode() {
        assert_eq!(UnitMode::MgDl.chart_band(), Range::new(70.0, 160.0));
        assert_eq!(UnitMode::MgDl.status_thresholds(), Range::new(70.0, 180.0));
        assert_eq!(UnitMode::MmolL.chart_band(), Range::new(4.0, 9.0));
        assert_eq!(UnitMode::MmolL.axis_range(), Range::new(2.2, 22.2));
        assert!(UnitMode::MgDl.chart_band().contains(70.0));
        assert!(!UnitMode::MgDl.chart_band().contains(160.5));
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&UnitMode::MmolL).unwrap();
        assert_eq!(json, "\"mmol/L\"");
        let mode: UnitMode = serde_json::from_str("\"mg/dL\"").unwrap();
        assert_eq!(mode, UnitMode::MgDl);
    }
}
