//! Configuration for the glucose monitor
//!
//! Configuration is a plain value handed to each invocation; nothing here is
//! global. Hosts may rebuild it between invocations (from the environment,
//! a JSON file or the builder) without affecting one that is in flight.

use crate::chart::ChartStyle;
use crate::error::{MonitorError, Result};
use crate::i18n::Language;
use crate::units::UnitMode;
use glucose_utils::{lookup_flag, lookup_parse, lookup_string, process_env};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Placeholder server used until the user configures their own
pub const DEFAULT_BASE_URL: &str = "https://your-nightscout.herokuapp.com";

/// Number of entries plotted when the chart is enabled
pub const DEFAULT_GRAPH_POINTS: usize = 12;

/// Smallest chart edge in pixels that leaves room for the plot margins
pub const MIN_CHART_SIZE: u32 = 100;

/// Largest chart edge in pixels
pub const MAX_CHART_SIZE: u32 = 4096;

/// Configuration for glucose monitor operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// Nightscout server URL
    pub base_url: String,

    /// Display unit; unrecognised strings read as mg/dL
    #[serde(deserialize_with = "lenient_unit")]
    pub unit_mode: UnitMode,

    /// Attach a chart of recent readings
    pub show_graph: bool,

    /// Entries requested when the chart is enabled
    pub graph_points: usize,

    /// Chart rendering variant
    pub chart_style: ChartStyle,

    /// Chart width in pixels
    pub chart_width: u32,

    /// Chart height in pixels
    pub chart_height: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Reply language
    pub language: Language,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            unit_mode: UnitMode::MgDl,
            show_graph: true,
            graph_points: DEFAULT_GRAPH_POINTS,
            chart_style: ChartStyle::default(),
            chart_width: 800,
            chart_height: 400,
            request_timeout_secs: 30,
            language: Language::English,
        }
    }
}

fn lenient_unit<'de, D>(deserializer: D) -> std::result::Result<UnitMode, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(UnitMode::parse(&s))
}

impl MonitorConfig {
    /// Create a new configuration builder
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Apply overrides from `NIGHTSCOUT_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_lookup(process_env)
    }

    /// Apply `NIGHTSCOUT_*` overrides read through `lookup`
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup_string("NIGHTSCOUT_URL", &lookup) {
            self.base_url = url;
        }
        if let Some(units) = lookup_string("NIGHTSCOUT_UNITS", &lookup) {
            self.unit_mode = UnitMode::parse(&units);
        }
        if let Some(show) = lookup_flag("NIGHTSCOUT_SHOW_GRAPH", &lookup) {
            self.show_graph = show;
        }
        if let Some(points) = lookup_parse("NIGHTSCOUT_GRAPH_POINTS", &lookup) {
            self.graph_points = points;
        }
        if let Some(lang) = lookup_string("NIGHTSCOUT_LANGUAGE", &lookup) {
            self.language = Language::from_code(&lang);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            MonitorError::Config(format!("invalid base URL '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(MonitorError::Config(format!(
                "base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.graph_points == 0 {
            return Err(MonitorError::Config(
                "graph_points must be greater than 0".to_string(),
            ));
        }

        let size_range = MIN_CHART_SIZE..=MAX_CHART_SIZE;
        if !size_range.contains(&self.chart_width) || !size_range.contains(&self.chart_height) {
            return Err(MonitorError::Config(format!(
                "chart size {}x{} outside {MIN_CHART_SIZE}..={MAX_CHART_SIZE} pixels",
                self.chart_width, self.chart_height
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of entries to request for one invocation
    ///
    /// The text summary only needs the newest entry.
    pub fn entry_count(&self) -> usize {
        if self.show_graph {
            self.graph_points
        } else {
            1
        }
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for MonitorConfig
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    base_url: Option<String>,
    unit_mode: Option<UnitMode>,
    show_graph: Option<bool>,
    graph_points: Option<usize>,
    chart_style: Option<ChartStyle>,
    chart_size: Option<(u32, u32)>,
    request_timeout: Option<Duration>,
    language: Option<Language>,
}

impl MonitorConfigBuilder {
    /// Set the Nightscout server URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the display unit
    pub fn unit_mode(mut self, mode: UnitMode) -> Self {
        self.unit_mode = Some(mode);
        self
    }

    /// Set the display unit from a configuration string
    pub fn units(mut self, units: &str) -> Self {
        self.unit_mode = Some(UnitMode::parse(units));
        self
    }

    /// Enable or disable the chart
    pub fn show_graph(mut self, show: bool) -> Self {
        self.show_graph = Some(show);
        self
    }

    /// Set the number of plotted entries
    pub fn graph_points(mut self, points: usize) -> Self {
        self.graph_points = Some(points);
        self
    }

    /// Set the chart rendering variant
    pub fn chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = Some(style);
        self
    }

    /// Set the chart size in pixels
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = Some((width, height));
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the reply language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MonitorConfig> {
        let defaults = MonitorConfig::default();
        let (chart_width, chart_height) = self
            .chart_size
            .unwrap_or((defaults.chart_width, defaults.chart_height));

        let config = MonitorConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            unit_mode: self.unit_mode.unwrap_or(defaults.unit_mode),
            show_graph: self.show_graph.unwrap_or(defaults.show_graph),
            graph_points: self.graph_points.unwrap_or(defaults.graph_points),
            chart_style: self.chart_style.unwrap_or(defaults.chart_style),
            chart_width,
            chart_height,
            request_timeout_secs: self
                .request_timeout
                .map_or(defaults.request_timeout_secs, whole_seconds),
            language: self.language.unwrap_or(defaults.language),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Seconds in `timeout`, rounded up so sub-second timeouts stay non-zero
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

/// A single link button on the inline bio card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    pub text: String,
    pub url: String,
}

impl LinkButton {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Configuration for the inline bio card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BioConfig {
    /// Picture shown above the buttons
    pub image_url: String,

    /// Buttons, laid out two per row
    pub buttons: Vec<LinkButton>,
}

impl Default for BioConfig {
    fn default() -> Self {
        Self {
            image_url: "https://http.cat/images/426.jpg".to_string(),
            buttons: vec![
                LinkButton::new("🌟 GitHub", "https://github.com/"),
                LinkButton::new("💬 Telegram", "https://t.me/"),
                LinkButton::new("🌍 Website", "https://example.com"),
            ],
        }
    }
}
