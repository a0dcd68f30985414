//! Turns fetched readings into a chat reply
//!
//! [`ReadingPresenter::report`] is the error boundary of the pipeline: any
//! failure, whether network, decoding or rendering, comes out as warning
//! text and never as an `Err`.

use chrono::{DateTime, Local};
use tracing::warn;

use crate::chart::{ChartRenderer, RenderedChart};
use crate::error::Result;
use crate::i18n::{Labels, Language};
use crate::interface::{Attachment, BotResponse, Formatter};
use crate::reading::Reading;
use crate::status::classify;
use crate::trend;
use crate::units::{UnitMode, convert};

/// Text plus optional chart for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub text: String,
    pub chart: Option<RenderedChart>,
}

impl Presentation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chart: None,
        }
    }

    /// Convert into a bot reply: image-with-caption when a chart exists
    pub fn into_response(self, formatter: &dyn Formatter) -> BotResponse {
        let response = BotResponse::new(self.text, formatter.response_type());
        match self.chart {
            Some(chart) => response.with_attachment(Attachment::chart(chart)),
            None => response,
        }
    }
}

/// Composes the reading summary and optional chart
pub struct ReadingPresenter<'a> {
    formatter: &'a dyn Formatter,
    renderer: &'a dyn ChartRenderer,
    language: Language,
}

impl<'a> ReadingPresenter<'a> {
    pub fn new(
        formatter: &'a dyn Formatter,
        renderer: &'a dyn ChartRenderer,
        language: Language,
    ) -> Self {
        Self {
            formatter,
            renderer,
            language,
        }
    }

    fn labels(&self) -> &'static Labels {
        self.language.labels()
    }

    /// Present a fetch outcome, converting failures into warning text
    pub fn report(
        &self,
        outcome: Result<Vec<Reading>>,
        mode: UnitMode,
        show_graph: bool,
    ) -> Presentation {
        match outcome {
            Ok(readings) => self.present(&readings, mode, show_graph),
            Err(err) => {
                warn!(error = %err, "Glucose request failed");
                Presentation::text(
                    self.formatter
                        .format_error(self.labels().error, &err.to_string()),
                )
            }
        }
    }

    /// Present readings (newest first) relative to the current local time
    pub fn present(&self, readings: &[Reading], mode: UnitMode, show_graph: bool) -> Presentation {
        self.present_at(readings, mode, show_graph, Local::now())
    }

    /// Present readings relative to `now`
    pub fn present_at(
        &self,
        readings: &[Reading],
        mode: UnitMode,
        show_graph: bool,
        now: DateTime<Local>,
    ) -> Presentation {
        let Some(current) = readings.first() else {
            return Presentation::text(format!("❌ {}", self.labels().no_data));
        };

        let mut text = self.summary(current, mode, now);

        let chart = if show_graph {
            match self.renderer.render(readings, mode) {
                Ok(chart) => Some(chart),
                Err(err) => {
                    // The summary does not depend on the chart, so it still goes out
                    warn!(error = %err, "Chart rendering failed");
                    text.push('\n');
                    text.push_str(
                        &self
                            .formatter
                            .format_error(self.labels().chart_failed, &err.to_string()),
                    );
                    None
                }
            }
        } else {
            None
        };

        Presentation { text, chart }
    }

    /// Multi-line summary of the newest reading
    pub fn summary(&self, current: &Reading, mode: UnitMode, now: DateTime<Local>) -> String {
        let labels = self.labels();
        let f = self.formatter;

        let value = convert(current.raw_value, mode);
        let status = classify(value, mode);
        let glyph = trend::glyph(current.trend_code.as_deref());

        let local_time = current.timestamp.with_timezone(&Local);
        let time_str = local_time.format("%H:%M:%S").to_string();
        let minutes_ago = (now - local_time).num_minutes().max(0);

        let device = current
            .device_label
            .as_deref()
            .unwrap_or(labels.unknown_device);

        let mut lines = vec![
            format!(
                "🩸 {} {} {glyph}",
                f.bold(&format!("{}:", labels.glucose)),
                f.code(&mode.format(value))
            ),
            format!("{} {}", status.emoji(), labels.status(status)),
            format!(
                "🕒 {}: {} ({minutes_ago} {})",
                labels.time,
                f.code(&time_str),
                labels.minutes_ago
            ),
            format!("📡 {}: {}", labels.device, f.code(device)),
        ];

        if let Some(raw) = current.raw_unfiltered.filter(|raw| *raw != 0.0) {
            lines.push(format!("📊 {}: {}", labels.raw, f.code(&raw.to_string())));
        }
        if let Some(noise) = current.noise_level {
            lines.push(format!("🔧 {}: {}", labels.noise, f.code(&noise.to_string())));
        }
        if let Some(delta) = current.delta.filter(|delta| *delta != 0.0) {
            lines.push(format!(
                "↕️ {}: {}",
                labels.delta,
                f.code(&mode.format(convert(delta, mode)))
            ));
        }

        lines.join("\n")
    }
}
