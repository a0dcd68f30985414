//! One invocation of the glucose pipeline: fetch, then present

use crate::api::EntrySource;
use crate::chart::{ChartRenderer, PngChartRenderer};
use crate::config::MonitorConfig;
use crate::interface::Formatter;
use crate::presenter::{Presentation, ReadingPresenter};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches readings and turns them into a [`Presentation`]
///
/// Holds no per-invocation state, so one monitor can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct GlucoseMonitor {
    source: Arc<dyn EntrySource>,
    renderer: Option<Arc<dyn ChartRenderer>>,
}

impl GlucoseMonitor {
    /// Create a monitor that draws charts with [`PngChartRenderer`]
    pub fn new(source: Arc<dyn EntrySource>) -> Self {
        Self {
            source,
            renderer: None,
        }
    }

    /// Use a specific renderer instead of one built from the configuration
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Run the pipeline once against `config`
    ///
    /// Never fails: fetch and render errors come back as warning text.
    pub async fn run(&self, config: &MonitorConfig, formatter: &dyn Formatter) -> Presentation {
        let count = config.entry_count();
        info!(
            base_url = %config.base_url,
            count,
            units = %config.unit_mode,
            "Fetching glucose readings"
        );

        let outcome = self.source.fetch(&config.base_url, count).await;
        if let Ok(readings) = &outcome {
            debug!(received = readings.len(), "Readings received");
        }

        let fallback;
        let renderer: &dyn ChartRenderer = match &self.renderer {
            Some(renderer) => renderer.as_ref(),
            None => {
                fallback = PngChartRenderer::new(
                    config.chart_style,
                    config.chart_width,
                    config.chart_height,
                );
                &fallback
            }
        };

        ReadingPresenter::new(formatter, renderer, config.language).report(
            outcome,
            config.unit_mode,
            config.show_graph,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockEntrySource;
    use crate::chart::{MockChartRenderer, RenderedChart};
    use crate::error::MonitorError;
    use crate::interface::PlainFormatter;
    use crate::reading::Reading;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    fn recent(count: usize, sgv: f64) -> Vec<Reading> {
        let now = Utc::now();
        (0..count)
            .map(|i| Reading::new(now - Duration::minutes(5 * i as i64), sgv))
            .collect()
    }

    #[tokio::test]
    async fn test_graph_requests_configured_points() {
        let mut source = MockEntrySource::new();
        source
            .expect_fetch()
            .with(eq("https://ns.example.org"), eq(12))
            .times(1)
            .returning(|_, count| Ok(recent(count, 110.0)));

        let mut renderer = MockChartRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_, _| Ok(RenderedChart::from_bytes(vec![1, 2, 3])));

        let config = MonitorConfig::builder()
            .base_url("https://ns.example.org")
            .build()
            .unwrap();

        let monitor = GlucoseMonitor::new(Arc::new(source)).with_renderer(Arc::new(renderer));
        let presentation = monitor.run(&config, &PlainFormatter).await;

        assert!(presentation.text.contains("110 mg/dL"));
        assert!(presentation.chart.is_some());
    }

    #[tokio::test]
    async fn test_without_graph_fetches_single_entry() {
        let mut source = MockEntrySource::new();
        source
            .expect_fetch()
            .with(mockall::predicate::always(), eq(1))
            .times(1)
            .returning(|_, _| Ok(recent(1, 90.0)));

        let mut renderer = MockChartRenderer::new();
        renderer.expect_render().never();

        let config = MonitorConfig::builder()
            .units("mmol/L")
            .show_graph(false)
            .build()
            .unwrap();

        let monitor = GlucoseMonitor::new(Arc::new(source)).with_renderer(Arc::new(renderer));
        let presentation = monitor.run(&config, &PlainFormatter).await;

        assert!(presentation.text.contains("5.0 mmol/L"));
        assert!(presentation.chart.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_warning() {
        let mut source = MockEntrySource::new();
        source
            .expect_fetch()
            .returning(|_, _| Err(MonitorError::Fetch { status: 503 }));

        let monitor = GlucoseMonitor::new(Arc::new(source));
        let presentation = monitor.run(&MonitorConfig::default(), &PlainFormatter).await;

        assert_eq!(presentation.text, "⚠️ Error: Request failed with status 503");
        assert!(presentation.chart.is_none());
    }

    #[test]
    fn test_empty_fetch_uses_default_renderer() {
        let mut source = MockEntrySource::new();
        source.expect_fetch().returning(|_, _| Ok(Vec::new()));

        let monitor = GlucoseMonitor::new(Arc::new(source));
        let config = MonitorConfig::default();
        let presentation = tokio_test::block_on(monitor.run(&config, &PlainFormatter));

        assert_eq!(presentation.text, "❌ No data from server.");
    }

    #[test]
    fn test_default_renderer_draws_png() {
        let mut source = MockEntrySource::new();
        source.expect_fetch().returning(|_, count| Ok(recent(count, 200.0)));

        let monitor = GlucoseMonitor::new(Arc::new(source));
        let config = MonitorConfig::default();
        let presentation = tokio_test::block_on(monitor.run(&config, &PlainFormatter));

        assert!(presentation.text.contains("200 mg/dL"));
        assert!(!presentation.text.contains("Chart unavailable"));
        let chart = presentation.chart.unwrap();
        assert!(chart.as_bytes().starts_with(b"\x89PNG"));
    }
}
