//! Glucose trend chart rendering
//!
//! Charts are drawn with plotters into an in-memory RGB bitmap and encoded
//! to PNG with the `image` crate, so rendering needs no files or fonts.
//! plotters is built without a font backend, so nothing on the chart may be
//! text; the reply caption carries the numbers.
//! The shaded band comes from [`UnitMode::chart_band`], the axis from
//! [`UnitMode::axis_range`], the thin gray guides from
//! [`UnitMode::status_thresholds`].

use crate::error::{MonitorError, Result};
use crate::reading::Reading;
use crate::units::{Range, UnitMode, convert};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Cursor;

const NEUTRAL_COLOR: RGBColor = RGBColor(33, 102, 172);
const LOW_COLOR: RGBColor = RGBColor(214, 39, 40);
const HIGH_COLOR: RGBColor = RGBColor(255, 150, 0);
const BAND_COLOR: RGBColor = RGBColor(44, 160, 44);
const GUIDE_COLOR: RGBColor = RGBColor(160, 160, 160);

/// Minutes of padding around a lone reading
const SINGLE_POINT_PADDING_MIN: f64 = 5.0;

/// PNG bytes of a rendered chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    bytes: Vec<u8>,
}

impl RenderedChart {
    pub const MIME_TYPE: &'static str = "image/png";
    pub const FILE_NAME: &'static str = "glucose.png";

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Reader positioned at the first byte of the image
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes)
    }
}

/// How the series line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartStyle {
    /// Each segment colored by where its endpoints sit against the band
    #[default]
    Segmented,
    /// One color for the whole line; only the band gives context
    SingleColor,
}

/// Color class of a line segment or marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Neutral,
    Low,
    High,
}

impl SegmentKind {
    fn color(self) -> RGBColor {
        match self {
            SegmentKind::Neutral => NEUTRAL_COLOR,
            SegmentKind::Low => LOW_COLOR,
            SegmentKind::High => HIGH_COLOR,
        }
    }
}

/// Classify the segment between two consecutive values
///
/// Neutral when both ends are inside the band, low when either end is below
/// it, high otherwise.
pub fn segment_kind(a: f64, b: f64, band: Range) -> SegmentKind {
    if band.contains(a) && band.contains(b) {
        SegmentKind::Neutral
    } else if a < band.low || b < band.low {
        SegmentKind::Low
    } else {
        SegmentKind::High
    }
}

/// Renders a series of readings into an image
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer: Send + Sync {
    /// Render `readings` (newest first, non-empty) in `mode` units
    fn render(&self, readings: &[Reading], mode: UnitMode) -> Result<RenderedChart>;
}

/// PNG chart renderer backed by plotters
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    style: ChartStyle,
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    pub fn new(style: ChartStyle, width: u32, height: u32) -> Self {
        Self {
            style,
            width,
            height,
        }
    }
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self::new(ChartStyle::default(), 800, 400)
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, readings: &[Reading], mode: UnitMode) -> Result<RenderedChart> {
        let newest = readings
            .first()
            .ok_or_else(|| MonitorError::Render("no readings to plot".to_string()))?;

        let axis = mode.axis_range();
        let band = mode.chart_band();
        let thresholds = mode.status_thresholds();

        // x: minutes relative to the newest reading, plotted oldest first
        let points: Vec<(f64, f64)> = readings
            .iter()
            .rev()
            .map(|r| {
                let minutes = (r.timestamp - newest.timestamp).num_seconds() as f64 / 60.0;
                let value = convert(r.raw_value, mode).clamp(axis.low, axis.high);
                (minutes, value)
            })
            .collect();

        let (mut x_min, mut x_max) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)),
        );
        if x_max - x_min < f64::EPSILON {
            x_min -= SINGLE_POINT_PADDING_MIN;
            x_max += SINGLE_POINT_PADDING_MIN;
        }

        let (width, height) = (self.width, self.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .build_cartesian_2d(x_min..x_max, axis.low..axis.high)
                .map_err(render_error)?;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x_min, band.low), (x_max, band.high)],
                    BAND_COLOR.mix(0.2).filled(),
                )))
                .map_err(render_error)?;

            chart
                .draw_series([thresholds.low, thresholds.high].into_iter().map(|y| {
                    PathElement::new(vec![(x_min, y), (x_max, y)], GUIDE_COLOR.stroke_width(1))
                }))
                .map_err(render_error)?;

            match self.style {
                ChartStyle::Segmented => {
                    chart
                        .draw_series(points.windows(2).map(|pair| {
                            let kind = segment_kind(pair[0].1, pair[1].1, band);
                            PathElement::new(vec![pair[0], pair[1]], kind.color().stroke_width(2))
                        }))
                        .map_err(render_error)?;

                    chart
                        .draw_series(points.iter().map(|&(x, y)| {
                            let kind = segment_kind(y, y, band);
                            Circle::new((x, y), 4, kind.color().filled())
                        }))
                        .map_err(render_error)?;
                }
                ChartStyle::SingleColor => {
                    chart
                        .draw_series(LineSeries::new(
                            points.iter().copied(),
                            NEUTRAL_COLOR.stroke_width(2),
                        ))
                        .map_err(render_error)?;

                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&(x, y)| Circle::new((x, y), 4, NEUTRAL_COLOR.filled())),
                        )
                        .map_err(render_error)?;
                }
            }

            root.present().map_err(render_error)?;
        }

        let bitmap = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| MonitorError::Render("bitmap size mismatch".to_string()))?;

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(bitmap)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(render_error)?;

        Ok(RenderedChart::from_bytes(bytes))
    }
}

fn render_error(err: impl Display) -> MonitorError {
    MonitorError::Render(err.to_string())
}
