//! Nightscout glucose monitor bot module
//!
//! Answers a chat command with the latest continuous glucose monitor reading
//! from a Nightscout server:
//!
//! - Fetches recent entries over the Nightscout REST API
//! - Converts mg/dL to mmol/L when configured
//! - Classifies the newest value as normal, hypo or hyper
//! - Maps the trend direction code to an arrow glyph
//! - Renders an optional PNG chart of recent readings
//! - Composes an HTML or plain-text reply in English or Russian
//!
//! # Architecture
//!
//! A [`GlucoseBot`] parses commands and hands `/glucose` to a
//! [`GlucoseMonitor`], which fetches through an [`EntrySource`] and presents
//! the result with a [`ReadingPresenter`]. The presenter is the error
//! boundary: failures become warning text rather than errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use nightscout_monitor::{BotConfig, GlucoseBot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = GlucoseBot::new(BotConfig::from_env()?)?;
//!     let reply = bot.handle("/glucose").await?;
//!
//!     println!("{}", reply.content);
//!     if let Some(chart) = reply.image().and_then(|a| a.bytes()) {
//!         std::fs::write("glucose.png", chart)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bio;
pub mod bot;
pub mod chart;
pub mod config;
pub mod error;
pub mod i18n;
pub mod interface;
pub mod monitor;
pub mod presenter;
pub mod reading;
pub mod status;
pub mod trend;
pub mod units;

// Re-export main types for convenience
pub use api::{EntrySource, NightscoutClient};
pub use bot::{BotConfig, Command, GlucoseBot};
pub use chart::{ChartRenderer, ChartStyle, PngChartRenderer, RenderedChart};
pub use config::{BioConfig, LinkButton, MonitorConfig};
pub use error::{MonitorError, Result};
pub use i18n::Language;
pub use interface::{BotPlatform, BotResponse, Formatter};
pub use monitor::GlucoseMonitor;
pub use presenter::{Presentation, ReadingPresenter};
pub use reading::Reading;
pub use status::{Status, classify};
pub use units::{UnitMode, convert};
