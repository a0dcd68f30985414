//! Glucose bot
//!
//! Parses chat commands and produces platform-neutral [`BotResponse`]s.
//! Delivery is left to the host: a reply with an image attachment goes out
//! as a photo with caption, anything else as a text message.
//!
//! # Example
//!
//! ```rust,ignore
//! use nightscout_monitor::bot::{BotConfig, GlucoseBot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = GlucoseBot::new(BotConfig::from_env()?)?;
//!     let reply = bot.handle("/glucose").await?;
//!     println!("{}", reply.content);
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::api::{EntrySource, NightscoutClient};
use crate::bio;
use crate::chart::ChartRenderer;
use crate::config::{BioConfig, MonitorConfig};
use crate::error::{MonitorError, Result};
use crate::interface::{BotPlatform, BotResponse, Formatter, FormatterFactory};
use crate::monitor::GlucoseMonitor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub use commands::Command;

/// Configuration for the glucose bot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotConfig {
    /// Glucose pipeline settings
    pub monitor: MonitorConfig,
    /// Inline bio card
    pub bio: BioConfig,
    /// Target platform; selects the formatter
    pub platform: BotPlatform,
}

impl BotConfig {
    /// Defaults with `NIGHTSCOUT_*` environment overrides applied
    pub fn from_env() -> Result<Self> {
        let config = Self {
            monitor: MonitorConfig::default().with_env(),
            ..Default::default()
        };
        config.monitor.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading bot configuration");

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            MonitorError::Config(format!("{}: {e}", path.display()))
        })?;
        config.monitor.validate()?;
        Ok(config)
    }

    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    monitor: Option<MonitorConfig>,
    bio: Option<BioConfig>,
    platform: Option<BotPlatform>,
}

impl BotConfigBuilder {
    pub fn monitor(mut self, config: MonitorConfig) -> Self {
        self.monitor = Some(config);
        self
    }

    pub fn bio(mut self, config: BioConfig) -> Self {
        self.bio = Some(config);
        self
    }

    pub fn platform(mut self, platform: BotPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        BotConfig {
            monitor: self.monitor.unwrap_or_default(),
            bio: self.bio.unwrap_or_default(),
            platform: self.platform.unwrap_or_default(),
        }
    }
}

/// Glucose monitor bot
pub struct GlucoseBot {
    monitor: GlucoseMonitor,
    formatter: Box<dyn Formatter>,
    config: BotConfig,
}

impl GlucoseBot {
    /// Create a bot talking to Nightscout over HTTP
    pub fn new(config: BotConfig) -> Result<Self> {
        let client = NightscoutClient::with_timeout(config.monitor.request_timeout())?;
        Ok(Self::with_source(Arc::new(client), config))
    }

    /// Create a bot reading entries from `source`
    pub fn with_source(source: Arc<dyn EntrySource>, config: BotConfig) -> Self {
        Self {
            monitor: GlucoseMonitor::new(source),
            formatter: FormatterFactory::create(config.platform),
            config,
        }
    }

    /// Draw charts with `renderer` instead of the configured PNG renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.monitor = self.monitor.with_renderer(renderer);
        self
    }

    /// Process user input and return a reply
    ///
    /// Only unparseable input is an error; a `/glucose` invocation always
    /// yields a reply.
    pub async fn handle(&self, input: &str) -> Result<BotResponse> {
        let command = Command::parse(input)?;
        Ok(self.execute_command(command).await)
    }

    /// Execute a parsed command
    pub async fn execute_command(&self, command: Command) -> BotResponse {
        info!(command = ?command, platform = ?self.config.platform, "Handling command");

        match command {
            Command::Glucose => self
                .monitor
                .run(&self.config.monitor, self.formatter.as_ref())
                .await
                .into_response(self.formatter.as_ref()),
            Command::InlineBio => bio::inline_bio(&self.config.bio),
            Command::Help => {
                let entries: Vec<(&str, &str)> = Command::ALL
                    .iter()
                    .map(|command| (command.name(), command.description()))
                    .collect();
                BotResponse::new(
                    self.formatter.format_help(&entries),
                    self.formatter.response_type(),
                )
            }
        }
    }
}
