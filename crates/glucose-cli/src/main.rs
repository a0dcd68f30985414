//! Command-line front end for the glucose monitor bot
//!
//! Runs one bot command and prints the reply. A chart, when attached, is
//! written to a PNG file.
//!
//! # Usage
//!
//! ```bash
//! export NIGHTSCOUT_URL="https://my-nightscout.example.org"
//! cargo run -p glucose-cli -- --units mmol/L
//! cargo run -p glucose-cli -- --no-graph --plain /glucose
//! ```

use anyhow::Context;
use clap::Parser;
use nightscout_monitor::interface::AttachmentContent;
use nightscout_monitor::{
    BotConfig, BotPlatform, BotResponse, ChartStyle, GlucoseBot, Language, UnitMode,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "glucose-cli")]
#[command(about = "Show the latest Nightscout glucose reading", long_about = None)]
struct Args {
    /// Bot command to run
    #[arg(default_value = "/glucose")]
    command: String,

    /// Nightscout server URL
    #[arg(short, long)]
    url: Option<String>,

    /// Display units: mg/dL or mmol/L
    #[arg(long)]
    units: Option<String>,

    /// Number of readings to chart
    #[arg(short, long)]
    count: Option<usize>,

    /// Skip the chart
    #[arg(long)]
    no_graph: bool,

    /// Draw the chart line in a single color
    #[arg(long)]
    single_color: bool,

    /// Plain text instead of HTML markup
    #[arg(long)]
    plain: bool,

    /// Reply language code (en, ru)
    #[arg(long)]
    lang: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the chart image
    #[arg(long, default_value = "glucose.png")]
    chart_out: PathBuf,
}

impl Args {
    fn bot_config(&self) -> anyhow::Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => BotConfig::from_env()?,
        };

        let monitor = &mut config.monitor;
        if let Some(url) = &self.url {
            monitor.base_url.clone_from(url);
        }
        if let Some(units) = &self.units {
            monitor.unit_mode = UnitMode::parse(units);
        }
        if let Some(count) = self.count {
            monitor.graph_points = count;
        }
        if self.no_graph {
            monitor.show_graph = false;
        }
        if self.single_color {
            monitor.chart_style = ChartStyle::SingleColor;
        }
        if let Some(lang) = &self.lang {
            monitor.language = Language::from_code(lang);
        }
        monitor.validate()?;

        if self.plain {
            config.platform = BotPlatform::Cli;
        }

        Ok(config)
    }
}

fn print_reply(reply: &BotResponse, chart_out: &Path) -> anyhow::Result<()> {
    if let Some(image) = reply.image() {
        match &image.content {
            AttachmentContent::Bytes(bytes) => {
                std::fs::write(chart_out, bytes)
                    .with_context(|| format!("writing {}", chart_out.display()))?;
                println!("[chart: {} ({} bytes)]", chart_out.display(), bytes.len());
            }
            AttachmentContent::Url(url) => println!("[image: {url}]"),
        }
    }

    if !reply.content.is_empty() {
        println!("{}", reply.content);
    }

    for row in &reply.action_rows {
        let buttons: Vec<String> = row
            .iter()
            .map(|action| format!("[{}]({})", action.label, action.action))
            .collect();
        println!("{}", buttons.join("  "));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    glucose_utils::init_tracing_with_default("warn,nightscout_monitor=info");

    let args = Args::parse();
    let config = args.bot_config()?;

    info!(
        base_url = %config.monitor.base_url,
        units = %config.monitor.unit_mode,
        command = %args.command,
        "Starting glucose-cli"
    );

    let bot = GlucoseBot::new(config)?;
    let reply = bot.handle(&args.command).await?;

    print_reply(&reply, &args.chart_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glucose-cli"]).unwrap();
        assert_eq!(args.command, "/glucose");
        assert_eq!(args.chart_out, PathBuf::from("glucose.png"));
        assert!(!args.no_graph);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = Args::try_parse_from([
            "glucose-cli",
            "--url",
            "https://ns.example.org",
            "--units",
            "mmol/L",
            "--count",
            "24",
            "--single-color",
            "--plain",
            "/bio",
        ])
        .unwrap();

        let config = args.bot_config().unwrap();
        assert_eq!(args.command, "/bio");
        assert_eq!(config.monitor.base_url, "https://ns.example.org");
        assert_eq!(config.monitor.unit_mode, UnitMode::MmolL);
        assert_eq!(config.monitor.entry_count(), 24);
        assert_eq!(config.monitor.chart_style, ChartStyle::SingleColor);
        assert_eq!(config.platform, BotPlatform::Cli);
    }

    #[test]
    fn test_no_graph_requests_one_entry() {
        let args =
            Args::try_parse_from(["glucose-cli", "--url", "https://ns.example.org", "--no-graph"])
                .unwrap();
        assert_eq!(args.bot_config().unwrap().monitor.entry_count(), 1);
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let args = Args::try_parse_from([
            "glucose-cli",
            "--url",
            "https://ns.example.org",
            "--count",
            "0",
        ])
        .unwrap();
        assert!(args.bot_config().is_err());
    }
}
