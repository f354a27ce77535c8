//! HueBot — main entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                    │
//! │                                                             │
//! │  JsonLinesSource   LogLights   LogNotifier   LogEventSink   │
//! │  (MessageSource)   (LightPort) (NotifierPort) (EventSink)   │
//! │  StaticDirectory (ChannelDirectory)                         │
//! │                                                             │
//! │  ──────────────── Port Trait Boundary ────────────────      │
//! │                                                             │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │   HueBotService · StatusAggregator (pure logic)       │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use huebot::adapters::directory::StaticDirectory;
use huebot::adapters::json_lines::JsonLinesSource;
use huebot::adapters::log_lights::LogLights;
use huebot::adapters::log_notifier::LogNotifier;
use huebot::adapters::log_sink::LogEventSink;
use huebot::app::service::HueBotService;
use huebot::config::{DEFAULT_CONFIG_PATH, GeneralConfig, HueBotConfig};
use huebot::lights::HueIndicator;

/// Turn chat build results into status light colours.
#[derive(Parser, Debug)]
#[command(name = "huebot", version, about)]
struct Args {
    /// Path to the JSON config file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "HUEBOT_CONFIG")]
    config: PathBuf,

    /// JSON-lines event stream to read instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Stop on the first stream error and log at debug level.
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ── 1. Logging ────────────────────────────────────────────
    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("HueBot v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = HueBotConfig::load(&args.config)
        .with_context(|| format!("missing or invalid {}", args.config.display()))?;
    let general = GeneralConfig {
        debug: args.debug || config.general.debug,
        ..config.general.clone()
    };

    // ── 3. Adapters + service ─────────────────────────────────
    let directory = StaticDirectory::from_config(&config);
    info!("{} channels in directory", directory.len());

    let mut service = HueBotService::new(directory);
    service.attach_lights(HueIndicator::new(
        LogLights::new(config.hue.bridge_ip.clone()),
        &config.lights,
    ));
    let notifier =
        service.attach_notifier(LogNotifier::new(), config.slack.reporting_channel.clone());

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut source = JsonLinesSource::new(reader);
    let mut sink = LogEventSink::new();

    service.start(&mut sink);

    // ── 4. Poll loop ──────────────────────────────────────────
    service
        .run(&mut source, &mut sink, &general)
        .context("message stream failed")?;

    info!(
        "shutting down: {} reports applied, {} alerts posted, aggregate {}",
        service.reports_applied(),
        notifier.borrow().port().sent(),
        service.state().aggregate()
    );
    Ok(())
}
