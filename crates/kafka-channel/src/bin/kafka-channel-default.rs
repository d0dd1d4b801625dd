//! Apply KafkaChannel admission defaults to a manifest.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kafka_channel::telemetry::{self, LogFormat};
use kafka_channel::{ChannelDefaults, Defaultable, DefaultingContext, KafkaChannel};

/// Fill unset KafkaChannel fields the way the admission webhook would
#[derive(Parser)]
#[command(name = "kafka-channel-default")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Manifest to default. Reads stdin when omitted or "-".
    manifest: Option<PathBuf>,

    /// YAML file with numPartitions, replicationFactor and retentionDuration defaults
    #[arg(short, long, env = "KAFKA_CHANNEL_DEFAULTS_FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log line encoding
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

/// Output format
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level, cli.log_format);

    let defaults = match &cli.config {
        Some(path) => ChannelDefaults::from_file(path)
            .with_context(|| format!("loading defaults from {}", path.display()))?,
        None => ChannelDefaults::builtin(),
    }
    .with_env_overrides()?;
    let ctx = DefaultingContext::new(defaults);

    let input = match cli.manifest.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut manifest: serde_json::Value =
        serde_yaml::from_str(&input).context("parsing KafkaChannel manifest")?;
    // A manifest without a spec defaults like one with an empty spec.
    if let Some(object) = manifest.as_object_mut() {
        if object.get("spec").map_or(true, |spec| spec.is_null()) {
            object.insert("spec".to_string(), serde_json::json!({}));
        }
    }
    let mut channel: KafkaChannel =
        serde_json::from_value(manifest).context("decoding KafkaChannel manifest")?;
    channel.set_defaults(&ctx);
    info!(name = ?channel.metadata.name, "Applied defaults");

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&channel)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&channel)?),
    }

    Ok(())
}
