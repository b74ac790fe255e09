//! `presence-ng`: inspect the Presence-NG profile and dry-run its codecs.

use clap::{Parser, Subcommand};
use log::error;
use presence_ng_profile::codec::PropertyValue;
use presence_ng_profile::config::{self, Config};
use presence_ng_profile::registry::LogSink;
use presence_ng_profile::revision::{self, Revision};
use presence_ng_profile::zcl::{self, MemoryEndpoint, Report};
use presence_ng_profile::{PresenceProfile, ProfileError, Result, profile};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "presence-ng")]
#[command(about = "Inspect the Presence-NG device profile and dry-run its codecs")]
struct Cli {
    /// Firmware revision (r1..r8)
    #[arg(long, env = "PRESENCE_REVISION")]
    revision: Option<String>,

    /// Delay before re-reading state after factory_reset
    #[arg(long, env = "PRESENCE_FACTORY_RESET_SETTLE_MS")]
    settle_ms: Option<u64>,

    /// Let concurrent bitfield writes interleave
    #[arg(long)]
    unserialized: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print which features each firmware revision carries
    Capabilities,
    /// Print the revision's attributes and commands as JSON
    Schema,
    /// Print the registered properties as JSON
    Properties,
    /// Decode a report (`{"cluster": ..., "data": {...}}`) from a file or stdin
    Decode {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Set a property against an in-memory device and print the requests
    Plan {
        property: String,
        /// JSON value; anything that is not JSON is taken as a label
        value: String,

        /// Report used to seed the device state
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Print the requests issued while configuring a new device
    Configure,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env();
    if let Some(revision) = &cli.revision {
        config.profile.revision = revision
            .parse()
            .map_err(|_| ProfileError::UnknownRevision(revision.clone()))?;
    }
    if let Some(ms) = cli.settle_ms {
        config.profile.factory_reset_settle_ms = ms;
    }
    if cli.unserialized {
        config.profile.serialize_bitfield_writes = false;
    }
    Ok(config)
}

fn read_report(path: Option<&Path>) -> Result<Report> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn parse_value(value: &str) -> PropertyValue {
    serde_json::from_str(value).unwrap_or_else(|_| PropertyValue::from(value))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_capabilities(selected: Revision) {
    println!("{} {} capabilities", profile::VENDOR, profile::MODEL);
    for row in revision::capability_table() {
        let span = match row.until {
            Some(until) if until == row.since => row.since.to_string(),
            Some(until) => format!("{}-{}", row.since, until),
            None => format!("{}+", row.since),
        };
        let marker = if row.feature.available_in(selected) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<26} {:<6} {}",
            marker,
            row.feature.to_string(),
            span,
            row.description
        );
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let revision = config.profile.revision;

    match cli.command {
        Commands::Capabilities => print_capabilities(revision),
        Commands::Schema => {
            let attributes: Vec<_> = zcl::clusters::attributes(revision).collect();
            let commands: Vec<_> = zcl::clusters::commands(revision).collect();
            print_json(&serde_json::json!({
                "revision": revision,
                "endpoint": zcl::PRESENCE_ENDPOINT,
                "attributes": attributes,
                "commands": commands,
            }))?;
        }
        Commands::Properties => {
            let profile = PresenceProfile::build(&config.profile, Arc::new(LogSink))?;
            let infos: Vec<_> = profile.registry().descriptors().map(|d| d.info()).collect();
            print_json(&infos)?;
        }
        Commands::Decode { file } => {
            let profile = PresenceProfile::build(&config.profile, Arc::new(LogSink))?;
            let report = read_report(file.as_deref())?;
            print_json(&profile.registry().decode(&report))?;
        }
        Commands::Plan {
            property,
            value,
            state,
        } => {
            let profile = PresenceProfile::build(&config.profile, Arc::new(LogSink))?;
            let endpoint = match state {
                Some(path) => MemoryEndpoint::new().with_report(&read_report(Some(&path))?),
                None => MemoryEndpoint::new(),
            };
            let result = profile
                .registry()
                .set(&endpoint, &property, parse_value(&value))
                .await?;
            print_json(&serde_json::json!({
                "requests": endpoint.requests(),
                "result": result,
            }))?;
        }
        Commands::Configure => {
            let profile = PresenceProfile::build(&config.profile, Arc::new(LogSink))?;
            let endpoint = MemoryEndpoint::new();
            profile.configure(&endpoint).await?;
            print_json(&endpoint.requests())?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    config::load_dotenv();
    init_logger();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
