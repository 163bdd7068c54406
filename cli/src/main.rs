//! payseal CLI
//!
//! Encode fields into a sealed `{"Data", "Seal"}` record, or verify and decode one.

use std::io::Read as _;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use payseal_core::{CodecError, DEMO_SECRET_KEY, PayloadCodec, SecretKey, SignedPayload, compute_seal};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "payseal")]
#[command(about = "Seal and verify payment gateway payloads", long_about = None)]
#[command(version = payseal_core::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Shared secret key (falls back to the gateway demo key)
    #[arg(long, global = true, env = "PAYSEAL_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal NAME=VALUE fields and print the JSON record
    Encode {
        /// Fields in order, e.g. amount=1000 currencyCode=978
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// Verify a sealed record and print its fields
    Decode {
        /// Raw Data field
        #[arg(long, requires = "seal", conflicts_with = "json")]
        data: Option<String>,

        /// Seal for --data
        #[arg(long, requires = "data")]
        seal: Option<String>,

        /// JSON record file, or - for stdin
        #[arg(long)]
        json: Option<String>,

        /// Print fields as a JSON object instead of NAME=VALUE lines
        #[arg(long)]
        json_output: bool,
    },

    /// Print the seal for a raw Data string
    Seal {
        data: String,
    },
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {arg:?}"))
}

fn resolve_key(secret_key: Option<String>) -> String {
    secret_key.unwrap_or_else(|| {
        warn!("no secret key configured, using the non-production demo key");
        DEMO_SECRET_KEY.to_string()
    })
}

fn read_payload(data: Option<String>, seal: Option<String>, json: Option<String>) -> Result<SignedPayload> {
    match (data, seal, json) {
        (Some(data), Some(seal), None) => Ok(SignedPayload::new(data, seal)),
        (None, None, Some(source)) => {
            let text = if source == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("reading payload from stdin")?;
                buf
            } else {
                std::fs::read_to_string(&source).with_context(|| format!("reading payload from {source}"))?
            };
            Ok(SignedPayload::from_json(&text)?)
        }
        _ => bail!("provide either --data and --seal, or --json"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let key = resolve_key(cli.secret_key);

    match cli.command {
        Commands::Encode { fields } => {
            let mut codec = PayloadCodec::new(key);
            for (name, value) in fields {
                codec.set(name, value);
            }
            println!("{}", codec.encode().to_json());
        }
        Commands::Decode { data, seal, json, json_output } => {
            let payload = read_payload(data, seal, json)?;
            let mut codec = PayloadCodec::new(key);
            let applied = codec.decode(&payload).context("payload rejected")?;
            info!(applied, "payload verified");

            if json_output {
                let object: serde_json::Map<String, serde_json::Value> = codec
                    .fields()
                    .iter()
                    .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
                    .collect();
                println!("{}", serde_json::Value::Object(object));
            } else {
                for (name, value) in codec.fields().iter() {
                    println!("{name}={value}");
                }
            }
        }
        Commands::Seal { data } => {
            println!("{}", compute_seal(&data, &SecretKey::from(key)));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "payseal=debug,payseal_core=debug" } else { "payseal=info,payseal_core=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<CodecError>() {
                Some(CodecError::SealMismatch) => ExitCode::from(2),
                Some(_) => ExitCode::from(3),
                None => ExitCode::FAILURE,
            }
        }
    }
}
