//! keydiv CLI: AES-CMAC key diversification
//!
//! Usage:
//!   keydiv derive --uid <HEX> --app-id <HEX> --fix <HEX> --emk <HEX>
//!   keydiv raw    --emk <HEX> --data <HEX>
//!   keydiv batch  --emk <HEX> [--input <FILE>]

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use keydiv::audit::{AuditSink, Diversifier, FanoutAuditSink, FileAuditSink, TracingAuditSink};
use keydiv::collect;
use tracing_subscriber::EnvFilter;

/// AES-CMAC key diversification (AN10922, AES-128).
#[derive(Parser)]
#[command(name = "keydiv", version, about)]
struct Cli {
    /// Append-only audit log (JSON lines).
    #[arg(
        long,
        value_name = "FILE",
        env = "KEYDIV_LOG",
        default_value = "diversification.log",
        global = true
    )]
    log: PathBuf,
    /// Do not write the audit log file.
    #[arg(long, default_value_t = false, global = true)]
    no_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MasterKeyArg {
    /// Master key (EMK) as 32 hex characters.
    #[arg(long, value_name = "HEX", env = "KEYDIV_EMK", hide_env_values = true)]
    emk: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a card key from UID, APPID and FIX.
    Derive {
        /// Card UID.
        #[arg(long, value_name = "HEX")]
        uid: String,
        /// Dynamic application identifier.
        #[arg(long, value_name = "HEX")]
        app_id: String,
        /// Fixed field.
        #[arg(long, value_name = "HEX")]
        fix: String,
        #[command(flatten)]
        key: MasterKeyArg,
    },
    /// Derive from an already concatenated diversification input.
    Raw {
        /// Diversification input (may be empty).
        #[arg(long, value_name = "HEX", default_value = "")]
        data: String,
        #[command(flatten)]
        key: MasterKeyArg,
    },
    /// Derive one key per `UID,APPID,FIX` line.
    Batch {
        /// Input file; stdin when omitted or `-`.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        key: MasterKeyArg,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let diversifier = build_diversifier(&cli);

    let result = match &cli.command {
        Commands::Derive {
            uid,
            app_id,
            fix,
            key,
        } => cmd_derive(&diversifier, uid, app_id, fix, &key.emk),
        Commands::Raw { data, key } => cmd_raw(&diversifier, data, &key.emk),
        Commands::Batch { input, key } => cmd_batch(&diversifier, input.as_ref(), &key.emk),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_diversifier(cli: &Cli) -> Diversifier {
    let mut sinks: Vec<Arc<dyn AuditSink>> = vec![Arc::new(TracingAuditSink)];
    if !cli.no_log {
        sinks.push(Arc::new(FileAuditSink::new(&cli.log)));
    }
    Diversifier::new(Arc::new(FanoutAuditSink::new(sinks))).with_actor("cli")
}

fn cmd_derive(d: &Diversifier, uid: &str, app_id: &str, fix: &str, emk: &str) -> Result<()> {
    let req = collect::card_request(uid, app_id, fix, emk)?;
    let key = d
        .derive(req.master_key_hex, &req.input_hex)
        .context("diversification failed")?;
    println!("{}", key);
    Ok(())
}

fn cmd_raw(d: &Diversifier, data: &str, emk: &str) -> Result<()> {
    let req = collect::raw_request(data, emk)?;
    let key = d
        .derive(req.master_key_hex, &req.input_hex)
        .context("diversification failed")?;
    println!("{}", key);
    Ok(())
}

fn cmd_batch(d: &Diversifier, input: Option<&PathBuf>, emk: &str) -> Result<()> {
    let emk = emk.trim();
    if emk.is_empty() {
        bail!(collect::CollectError::MissingMasterKey);
    }
    // Reject a bad master key once instead of once per line.
    keydiv::MasterKey::from_hex(emk).context("invalid EMK")?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = fs::File::open(path).with_context(|| format!("read {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    let summary = collect::run_batch(d, emk, reader, io::stdout().lock())
        .context("batch I/O failed")?;
    if summary.failed > 0 {
        bail!("{} of {} line(s) failed", summary.failed, summary.processed);
    }
    Ok(())
}
