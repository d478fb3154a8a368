//! `ats2` - command-line access to the Tele2 ATS2 PBX open API.
//!
//! Configuration comes from `ATS2_*` environment variables (a `.env` file is
//! honoured) or from `ats2.json` / `ats2.toml` in the working directory.
//!
//! This is a CLI tool, so `println!` and `eprintln!` are used for user-facing
//! output; diagnostics go through `tracing` on stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use ats2_client::logging::{error_label, init_tracing};
use ats2_client::{Ats2Client, Ats2Error, CallRecordsQuery, RecordSortKey, SortOrder};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[tokio::main]
async fn main() -> ExitCode {
    // .env may set RUST_LOG, so load it before the subscriber exists
    let dotenv = dotenvy::dotenv();
    init_tracing(env::var("ATS2_LOG_JSON").is_ok_and(|v| v == "1"));
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let task = args.first().map(String::as_str);

    let result = match task {
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(command) => run(command, &args[1..]).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = e.downcast_ref::<Ats2Error>().map_or("cli", error_label);
            eprintln!("{label}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Tele2 ATS2 PBX client");
    println!();
    println!("USAGE:");
    println!("    ats2 <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    employees                         List employees");
    println!("    calls                             List active calls");
    println!("    pending                           List queued calls");
    println!("    call <employee> <client>          Click-to-call");
    println!("    records [--from T] [--to T]       List recorded calls (RFC 3339 bounds)");
    println!("            [--sort KEY] [--order ASC|DESC]");
    println!("    record <filename> <out-path>      Download one recording");
    println!("    auth                              Force a token refresh");
    println!("    help                              Show this help message");
}

async fn run(command: &str, args: &[String]) -> anyhow::Result<()> {
    let config = ats2_infra::config::load()?;
    let client = Ats2Client::from_config(&config)?;

    match command {
        "employees" => print_json(&client.employees().await?),
        "calls" => print_json(&client.monitoring_calls().await?),
        "pending" => print_json(&client.monitoring_calls_pending().await?),
        "call" => {
            let [employee, client_phone] = args else {
                bail!("usage: ats2 call <employee> <client>");
            };
            client.click_to_call(employee, client_phone).await?;
            println!("Call started");
            Ok(())
        }
        "records" => {
            let query = records_query(args)?;
            print_json(&client.call_records_info(&query).await?)
        }
        "record" => {
            let [filename, out] = args else {
                bail!("usage: ats2 record <filename> <out-path>");
            };
            let file = client.call_records_file(filename).await?;
            let bytes = file.into_bytes().await?;
            let out = PathBuf::from(out);
            tokio::fs::write(&out, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Saved {} bytes to {}", bytes.len(), out.display());
            Ok(())
        }
        "auth" => {
            client.forced_auth().await?;
            println!("Tokens refreshed");
            Ok(())
        }
        unknown => Err(anyhow!("Unknown command: {unknown} (try `ats2 help`)")),
    }
}

/// Recorded calls, newest first unless `--sort`/`--order` say otherwise.
fn records_query(args: &[String]) -> anyhow::Result<CallRecordsQuery> {
    let mut from = None;
    let mut to = None;
    let mut key = RecordSortKey::Date;
    let mut order = SortOrder::Desc;
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| anyhow!("{flag} needs a value"))?;
        match flag.as_str() {
            "--from" => from = Some(parse_time(value)?),
            "--to" => to = Some(parse_time(value)?),
            "--sort" => key = value.parse().map_err(|e: String| anyhow!(e))?,
            "--order" => order = value.parse().map_err(|e: String| anyhow!(e))?,
            other => bail!("Unknown option: {other}"),
        }
    }

    let mut query = CallRecordsQuery::new().recorded_only().sort(key, order);
    query.date_from = from;
    query.date_to = to;
    Ok(query)
}

fn parse_time(value: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 timestamp: {value}"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
