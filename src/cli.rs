//! Command-line surface of `pushover-tool`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pushover-tool")]
#[command(version)]
#[command(about = "Send Pushover notifications, await acknowledgements and validate user keys")]
pub struct Cli {
    /// Path to the JSON token file ({"token": "..."}). `$VAR` and `${VAR}` are expanded.
    #[arg(long, global = true, env = "PUSHOVER_TOKEN_PATH")]
    pub token_path: Option<String>,

    /// Deadline for the selected subcommand (e.g. 90s, 10m, 1h30m)
    #[arg(long, global = true, default_value = "1h", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a message to a user or group
    Message(MessageArgs),

    /// Await acknowledgement of an emergency message
    Receipt(ReceiptArgs),

    /// Validate a user or group key (OK / INVALID printed to stdout)
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// The user/group key to message
    #[arg(long)]
    pub user: String,

    /// The message to send. Read from stdin when unset
    #[arg(long)]
    pub message: Option<String>,

    /// The message title. An empty value sends no title
    #[arg(long, default_value = "pushover-tool")]
    pub title: String,

    /// Send at emergency priority and print the receipt id to stdout
    #[arg(long)]
    pub emergency: bool,

    /// Redelivery period for unacknowledged emergency messages
    #[arg(long, default_value = "10m", value_parser = parse_duration)]
    pub emergency_retry: Duration,

    /// Expiration age for unacknowledged emergency messages
    #[arg(long, default_value = "1h", value_parser = parse_duration)]
    pub emergency_expire: Duration,
}

#[derive(Debug, Args)]
pub struct ReceiptArgs {
    /// The receipt id to wait upon. Read from stdin when unset
    #[arg(long)]
    pub receipt: Option<String>,

    /// Interval between receipt lookups (at least 10s)
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    pub interval: Duration,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// The user/group key to validate
    #[arg(long)]
    pub user: String,
}

/// Parse `90`, `90s`, `500ms`, `10m`, `1h30m` and similar.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_owned());
    }
    if let Ok(secs) = input.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration {input:?}"))?;
        if digits == 0 {
            return Err(format!("invalid duration {input:?}"));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|err| format!("invalid duration {input:?}: {err}"))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3600)),
            unit => return Err(format!("unknown unit {unit:?} in duration {input:?}")),
        };
        total = total.saturating_add(part);
        rest = &rest[unit_len..];
    }
    Ok(total)
}
