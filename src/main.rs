mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, MessageArgs, ReceiptArgs, ValidateArgs};
use pushover::{
    ClientOptions, EmergencyOptions, MessageClient, MessageText, Priority, PushoverError,
    ReceiptClient, ReceiptId, ReceiptOptions, SendMessage, Title, UserKey, ValidateClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let token_path = cli
        .token_path
        .as_deref()
        .ok_or_else(|| anyhow!("--token-path is required"))?;
    let token_path = pushover::config::expand_env(token_path)?;
    let token = pushover::config::load_token(&token_path)?;

    let cancel = CancellationToken::new();
    spawn_deadline(cli.timeout, cancel.clone());

    match cli.command {
        Command::Message(args) => message(token, args, &cancel).await,
        Command::Receipt(args) => receipt(token, args, &cancel).await,
        Command::Validate(args) => validate(token, args, &cancel).await,
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Fire `cancel` when the deadline passes or on Ctrl-C.
fn spawn_deadline(timeout: std::time::Duration, cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            () = tokio::time::sleep(timeout) => warn!(?timeout, "deadline reached, cancelling"),
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    warn!(%err, "failed to listen for Ctrl-C");
                    return;
                }
                info!("interrupted, cancelling");
            }
        }
        cancel.cancel();
    });
}

/// Read `input` to the end, giving up with [`PushoverError::Cancelled`] once `cancel` fires.
async fn read_input<R>(mut input: R, cancel: &CancellationToken) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = String::new();
    tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(PushoverError::Cancelled.into()),
        read = input.read_to_string(&mut buf) => {
            read.context("failed to read standard input")?;
        }
    }
    Ok(buf)
}

async fn message(token: String, args: MessageArgs, cancel: &CancellationToken) -> Result<()> {
    let user = UserKey::new(args.user).context("no recipient user specified")?;
    let text = match args.message {
        Some(text) => text,
        None => read_input(tokio::io::stdin(), cancel).await?,
    };
    let mut request = SendMessage::new(user, MessageText::new(text)?);
    if !args.title.trim().is_empty() {
        request = request.with_title(Title::new(args.title)?);
    }
    if args.emergency {
        let options = EmergencyOptions::new(args.emergency_retry, args.emergency_expire)?;
        request = request.with_priority(Priority::Emergency(options));
    }

    let client = MessageClient::new(ClientOptions::new(token))
        .context("message client initialization failed")?;
    let sent = tokio::select! {
        biased;
        () = cancel.cancelled() => Err(PushoverError::Cancelled),
        sent = client.send(request) => sent,
    };
    let sent = sent.context("failed to send message")?;

    info!(request = ?sent.request, "message accepted");
    if let Some(receipt) = sent.receipt {
        println!("{receipt}");
    }
    Ok(())
}

async fn receipt(token: String, args: ReceiptArgs, cancel: &CancellationToken) -> Result<()> {
    let raw = match args.receipt {
        Some(receipt) => receipt,
        None => read_input(tokio::io::stdin(), cancel).await?,
    };
    let receipt = ReceiptId::new(raw)?;

    let client = ReceiptClient::new(ReceiptOptions::new(token, args.interval))
        .context("receipt client initialization failed")?;
    client
        .wait(&receipt, cancel)
        .await
        .context("failed to verify message receipt")?;
    Ok(())
}

async fn validate(token: String, args: ValidateArgs, cancel: &CancellationToken) -> Result<()> {
    let user = UserKey::new(args.user).context("no user/group key specified")?;
    let client = ValidateClient::new(ClientOptions::new(token))
        .context("validate client initialization failed")?;
    let status = client
        .check(&user, cancel)
        .await
        .context("failed to validate user/group key")?;
    println!("{status}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;

    use super::*;

    #[tokio::test]
    async fn read_input_returns_everything_until_eof() {
        let text = read_input(&b"disk almost full\n"[..], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(text, "disk almost full\n");
    }

    #[tokio::test(start_paused = true)]
    async fn read_input_gives_up_when_cancelled() {
        // The writer half stays open, so the reader never sees EOF.
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"partial").await.unwrap();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.cancel();
        });

        let err = read_input(reader, &cancel).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PushoverError>(),
            Some(PushoverError::Cancelled)
        ));
        drop(writer);
    }
}
