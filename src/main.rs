//! `daily-art` CLI entry point.
//!
//! Provides `compile`, `send`, and `publish` subcommands for turning a post
//! draft into a Telegram photo message and delivering it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use daily_art::config::Config;
use daily_art::logging::{self, LoggingGuard};
use daily_art::post::Post;
use daily_art::telegram::{publish_post, CaptionSink, MessagePayload, TelegramPublisher};

/// Daily Art: caption compiler and Telegram publisher.
#[derive(Parser)]
#[command(name = "daily-art", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Compile a post draft into a message file.
    Compile {
        /// Post draft (JSON).
        post: PathBuf,
        /// Hashtag line; defaults to the configured one.
        #[arg(long)]
        hashtag: Option<String>,
        /// Write the message here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Send a compiled message file to Telegram.
    Send {
        /// Message file produced by `compile`.
        message: PathBuf,
    },
    /// Compile a post draft and send it in one step.
    Publish {
        /// Post draft (JSON).
        post: PathBuf,
        /// Hashtag line; defaults to the configured one.
        #[arg(long)]
        hashtag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;
    let _logging_guard = init_logging(&config)?;

    match cli.command {
        Command::Compile { post, hashtag, out } => {
            handle_compile(&config, &post, hashtag.as_deref(), out.as_deref())
        }
        Command::Send { message } => handle_send(&config, &message).await,
        Command::Publish { post, hashtag } => {
            handle_publish(&config, &post, hashtag.as_deref()).await
        }
    }
}

fn init_logging(config: &Config) -> anyhow::Result<Option<LoggingGuard>> {
    match &config.logging.dir {
        Some(dir) => logging::init_with_file(dir, &config.logging.level).map(Some),
        None => {
            logging::init_cli(&config.logging.level);
            Ok(None)
        }
    }
}

fn handle_compile(
    config: &Config,
    post_path: &Path,
    hashtag: Option<&str>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let post = Post::load(post_path)?;
    let hashtag = hashtag.unwrap_or(&config.caption.hashtag);
    let payload = MessagePayload::from_post(&post, hashtag)
        .with_context(|| format!("cannot build message for {}", post_path.display()))?;
    let json = serde_json::to_string_pretty(&payload).context("failed to serialize message")?;

    match out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                entities = payload.caption_entities.len(),
                "message saved"
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn handle_send(config: &Config, message_path: &Path) -> anyhow::Result<()> {
    let payload = MessagePayload::load(message_path)?;
    let publisher =
        TelegramPublisher::from_config(config).context("telegram is not configured")?;
    publisher
        .send_photo(&payload)
        .await
        .with_context(|| format!("failed to send {}", message_path.display()))?;
    Ok(())
}

async fn handle_publish(
    config: &Config,
    post_path: &Path,
    hashtag: Option<&str>,
) -> anyhow::Result<()> {
    let post = Post::load(post_path)?;
    let publisher =
        TelegramPublisher::from_config(config).context("telegram is not configured")?;
    let hashtag = hashtag.unwrap_or(&config.caption.hashtag);
    let payload = publish_post(&publisher, &post, hashtag)
        .await
        .with_context(|| format!("failed to publish {}", post_path.display()))?;
    info!(
        title = %post.title,
        caption_units = daily_art::caption::utf16_len(&payload.caption),
        "post published"
    );
    Ok(())
}
