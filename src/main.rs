use clap::{Parser, Subcommand};
use std::path::Path;
use tbot_client::{BotApi, HttpTransport};
use tbot_core::{
    config,
    model::{Message, MessageKind, Update, UpdateEvent},
    request::{ChatAction, OutgoingForward, OutgoingMessage, Request},
    traits::{decode, Transport},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tbot", version, about = "Telegram Bot API client and echo bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Bot token, overrides the config file.
    #[arg(long, env = "TBOT_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the token and print the bot's identity.
    Whoami,
    /// Echo every text message back to its chat until Ctrl-C.
    Echo {
        /// Forward the original message instead of replying with its text.
        #[arg(long)]
        forward: bool,
    },
    /// Send a single text message.
    Send {
        /// Target chat id (negative for groups).
        #[arg(allow_negative_numbers = true)]
        chat_id: i64,
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The subscriber needs `log_level` from the file, so tracing starts after
    // loading and the missing-file fallback is reported here instead.
    let (mut cfg, found) = load_config(&cli.config)?;
    if let Some(token) = cli.token {
        cfg.bot.token = token;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    if !found {
        info!("config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        // One-shot commands use the transport directly; no update loop needed.
        Commands::Whoami => {
            let transport = HttpTransport::new(&cfg.bot, &cfg.http)?;
            let me = transport.get_me().await?;
            println!("User ID: {}", me.id);
            println!("Bot Name: {}", me.first_name);
            println!("Bot Username: {}", me.username.as_deref().unwrap_or("-"));
        }
        Commands::Echo { forward } => {
            let bot = BotApi::connect(&cfg).await?;
            info!(
                "echo bot {} running with token {}, press Ctrl-C to stop",
                bot.me(),
                cfg.bot.token_masked()
            );

            let shutdown = tokio::signal::ctrl_c();
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    event = bot.recv() => match event {
                        Some(UpdateEvent::Update(update)) => echo(&bot, update, forward).await,
                        Some(UpdateEvent::Error(e)) => warn!("update error: {e}"),
                        None => break,
                    },
                    _ = &mut shutdown => {
                        info!("Ctrl-C received, closing");
                        break;
                    }
                }
            }

            info!("waiting for the in-flight long poll to finish");
            bot.close().await;
        }
        Commands::Send { chat_id, text } => {
            if text.is_empty() {
                anyhow::bail!("no message provided. Usage: tbot send <chat_id> <text>");
            }
            let transport = HttpTransport::new(&cfg.bot, &cfg.http)?;
            let request = Request::from(OutgoingMessage::new(chat_id, text.join(" ")));
            let method = request.method();
            let msg: Message = decode(transport.call(method, request.into_payload()?).await?)?;
            println!("MessageID: {}, Chat: {}", msg.message_id, msg.chat);
        }
    }

    Ok(())
}

/// Load the config and report whether the file existed.
fn load_config(path: &str) -> anyhow::Result<(config::Config, bool)> {
    let found = Path::new(path).exists();
    Ok((config::load(path)?, found))
}

/// Reply to a text message with the same text, or forward it.
async fn echo(bot: &BotApi, update: Update, forward: bool) {
    let Some(msg) = update.message else {
        return;
    };
    if msg.kind() != MessageKind::Text {
        return;
    }

    if let Err(e) = bot.send_chat_action(&msg.chat, ChatAction::Typing).await {
        warn!("sendChatAction failed: {e}");
    }

    let sent = if forward {
        bot.forward_message(OutgoingForward::new(&msg.chat, &msg.chat, msg.message_id))
            .await
    } else {
        let text = msg.text.clone().unwrap_or_default();
        bot.send_message(OutgoingMessage::new(&msg.chat, text).with_reply_to(msg.message_id))
            .await
    };

    match sent {
        Ok(reply) => info!(
            "echoed update {} to {} as message {}",
            update.id, reply.chat, reply.message_id
        ),
        Err(e) => warn!("echo to {} failed: {e}", msg.chat),
    }
}
