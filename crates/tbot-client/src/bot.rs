//! The bot client: identity bootstrap, update stream, and shutdown.

use std::sync::Arc;
use tbot_core::{
    config::Config,
    error::TbotError,
    model::{UpdateEvent, User},
    traits::Transport,
};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::http::HttpTransport;
use crate::polling;

/// Telegram bot client with a background long-polling update loop.
///
/// Updates and fetch errors arrive in delivery order through [`BotApi::recv`].
/// [`BotApi::close`] stops the loop and waits for it to exit.
pub struct BotApi {
    pub(crate) transport: Arc<dyn Transport>,
    me: User,
    updates: Mutex<mpsc::Receiver<UpdateEvent>>,
    shutdown: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BotApi {
    /// Verify the credential with `getMe`, then start the update loop.
    ///
    /// Nothing is spawned if the identity check fails.
    pub async fn new(transport: Arc<dyn Transport>) -> Result<Self, TbotError> {
        let me = transport.get_me().await?;
        info!("telegram bot authenticated as {me}");

        // Capacity 1: a slow consumer delays the next fetch instead of buffering.
        let (tx, rx) = mpsc::channel(1);
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(polling::run_update_loop(
            transport.clone(),
            tx,
            shutdown.clone(),
        ));

        Ok(Self {
            transport,
            me,
            updates: Mutex::new(rx),
            shutdown,
            task: Mutex::new(Some(task)),
        })
    }

    /// Build an [`HttpTransport`] from config and connect.
    pub async fn connect(config: &Config) -> Result<Self, TbotError> {
        let transport = HttpTransport::new(&config.bot, &config.http)?;
        Self::new(Arc::new(transport)).await
    }

    /// The bot's own user id.
    pub fn id(&self) -> i64 {
        self.me.id
    }

    /// The bot's first name.
    pub fn name(&self) -> &str {
        &self.me.first_name
    }

    /// The bot's `@username`, if it has one.
    pub fn username(&self) -> Option<&str> {
        self.me.username.as_deref()
    }

    /// The full identity returned by `getMe`.
    pub fn me(&self) -> &User {
        &self.me
    }

    /// Next update or surfaced fetch error.
    ///
    /// Returns `None` once the client is closed and everything already handed
    /// off has been received.
    pub async fn recv(&self) -> Option<UpdateEvent> {
        self.updates.lock().await.recv().await
    }

    /// Stop the update loop and wait until it has exited.
    ///
    /// An in-flight long poll is not interrupted, so this can take up to the
    /// long-poll timeout. Calling it again, or concurrently, is harmless: every
    /// caller returns only after the loop is gone.
    pub async fn close(&self) {
        self.shutdown.cancel();

        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            if let Err(e) = handle.await {
                warn!("telegram update loop ended abnormally: {e}");
            }
            info!("telegram bot client closed");
        }
    }

    /// Whether [`BotApi::close`] has been called (or the client dropped).
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for BotApi {
    fn drop(&mut self) {
        // The loop exits at its next iteration boundary; nobody waits for it.
        self.shutdown.cancel();
    }
}
