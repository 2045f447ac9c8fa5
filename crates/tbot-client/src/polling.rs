//! Long-polling update loop.
//!
//! One task owns the polling offset, fetches one batch at a time, hands the
//! updates to the consumer in id order and advances the offset only after the
//! whole batch was handed off. Transient failures are retried after a fixed
//! delay with the same offset. Application errors are put on the stream and
//! the fetch is retried with the same offset after the same delay.

use std::sync::Arc;
use std::time::Duration;
use tbot_core::{
    model::{Update, UpdateEvent},
    traits::Transport,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Server-side long-poll timeout for `getUpdates`.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 60;

/// Delay before re-fetching after a failed fetch.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Why the loop stopped handing off a batch.
enum Handoff {
    Done,
    Closed,
    ReceiverDropped,
}

pub(crate) async fn run_update_loop(
    transport: Arc<dyn Transport>,
    tx: mpsc::Sender<UpdateEvent>,
    shutdown: CancellationToken,
) {
    let mut offset: Option<i64> = None;
    info!("telegram update loop started");

    while !shutdown.is_cancelled() {
        match transport.get_updates(offset, LONG_POLL_TIMEOUT_SECS).await {
            Ok(updates) => {
                if updates.is_empty() {
                    continue;
                }
                match dispatch(updates, offset, &tx, &shutdown).await {
                    (Handoff::Done, next) => offset = next,
                    (Handoff::Closed, _) => break,
                    (Handoff::ReceiverDropped, _) => {
                        info!("telegram update receiver dropped, stopping poll");
                        return;
                    }
                }
            }
            Err(e) if e.is_transient() => {
                warn!(
                    "telegram poll failed (retry in {}s): {e}",
                    RETRY_DELAY.as_secs()
                );
                if !pause(&shutdown).await {
                    break;
                }
            }
            Err(e) => {
                error!(
                    "telegram getUpdates error (retry in {}s): {e}",
                    RETRY_DELAY.as_secs()
                );
                match handoff(&tx, UpdateEvent::Error(e), &shutdown).await {
                    Handoff::Done => {}
                    Handoff::Closed => break,
                    Handoff::ReceiverDropped => {
                        info!("telegram update receiver dropped, stopping poll");
                        return;
                    }
                }
                if !pause(&shutdown).await {
                    break;
                }
            }
        }
    }

    info!("telegram update loop stopped");
}

/// Hand a batch to the consumer in id order and return the next offset.
///
/// Ids below `offset` and repeated ids are skipped so nothing is delivered
/// twice. If the client is closed while the consumer is not reading, the rest
/// of the batch is dropped without advancing the offset; the server keeps
/// those updates until a later fetch confirms them.
async fn dispatch(
    mut updates: Vec<Update>,
    offset: Option<i64>,
    tx: &mpsc::Sender<UpdateEvent>,
    shutdown: &CancellationToken,
) -> (Handoff, Option<i64>) {
    updates.sort_by_key(|u| u.id);
    debug!(
        "telegram batch of {} updates ({}..={})",
        updates.len(),
        updates[0].id,
        updates[updates.len() - 1].id
    );

    let mut next = offset;
    for update in updates {
        if next.is_some_and(|n| update.id < n) {
            warn!("skipping already delivered update {}", update.id);
            continue;
        }
        let id = update.id;

        match handoff(tx, UpdateEvent::Update(update), shutdown).await {
            Handoff::Done => next = Some(id.saturating_add(1)),
            stopped => return (stopped, offset),
        }
    }

    (Handoff::Done, next)
}

/// Blocking handoff of one event; a close request ends the wait.
async fn handoff(
    tx: &mpsc::Sender<UpdateEvent>,
    event: UpdateEvent,
    shutdown: &CancellationToken,
) -> Handoff {
    tokio::select! {
        biased;
        sent = tx.send(event) => match sent {
            Ok(()) => Handoff::Done,
            Err(_) => Handoff::ReceiverDropped,
        },
        _ = shutdown.cancelled() => Handoff::Closed,
    }
}

/// Sleep for [`RETRY_DELAY`]; returns `false` if the client was closed meanwhile.
async fn pause(shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(RETRY_DELAY) => true,
    }
}
