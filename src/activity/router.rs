// Deferred dispatch of book commands: submitters enqueue, one applier task drains.
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::book::SharedBook;
use crate::engine::types::SignatureCommand;

/// Destination for book commands produced while normalising remote activity.
///
/// `submit` is fire-and-forget: it must not block and does not report whether
/// the command was eventually applied.
pub trait SignatureSink {
    fn submit(&self, command: SignatureCommand);
}

/// Sink backed by an unbounded channel into [`spawn_applier`]'s task.
///
/// Commands run after the submitting task yields, in submission order. There
/// is no ordering relative to callers that lock the book directly, and a
/// submitted command cannot be cancelled.
#[derive(Debug, Clone)]
pub struct DeferredDispatcher {
    tx: mpsc::UnboundedSender<SignatureCommand>,
}

impl SignatureSink for DeferredDispatcher {
    fn submit(&self, command: SignatureCommand) {
        if let Err(e) = self.tx.send(command) {
            let sig = e.0.signature();
            warn!(offerer = %sig.offerer, id = %sig.id, "Applier has stopped, dropping signature command");
        }
    }
}

pub fn spawn_applier(book: SharedBook) -> (DeferredDispatcher, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<SignatureCommand>();

    let handle = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            let (offerer, id) = {
                let sig = command.signature();
                (sig.offerer.clone(), sig.id.clone())
            };
            let result = book.lock().apply(command);
            match result {
                Ok(()) => debug!(%offerer, %id, "Applied deferred signature command"),
                Err(e) => warn!(%offerer, %id, error = %e, "Deferred signature command failed"),
            }
        }
        debug!("All dispatchers dropped, applier exiting");
    });

    (DeferredDispatcher { tx }, handle)
}
