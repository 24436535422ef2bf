//! Outbound side-effect queue.
//!
//! Turn and reference persistence are side effects of a turn, not part of
//! its result. Handlers enqueue them on a bounded channel and return; a
//! drain worker applies them against the write-side ports and logs every
//! delivery failure explicitly. Nothing is fire-and-forget.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::foundation::{InterviewId, ProcessId};
use crate::domain::interview::ConversationTurn;
use crate::ports::{ReferenceStore, SaveOutcome, TurnStore};

/// One deferred write.
#[derive(Debug, Clone)]
pub enum SideEffect {
    SaveTurn {
        interview_id: InterviewId,
        turn: ConversationTurn,
    },
    SaveReference {
        interview_id: InterviewId,
        process_id: ProcessId,
        is_new: bool,
        confidence: f32,
    },
}

/// Sending half of the side-effect queue, cloned into each handler.
#[derive(Debug, Clone)]
pub struct SideEffectQueue {
    tx: mpsc::Sender<SideEffect>,
}

impl SideEffectQueue {
    /// Creates a bounded queue, returning the sender and the receiver to
    /// hand to [`spawn_drain_worker`].
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<SideEffect>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Enqueues a side effect without blocking the turn.
    ///
    /// A full or closed queue drops the effect and logs it; the interview
    /// itself must never stall on persistence.
    pub fn enqueue(&self, effect: SideEffect) {
        if let Err(err) = self.tx.try_send(effect) {
            warn!(error = %err, "side effect dropped: queue full or closed");
        }
    }
}

/// Spawns the drain worker. The worker runs until every sender is
/// dropped, then exits after draining the channel.
pub fn spawn_drain_worker(
    mut rx: mpsc::Receiver<SideEffect>,
    turns: Arc<dyn TurnStore>,
    references: Arc<dyn ReferenceStore>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(effect) = rx.recv().await {
            apply(&effect, turns.as_ref(), references.as_ref()).await;
        }
        debug!("side-effect queue closed, drain worker exiting");
    })
}

async fn apply(effect: &SideEffect, turns: &dyn TurnStore, references: &dyn ReferenceStore) {
    match effect {
        SideEffect::SaveTurn {
            interview_id,
            turn,
        } => {
            if let Err(err) = turns.save_turn(*interview_id, turn).await {
                warn!(
                    %interview_id,
                    sequence = turn.sequence_number,
                    error = %err,
                    "turn persistence failed"
                );
            }
        }
        SideEffect::SaveReference {
            interview_id,
            process_id,
            is_new,
            confidence,
        } => {
            match references
                .save_process_reference(*interview_id, *process_id, *is_new, *confidence)
                .await
            {
                Ok(SaveOutcome::Created(id)) => {
                    debug!(%interview_id, %process_id, reference_id = %id, "reference recorded");
                }
                Ok(SaveOutcome::AlreadyExists) => {
                    debug!(%interview_id, %process_id, "reference already recorded");
                }
                Err(err) => {
                    warn!(%interview_id, %process_id, error = %err, "reference persistence failed");
                }
            }
        }
    }
}
