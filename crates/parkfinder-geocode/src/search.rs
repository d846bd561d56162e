//! Postcode submission against shared selection state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use parkfinder_core::{Coordinate, SearchTicket, SelectionState};

use crate::client::PostcodeClient;

/// Records `raw` as the postcode text, resolves it, and applies the outcome.
///
/// The state lock is held only while starting and finishing the search, never
/// across the network call, so filter toggles keep working meanwhile. When a
/// later submission has started before this one completes, this result is
/// dropped. If this future is itself dropped mid-flight (a caller timeout or
/// `select!`), the in-flight flag is released for its ticket. Returns whether
/// the outcome was applied.
pub async fn submit_postcode(
    client: &PostcodeClient,
    state: &Mutex<SelectionState>,
    raw: &str,
) -> bool {
    let ticket = {
        let mut guard = lock(state);
        guard.set_postcode_text(raw);
        guard.begin_search()
    };
    let pending = PendingSearch {
        state,
        ticket: Some(ticket.clone()),
    };

    let outcome = client.resolve(&ticket.postcode).await.map_err(|err| {
        tracing::warn!(
            postcode = %ticket.postcode,
            generation = ticket.generation,
            error = %err,
            "postcode resolution failed"
        );
        err.to_string()
    });

    let applied = pending.finish(outcome);
    if applied {
        tracing::info!(
            postcode = %ticket.postcode,
            generation = ticket.generation,
            "postcode search settled"
        );
    }
    applied
}

fn lock(state: &Mutex<SelectionState>) -> MutexGuard<'_, SelectionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a search ticket until its outcome is applied; abandons it on drop.
struct PendingSearch<'a> {
    state: &'a Mutex<SelectionState>,
    ticket: Option<SearchTicket>,
}

impl PendingSearch<'_> {
    fn finish(mut self, outcome: Result<Coordinate, String>) -> bool {
        match self.ticket.take() {
            Some(ticket) => lock(self.state).finish_search(&ticket, outcome),
            None => false,
        }
    }
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if lock(self.state).abandon_search(&ticket) {
                tracing::debug!(
                    postcode = %ticket.postcode,
                    generation = ticket.generation,
                    "postcode search abandoned before completion"
                );
            }
        }
    }
}
