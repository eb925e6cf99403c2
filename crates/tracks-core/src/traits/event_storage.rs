use crate::errors::TracksResult;
use crate::event::{Event, EventId};

/// Result of one dispatch cycle run through [`IEventStorage::drain_batch`].
#[derive(Debug)]
pub enum DrainOutcome<E> {
    /// Nothing was pending.
    Empty,
    /// The batch was sent and removed. `removed` can be lower than the batch
    /// size if another caller removed some of those events first.
    Sent { removed: usize },
    /// `send` failed; every event in the batch is still pending.
    Failed { attempted: usize, error: E },
}

/// Pending-event storage: append, snapshot, count, remove by id.
///
/// Every operation is atomic with respect to the whole collection and
/// returns owned copies, never views into storage.
pub trait IEventStorage: Send + Sync {
    // --- Enqueue ---
    fn append(&self, event: &Event) -> TracksResult<()>;

    // --- Read ---
    /// All pending events in insertion order.
    fn all_events(&self) -> TracksResult<Vec<Event>>;
    fn count(&self) -> TracksResult<usize>;
    /// The oldest `limit` pending events in insertion order.
    fn pending_batch(&self, limit: usize) -> TracksResult<Vec<Event>>;

    // --- Remove ---
    /// Remove the pending events whose ids appear in `ids`. Unknown ids are
    /// ignored. Returns how many rows were actually removed.
    fn remove_ids(&self, ids: &[EventId]) -> TracksResult<usize>;

    /// Remove the given events, matched by id only.
    fn remove(&self, events: &[Event]) -> TracksResult<usize> {
        let ids: Vec<EventId> = events.iter().map(Event::id).collect();
        self.remove_ids(&ids)
    }

    /// Remove every pending event.
    fn clear(&self) -> TracksResult<usize>;

    // --- Dispatch ---
    /// Hand the oldest `limit` events to `send` and remove exactly those
    /// events if it succeeds. No retry: a failed batch stays pending for the
    /// caller's next cycle.
    fn drain_batch<F, E>(&self, limit: usize, send: F) -> TracksResult<DrainOutcome<E>>
    where
        Self: Sized,
        F: FnOnce(&[Event]) -> Result<(), E>,
    {
        let batch = self.pending_batch(limit)?;
        if batch.is_empty() {
            return Ok(DrainOutcome::Empty);
        }
        match send(&batch) {
            Ok(()) => {
                let removed = self.remove(&batch)?;
                Ok(DrainOutcome::Sent { removed })
            }
            Err(error) => Ok(DrainOutcome::Failed {
                attempted: batch.len(),
                error,
            }),
        }
    }
}
