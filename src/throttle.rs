use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub type TicketId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    #[allow(dead_code)]
    pub issued_at: Instant,
}

/// Whether a new classification call may be issued right now.
///
/// A missing `last_call` counts as long ago.
pub fn should_invoke(
    now: Instant,
    last_call: Option<Instant>,
    min_interval: Duration,
    in_flight: usize,
    cap: usize,
    busy: bool,
) -> bool {
    let interval_elapsed = match last_call {
        Some(last) => now.saturating_duration_since(last) > min_interval,
        None => true,
    };

    !busy && interval_elapsed && in_flight < cap
}

/// Rate and concurrency guard for classification calls.
///
/// Calls refused by [`Throttle::try_acquire`] are dropped, never queued. Every
/// issued ticket is released exactly once, by [`Throttle::complete`] or
/// [`Throttle::cancel`]; releasing it again is a no-op.
///
/// The busy flag is held until the newest ticket is released, so calls never
/// overlap. With [`Throttle::with_release_on_dispatch`] it drops as soon as the
/// call reaches its worker and up to `cap` calls may run at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    min_interval: Duration,
    cap: usize,
    release_on_dispatch: bool,
    last_call: Option<Instant>,
    busy: Option<TicketId>,
    in_flight: BTreeMap<TicketId, Instant>,
    next_id: TicketId,
}

impl Throttle {
    pub fn new(min_interval: Duration, cap: usize) -> Self {
        Self {
            min_interval,
            cap,
            release_on_dispatch: false,
            last_call: None,
            busy: None,
            in_flight: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn with_release_on_dispatch(mut self, release_on_dispatch: bool) -> Self {
        self.release_on_dispatch = release_on_dispatch;
        self
    }

    pub fn try_acquire(&mut self, now: Instant) -> Option<Ticket> {
        if !should_invoke(
            now,
            self.last_call,
            self.min_interval,
            self.in_flight.len(),
            self.cap,
            self.is_busy(),
        ) {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight.insert(id, now);
        self.busy = Some(id);
        self.last_call = Some(now);

        Some(Ticket { id, issued_at: now })
    }

    /// The call behind `id` has been handed to its worker; the ticket stays in flight.
    pub fn mark_dispatched(&mut self, id: TicketId) {
        if self.release_on_dispatch && self.busy == Some(id) {
            self.busy = None;
        }
    }

    pub fn complete(&mut self, id: TicketId) -> bool {
        self.release(id)
    }

    pub fn cancel(&mut self, id: TicketId) -> bool {
        self.release(id)
    }

    /// Cancels every ticket that has been in flight for at least `timeout`.
    pub fn cancel_stale(&mut self, now: Instant, timeout: Duration) -> Vec<TicketId> {
        let stale: Vec<TicketId> = self
            .in_flight
            .iter()
            .filter(|(_, issued_at)| now.saturating_duration_since(**issued_at) >= timeout)
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            self.release(*id);
        }

        stale
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn tickets(&self) -> Vec<TicketId> {
        self.in_flight.keys().copied().collect()
    }

    #[allow(dead_code)]
    pub fn is_in_flight(&self, id: TicketId) -> bool {
        self.in_flight.contains_key(&id)
    }

    #[allow(dead_code)]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[allow(dead_code)]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    fn release(&mut self, id: TicketId) -> bool {
        if self.in_flight.remove(&id).is_none() {
            return false;
        }
        if self.busy == Some(id) {
            self.busy = None;
        }
        true
    }
}
