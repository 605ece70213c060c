// Trailing-edge debounce policy
//
// Timers live in the UI layer; this type only decides whether a timer that
// fired still represents the latest burst of events.

/// Quiescence window for editor change notifications
pub const DEBOUNCE_MS: u64 = 500;

/// Handle for one scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    generation: u64,
    due_at_ms: u64,
}

impl DebounceTicket {
    /// Time (ms) at which this ticket may fire
    pub fn due_at_ms(&self) -> u64 {
        self.due_at_ms
    }
}

/// Coalesces bursts of events into a single trailing call
///
/// Every [`notify`](Self::notify) supersedes the previously pending ticket;
/// only the most recent one can fire, and only once the window has elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u64,
    generation: u64,
    pending: Option<DebounceTicket>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record an event at `now_ms` and return the ticket to fire later
    pub fn notify(&mut self, now_ms: u64) -> DebounceTicket {
        self.generation += 1;
        let ticket = DebounceTicket {
            generation: self.generation,
            due_at_ms: now_ms.saturating_add(self.window_ms),
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Returns true exactly once for the latest ticket, after its due time
    pub fn fire(&mut self, ticket: DebounceTicket, now_ms: u64) -> bool {
        match self.pending {
            Some(pending) if pending == ticket && now_ms >= pending.due_at_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Consume the pending ticket immediately, regardless of its due time
    pub fn flush(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
