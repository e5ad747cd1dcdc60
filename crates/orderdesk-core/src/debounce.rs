//! # Debounce State Machine
//!
//! Cancel-and-reschedule bookkeeping for the suggestion lookup. The client
//! owns the actual timer; this type decides whether a fired timer may act.
//!
//! ```text
//!            schedule()                 fire(live ticket)
//!   Idle ───────────────► Pending(t) ─────────────────────► Idle
//!    ▲                      │    ▲
//!    │      cancel()        │    │ schedule()  (t superseded by t+1)
//!    └──────────────────────┘    └───────────┘
//! ```
//!
//! Tickets increase monotonically, so a timer holding a superseded ticket
//! can never fire, even if its cancellation raced with its wake-up.

/// Identifies one scheduled lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// No lookup is scheduled.
    #[default]
    Idle,
    /// A lookup is scheduled under this ticket.
    Pending { ticket: Ticket },
}

/// Debounce bookkeeping for one input.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    state: DebounceState,
    next: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Schedules a lookup, superseding any pending one.
    pub fn schedule(&mut self) -> Ticket {
        self.next += 1;
        let ticket = Ticket(self.next);
        self.state = DebounceState::Pending { ticket };
        ticket
    }

    /// Drops the pending lookup. No-op when idle.
    ///
    /// Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }

    /// A timer woke up. Returns true if it holds the live ticket and may
    /// issue its lookup; the state returns to idle in that case.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.state {
            DebounceState::Pending { ticket: live } if live == ticket => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
