/// Identifies one scheduled composite pass.
///
/// Tickets are handed to the tick source (timer, vsync callback, or an explicit flush) and passed
/// back when it fires. A ticket that was cancelled or superseded never fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameTicket(pub u64);

/// Counters describing scheduler activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Calls to `request_render` and `force_render`.
    pub requests: u64,
    /// Passes scheduled (one per issued ticket).
    pub scheduled: u64,
    /// Requests absorbed by an already pending pass.
    pub coalesced: u64,
    /// Pending passes cancelled before they fired.
    pub cancelled: u64,
    /// Passes that fired and asked for a composite.
    pub fired: u64,
}

/// Coalesces redraw requests into at most one pending composite pass.
///
/// A dirty flag plus a single pending slot: requests while a pass is pending only set the flag,
/// and the pass reads whatever state exists when it runs. Forcing cancels the pending ticket and
/// issues a fresh one.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    needs_render: bool,
    pending: Option<FrameTicket>,
    next_ticket: u64,
    stats: SchedulerStats,
}

impl RenderScheduler {
    /// Idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the display dirty. Returns a ticket only when a new pass had to be scheduled.
    pub fn request_render(&mut self) -> Option<FrameTicket> {
        self.stats.requests += 1;
        self.needs_render = true;
        if self.pending.is_some() {
            self.stats.coalesced += 1;
            tracing::trace!("render request coalesced");
            return None;
        }
        Some(self.issue())
    }

    /// Schedule a pass even if one is pending; the pending one is cancelled first.
    pub fn force_render(&mut self) -> FrameTicket {
        self.stats.requests += 1;
        self.needs_render = true;
        self.cancel_pending();
        let ticket = self.issue();
        tracing::debug!(ticket = ticket.0, "forced render scheduled");
        ticket
    }

    /// Called by the tick source. Returns `true` if the caller should composite now.
    ///
    /// Stale tickets are ignored. A live ticket clears the pending slot whether or not a
    /// render was still needed.
    pub fn fire(&mut self, ticket: FrameTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        let run = std::mem::take(&mut self.needs_render);
        if run {
            self.stats.fired += 1;
        }
        run
    }

    /// Drop any pending pass and the dirty flag.
    pub fn cancel(&mut self) {
        self.cancel_pending();
        self.needs_render = false;
    }

    /// Ticket of the pass waiting to run, if any.
    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// `true` when a render has been requested and not yet performed.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Activity counters.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.stats.cancelled += 1;
        }
    }

    fn issue(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.stats.scheduled += 1;
        ticket
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
