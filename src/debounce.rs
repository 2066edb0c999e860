/// Filter applied to every edge before it may act on a channel.
pub trait Debounce {
    /// Decide whether an edge seen at `now_ms` is a real press.
    fn is_isr_valid(&mut self, now_ms: u32) -> bool;
}

/// Fixed quiet window after each accepted edge.
///
/// A button bursts a handful of edges within a few ms of every press;
/// anything within `window_ms` of the last accepted edge is dropped.
/// Rejected edges don't restart the window.
pub struct ClassicDebounce {
    window_ms: u32,
    last_accepted: Option<u32>,
}

impl ClassicDebounce {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Timestamp of the last accepted edge, `None` until the first press.
    pub fn last_accepted(&self) -> Option<u32> {
        self.last_accepted
    }
}

impl Debounce for ClassicDebounce {
    #[inline(always)]
    fn is_isr_valid(&mut self, now_ms: u32) -> bool {
        if let Some(last) = self.last_accepted {
            // unsigned difference stays correct across a counter rollover
            if now_ms.wrapping_sub(last) <= self.window_ms {
                return false;
            }
        }

        self.last_accepted = Some(now_ms);
        true
    }
}
