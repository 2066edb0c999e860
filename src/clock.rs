/// A monotonic millisecond counter.
///
/// The counter is allowed to wrap at `u32::MAX`; consumers compare
/// timestamps with `wrapping_sub` only.
pub trait Clock {
    fn now_millis(&self) -> u32;
}
