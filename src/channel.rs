//! Channel registry and output driver.
//!
//! Every level change on an output line goes through [`Channel::set`], which
//! keeps `active` equal to the last level written to the line.

use embedded_hal::digital::v2::OutputPin;
use log::debug;

use crate::config::ChannelPins;

/// One switchable circuit: its output line, the pins it is wired to and
/// the level last written to the line.
pub struct Channel<O> {
    id: usize,
    pins: ChannelPins,
    line: O,
    active: bool,
}

impl<O: OutputPin> Channel<O> {
    /// `line` must already be configured as a driven output.
    pub fn new(id: usize, pins: ChannelPins, line: O) -> Self {
        Self {
            id,
            pins,
            line,
            active: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pins(&self) -> ChannelPins {
        self.pins
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Drive the line to `state` and mirror it.
    ///
    /// The mirror is only updated once the write went through, so a failed
    /// write leaves both untouched.
    #[inline(always)]
    pub fn set(&mut self, state: bool) -> Result<(), O::Error> {
        if state {
            self.line.set_high()?;
        } else {
            self.line.set_low()?;
        }
        self.active = state;
        Ok(())
    }

    #[inline(always)]
    pub fn toggle(&mut self) -> Result<(), O::Error> {
        self.set(!self.active)
    }
}

/// The fixed table of channels, owned by the sequencer until the trigger
/// handlers are armed.
pub struct SwitchBank<O, const N: usize> {
    channels: [Channel<O>; N],
    ready: bool,
}

impl<O: OutputPin, const N: usize> SwitchBank<O, N> {
    pub fn new(channels: [Channel<O>; N]) -> Self {
        assert!(N > 0, "a switch bank needs at least one channel");
        Self {
            channels,
            ready: false,
        }
    }

    /// Bring every output line to a known low level and mark the bank ready.
    ///
    /// # Panics
    /// When called twice.
    pub fn initialize_outputs(&mut self) -> Result<(), O::Error> {
        assert!(!self.ready, "switch outputs initialized twice");
        for channel in self.channels.iter_mut() {
            channel.set(false)?;
        }
        self.ready = true;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// # Panics
    /// When `id` is out of range or the outputs are not initialized yet.
    pub fn set_channel(&mut self, id: usize, state: bool) -> Result<(), O::Error> {
        let channel = self.checked_mut(id);
        debug!("channel {} -> {}", id, if state { "on" } else { "off" });
        channel.set(state)
    }

    /// # Panics
    /// Same preconditions as [`SwitchBank::set_channel`].
    pub fn toggle_channel(&mut self, id: usize) -> Result<(), O::Error> {
        let state = !self.checked_mut(id).is_active();
        self.set_channel(id, state)
    }

    /// # Panics
    /// When `id` is out of range.
    pub fn is_active(&self, id: usize) -> bool {
        assert!(id < N, "channel {} out of range (0..{})", id, N);
        self.channels[id].is_active()
    }

    pub fn channels(&self) -> &[Channel<O>; N] {
        &self.channels
    }

    /// Hand out the channels, one owner each.
    ///
    /// # Panics
    /// When the outputs are not initialized yet.
    pub fn into_channels(self) -> [Channel<O>; N] {
        assert!(self.ready, "switch outputs not initialized");
        self.channels
    }

    fn checked_mut(&mut self, id: usize) -> &mut Channel<O> {
        assert!(id < N, "channel {} out of range (0..{})", id, N);
        assert!(self.ready, "switch outputs not initialized");
        &mut self.channels[id]
    }
}
