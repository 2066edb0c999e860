use embedded_hal::digital::v2::OutputPin;

use crate::channel::Channel;
use crate::clock::Clock;
use crate::debounce::Debounce;

/// Per-channel button handler.
///
/// Owns its channel and debounce record outright, so a handler can never
/// reach another channel's state. [`TriggerHandler::on_edge`] neither
/// blocks nor allocates and is meant to be called from interrupt context.
pub struct TriggerHandler<O, C, D> {
    channel: Channel<O>,
    clock: C,
    debouncer: D,
}

impl<O, C, D> TriggerHandler<O, C, D>
where
    O: OutputPin,
    C: Clock,
    D: Debounce,
{
    pub fn new(channel: Channel<O>, clock: C, debouncer: D) -> Self {
        Self {
            channel,
            clock,
            debouncer,
        }
    }

    /// Handle one falling edge on the trigger line.
    ///
    /// Returns `Ok(true)` when the edge was accepted and the channel flipped,
    /// `Ok(false)` when it fell inside the debounce window.
    #[inline(always)]
    pub fn on_edge(&mut self) -> Result<bool, O::Error> {
        let now = self.clock.now_millis();
        if !self.debouncer.is_isr_valid(now) {
            return Ok(false);
        }

        self.channel.toggle()?;
        Ok(true)
    }

    pub fn channel(&self) -> &Channel<O> {
        &self.channel
    }

    pub fn debouncer(&self) -> &D {
        &self.debouncer
    }
}

/// Falling-edge interrupt facility.
///
/// `on_falling_edge` configures `trigger_pin` as a pulled-up input and
/// arranges for `handler` to run on every high to low transition.
pub trait EdgeDetect<H> {
    type Error;

    fn on_falling_edge(&mut self, trigger_pin: u8, handler: H) -> Result<(), Self::Error>;
}
