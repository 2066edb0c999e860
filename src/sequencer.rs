//! Power-on sequencing.
//!
//! Channel 0 comes up first, the remaining channels follow after
//! [`AUX_CHANNEL_DELAY_MS`]. Buttons are armed last so that no trigger can
//! ever see an unconfigured bank.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use log::info;

use crate::channel::SwitchBank;
use crate::clock::Clock;
use crate::config::{AUX_CHANNEL_DELAY_MS, DEBOUNCE_WINDOW_MS};
use crate::debounce::ClassicDebounce;
use crate::error::SwitchError;
use crate::trigger::{EdgeDetect, TriggerHandler};

/// The handler armed for every channel.
pub type ChannelTrigger<O, C> = TriggerHandler<O, C, ClassicDebounce>;

/// Startup progress, strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SequencerState {
    Unconfigured,
    OutputsReady,
    Channel0Active,
    AllActive,
    HandlersArmed,
}

pub struct Sequencer<O, C, const N: usize> {
    // taken by `arm`, the channels then belong to their handlers
    bank: Option<SwitchBank<O, N>>,
    clock: C,
    state: SequencerState,
}

impl<O, C, const N: usize> Sequencer<O, C, N>
where
    O: OutputPin,
    C: Clock + Clone,
{
    pub fn new(bank: SwitchBank<O, N>, clock: C) -> Self {
        Self {
            bank: Some(bank),
            clock,
            state: SequencerState::Unconfigured,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// The channel table, `None` once the handlers are armed.
    pub fn bank(&self) -> Option<&SwitchBank<O, N>> {
        self.bank.as_ref()
    }

    fn bank_mut(&mut self) -> &mut SwitchBank<O, N> {
        match self.bank.as_mut() {
            Some(bank) => bank,
            None => panic!("switch bank already handed to trigger handlers"),
        }
    }

    /// Run the whole startup sequence and hand every channel to its
    /// trigger handler.
    pub fn run<D, E>(
        &mut self,
        delay: &mut D,
        edges: &mut E,
    ) -> Result<(), SwitchError<O::Error, E::Error>>
    where
        D: DelayMs<u32>,
        E: EdgeDetect<ChannelTrigger<O, C>>,
    {
        self.power_up(delay).map_err(SwitchError::Line)?;
        self.arm(edges).map_err(SwitchError::Arm)
    }

    /// Steps up to [`SequencerState::AllActive`]. Blocks for the aux delay.
    ///
    /// # Panics
    /// When the sequence already ran.
    pub fn power_up<D>(&mut self, delay: &mut D) -> Result<(), O::Error>
    where
        D: DelayMs<u32>,
    {
        assert_eq!(
            self.state,
            SequencerState::Unconfigured,
            "power-on sequence runs once"
        );

        self.bank_mut().initialize_outputs()?;
        self.advance(SequencerState::OutputsReady);

        self.bank_mut().set_channel(0, true)?;
        self.advance(SequencerState::Channel0Active);

        delay.delay_ms(AUX_CHANNEL_DELAY_MS);

        for id in 1..N {
            self.bank_mut().set_channel(id, true)?;
        }
        self.advance(SequencerState::AllActive);
        Ok(())
    }

    /// Attach every channel's trigger line to its handler.
    ///
    /// # Panics
    /// When called before [`Sequencer::power_up`] completed.
    pub fn arm<E>(&mut self, edges: &mut E) -> Result<(), E::Error>
    where
        E: EdgeDetect<ChannelTrigger<O, C>>,
    {
        assert_eq!(
            self.state,
            SequencerState::AllActive,
            "trigger handlers armed before power-up"
        );

        let channels = match self.bank.take() {
            Some(bank) => bank.into_channels(),
            None => panic!("switch bank already handed to trigger handlers"),
        };
        for channel in channels {
            let trigger_pin = channel.pins().trigger;
            let debouncer = ClassicDebounce::new(DEBOUNCE_WINDOW_MS);
            let handler = TriggerHandler::new(channel, self.clock.clone(), debouncer);
            edges.on_falling_edge(trigger_pin, handler)?;
        }

        self.advance(SequencerState::HandlersArmed);
        Ok(())
    }

    fn advance(&mut self, next: SequencerState) {
        debug_assert!(next > self.state);
        self.state = next;
        info!("[{} ms] startup: {:?}", self.clock.now_millis(), next);
    }
}
