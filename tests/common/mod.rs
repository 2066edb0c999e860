//! Host-side stand-ins for the board: recording output lines, a manual
//! millisecond clock, a delay that advances it and an edge facility that
//! keeps the armed handlers for the test to fire.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use esp_power_switch::config::{ChannelPins, CHANNEL_COUNT, CHANNEL_PINS};
use esp_power_switch::{Channel, ChannelTrigger, Clock, EdgeDetect, Sequencer, SwitchBank};

#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u32>>);

impl ManualClock {
    pub fn at(ms: u32) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u32 {
        self.0.get()
    }
}

/// Output line logging `(time, level)` for every write.
#[derive(Clone)]
pub struct MockLine {
    clock: ManualClock,
    writes: Rc<RefCell<Vec<(u32, bool)>>>,
}

impl MockLine {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            writes: Rc::default(),
        }
    }

    pub fn writes(&self) -> Vec<(u32, bool)> {
        self.writes.borrow().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.writes.borrow().last().map(|&(_, level)| level)
    }

    fn record(&self, level: bool) {
        self.writes
            .borrow_mut()
            .push((self.clock.now_millis(), level));
    }
}

impl OutputPin for MockLine {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.record(true);
        Ok(())
    }
}

/// Blocking delay that just moves the manual clock forward.
pub struct MockDelay {
    clock: ManualClock,
    pub waits: Vec<u32>,
}

impl MockDelay {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            waits: Vec::new(),
        }
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
        self.clock.advance(ms);
    }
}

pub type Trigger = ChannelTrigger<MockLine, ManualClock>;

/// Keeps armed handlers keyed by trigger pin.
#[derive(Default)]
pub struct MockEdges {
    pub armed: Vec<(u8, Trigger)>,
    pub armed_at: Vec<u32>,
    clock: ManualClock,
}

impl MockEdges {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            armed: Vec::new(),
            armed_at: Vec::new(),
            clock: clock.clone(),
        }
    }

    /// Simulate a falling edge on `trigger_pin`. Returns whether it was accepted.
    pub fn fire(&mut self, trigger_pin: u8) -> bool {
        let (_, handler) = self
            .armed
            .iter_mut()
            .find(|(pin, _)| *pin == trigger_pin)
            .expect("no handler on that pin");
        handler.on_edge().unwrap()
    }

    pub fn handler(&self, channel: usize) -> &Trigger {
        self.armed
            .iter()
            .map(|(_, handler)| handler)
            .find(|handler| handler.channel().id() == channel)
            .expect("channel not armed")
    }
}

impl EdgeDetect<Trigger> for MockEdges {
    type Error = Infallible;

    fn on_falling_edge(&mut self, trigger_pin: u8, handler: Trigger) -> Result<(), Infallible> {
        self.armed_at.push(self.clock.now_millis());
        self.armed.push((trigger_pin, handler));
        Ok(())
    }
}

pub struct Board {
    pub clock: ManualClock,
    pub lines: Vec<MockLine>,
    pub delay: MockDelay,
    pub edges: MockEdges,
}

impl Board {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(ms: u32) -> Self {
        let clock = ManualClock::at(ms);
        let lines = (0..CHANNEL_COUNT).map(|_| MockLine::new(&clock)).collect();
        Self {
            delay: MockDelay::new(&clock),
            edges: MockEdges::new(&clock),
            clock,
            lines,
        }
    }

    pub fn sequencer(&self) -> Sequencer<MockLine, ManualClock, CHANNEL_COUNT> {
        let channels: [Channel<MockLine>; CHANNEL_COUNT] = core::array::from_fn(|id| {
            Channel::new(id, CHANNEL_PINS[id], self.lines[id].clone())
        });
        Sequencer::new(SwitchBank::new(channels), self.clock.clone())
    }

    /// Run the full startup and return the board with armed handlers.
    pub fn started() -> Self {
        let mut board = Self::new();
        board
            .sequencer()
            .run(&mut board.delay, &mut board.edges)
            .unwrap();
        board
    }

    pub fn trigger_pin(channel: usize) -> u8 {
        let pins: ChannelPins = CHANNEL_PINS[channel];
        pins.trigger
    }

    /// Press channel's button at absolute time `ms`.
    pub fn press(&mut self, channel: usize, ms: u32) -> bool {
        self.clock.set(ms);
        self.edges.fire(Self::trigger_pin(channel))
    }

    pub fn active(&self, channel: usize) -> bool {
        self.edges.handler(channel).channel().is_active()
    }
}
