//! Board wiring and timing, fixed at compile time.

/// Number of switched channels on the board.
pub const CHANNEL_COUNT: usize = 4;

/// Minimum time between two accepted button presses on one channel.
pub const DEBOUNCE_WINDOW_MS: u32 = 200;

/// Settling time between channel 0 and the auxiliary channels at power-on.
pub const AUX_CHANNEL_DELAY_MS: u32 = 1000;

/// Status LED, held low once the board is up.
pub const STATUS_LED_PIN: u8 = 13;

/// GPIO numbers of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPins {
    /// line driving the relay / power rail
    pub output: u8,
    /// button input, active low
    pub trigger: u8,
}

impl ChannelPins {
    pub const fn new(output: u8, trigger: u8) -> Self {
        Self { output, trigger }
    }

    /// Check a typed output pin against the table.
    ///
    /// # Panics
    /// When `gpio` is not this channel's output line.
    pub fn expect_output(&self, gpio: i32) {
        assert_eq!(
            gpio,
            i32::from(self.output),
            "output wired to gpio{}, table says gpio{}",
            gpio,
            self.output
        );
    }
}

pub const CHANNEL_PINS: [ChannelPins; CHANNEL_COUNT] = [
    ChannelPins::new(12, 0),
    ChannelPins::new(5, 9),
    ChannelPins::new(4, 10),
    ChannelPins::new(15, 14),
];
