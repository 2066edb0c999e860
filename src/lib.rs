mod channel;
mod clock;
pub mod config;
mod debounce;
mod error;
mod sequencer;
mod trigger;

#[cfg(feature = "esp")]
mod esp_edge;

pub use channel::*;
pub use clock::*;
pub use debounce::*;
pub use error::*;
pub use sequencer::*;
pub use trigger::*;

#[cfg(feature = "esp")]
pub use esp_edge::*;

// Four switched power channels: channel 0 is energized at power-on, the
// others a second later. Each channel's button then toggles it, debounced
// per channel from its own falling edge interrupt.
