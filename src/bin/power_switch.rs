use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use esp_idf_hal::{delay::FreeRtos, gpio::*, prelude::Peripherals};
use esp_idf_svc::log::EspLogger;
use esp_idf_sys::{self as _, EspError};
use log::{error, info};

use esp_power_switch::config::{CHANNEL_PINS, STATUS_LED_PIN};
use esp_power_switch::{Channel, EspClock, EspEdgeDetect, Sequencer, SwitchBank, SwitchError};

/// Bind a configured output to its channel, refusing a pin that
/// disagrees with the table.
fn channel(id: usize, line: GpioPin<Output>) -> Channel<GpioPin<Output>> {
    let pins = CHANNEL_PINS[id];
    pins.expect_output(line.pin());
    Channel::new(id, pins, line)
}

fn main() -> Result<(), EspError> {
    // runtime patches from esp-idf-sys, must run before anything else
    esp_idf_sys::link_patches();
    EspLogger::initialize_default();

    let pins = Peripherals::take().unwrap().pins;

    let mut status_led = pins.gpio13.into_output()?.degrade();
    assert_eq!(status_led.pin(), i32::from(STATUS_LED_PIN));
    status_led.set_low()?;
    info!("status led gpio{} low", STATUS_LED_PIN);

    let bank = SwitchBank::new([
        channel(0, pins.gpio12.into_output()?.degrade()),
        channel(1, pins.gpio5.into_output()?.degrade()),
        channel(2, pins.gpio4.into_output()?.degrade()),
        channel(3, pins.gpio15.into_output()?.degrade()),
    ]);

    let mut edges = EspEdgeDetect::new();
    if let Err(err) = Sequencer::new(bank, EspClock).run(&mut FreeRtos, &mut edges) {
        error!("startup aborted: {}", err);
        let (SwitchError::Line(cause) | SwitchError::Arm(cause)) = err;
        return Err(cause);
    }
    info!("{} buttons armed", edges.armed());

    loop {
        // everything else happens in the button interrupts
        FreeRtos.delay_ms(1000u32);
    }
}
