use core::fmt::Debug;

use embedded_hal::digital::v2::OutputPin;
use esp_idf_hal::gpio::InterruptType;
use esp_idf_sys::{
    c_types::c_void, esp, esp_timer_get_time, gpio_intr_enable, gpio_isr_handler_add,
    gpio_mode_t_GPIO_MODE_INPUT, gpio_pull_mode_t_GPIO_PULLUP_ONLY, gpio_set_direction,
    gpio_set_intr_type, gpio_set_pull_mode, EspError, ESP_ERR_INVALID_STATE, ESP_OK,
};
use log::debug;

use crate::clock::Clock;
use crate::debounce::Debounce;
use crate::trigger::{EdgeDetect, TriggerHandler};

/// `millis()` on top of the esp high resolution timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

impl Clock for EspClock {
    #[inline(always)]
    fn now_millis(&self) -> u32 {
        // truncation gives the same wraparound as a 32 bit ms counter
        (unsafe { esp_timer_get_time() } / 1000) as u32
    }
}

/// Falling edge interrupts on raw gpio numbers.
///
/// Armed handlers are leaked on purpose: the firmware never detaches a
/// button, they live until power-off.
#[derive(Default)]
pub struct EspEdgeDetect {
    armed: usize,
}

impl EspEdgeDetect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trigger lines attached so far
    pub fn armed(&self) -> usize {
        self.armed
    }

    fn install_isr_service() -> Result<(), EspError> {
        unsafe {
            match esp_idf_sys::gpio_install_isr_service(0) {
                // already installed by an earlier pin
                ESP_OK | ESP_ERR_INVALID_STATE => Ok(()),
                err => Err(EspError::from(err).unwrap()),
            }
        }
    }
}

impl<O, C, D> EdgeDetect<TriggerHandler<O, C, D>> for EspEdgeDetect
where
    O: OutputPin + 'static,
    O::Error: Debug,
    C: Clock + 'static,
    D: Debounce + 'static,
{
    type Error = EspError;

    fn on_falling_edge(
        &mut self,
        trigger_pin: u8,
        handler: TriggerHandler<O, C, D>,
    ) -> Result<(), EspError> {
        let pin = trigger_pin as i32;

        esp!(unsafe { gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT) })?;
        esp!(unsafe { gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_PULLUP_ONLY) })?;
        esp!(unsafe { gpio_set_intr_type(pin, InterruptType::NegEdge.into()) })?;

        Self::install_isr_service()?;

        let handler: &'static mut TriggerHandler<O, C, D> = Box::leak(Box::new(handler));
        debug!(
            "trigger gpio{} -> channel {}",
            trigger_pin,
            handler.channel().id()
        );

        esp!(unsafe {
            gpio_isr_handler_add(
                pin,
                Some(irq_handler::<O, C, D>),
                handler as *mut TriggerHandler<O, C, D> as *mut _,
            )
        })?;
        esp!(unsafe { gpio_intr_enable(pin) })?;

        self.armed += 1;
        Ok(())
    }
}

/// This is the real interrupt handler being run on a falling edge.
/// It debounces and, if accepted, flips the channel owned by the handler.
#[inline(always)]
#[link_section = ".iram1.power_switch_trigger"]
unsafe extern "C" fn irq_handler<O, C, D>(arg: *mut c_void)
where
    O: OutputPin,
    O::Error: Debug,
    C: Clock,
    D: Debounce,
{
    let handler: &mut TriggerHandler<O, C, D> = &mut *(arg as *mut _);

    if let Err(err) = handler.on_edge() {
        panic!(
            "channel {} output write failed: {:?}",
            handler.channel().id(),
            err
        );
    }
}
