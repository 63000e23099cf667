//! One-shot GPIO initialization and raw pin access.
//!
//! Configures the beam inputs and every output pin using raw ESP-IDF sys
//! calls.  Called once from `main()` before the poll loop starts.
//!
//! On host builds the pins are simulated by a level table so the rest of
//! the firmware (and tests) can run unchanged.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    log::info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    for &pin in &pins::OUTPUT_PINS {
        gpio_write(pin, false);
    }
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    for &pin in &pins::INPUT_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Gpio(ret));
        }
    }

    log::info!("hw_init: beam inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    for &pin in &pins::OUTPUT_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Gpio(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    log::info!("hw_init: outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

// ── Host simulation ───────────────────────────────────────────

/// Simulated pin levels for host builds.  Inputs can be driven from a
/// test or simulator with [`sim::set_level`].
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, Ordering};

    const PIN_COUNT: usize = 49;

    static LEVELS: [AtomicBool; PIN_COUNT] = [const { AtomicBool::new(false) }; PIN_COUNT];

    pub fn level(pin: i32) -> bool {
        usize::try_from(pin)
            .ok()
            .and_then(|idx| LEVELS.get(idx))
            .is_some_and(|l| l.load(Ordering::Relaxed))
    }

    pub fn set_level(pin: i32, high: bool) {
        if let Some(l) = usize::try_from(pin).ok().and_then(|idx| LEVELS.get(idx)) {
            l.store(high, Ordering::Relaxed);
        }
    }
}
