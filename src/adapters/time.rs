//! Blocking delay and uptime for the poll loop.
//!
//! - **`target_os = "espidf"`**: the delay yields to FreeRTOS for
//!   millisecond waits and busy-waits via `esp_rom_delay_us` below that;
//!   uptime wraps `esp_timer_get_time()`.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep` and
//!   `std::time::Instant` for host-side simulation.

use embedded_hal::delay::DelayNs;

/// Platform delay implementing [`DelayNs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDelay;

impl SystemDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        // SAFETY: ROM busy-wait, no shared state.
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(us) };
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

// `hd44780-driver` takes `embedded-hal` 0.2 delays.
impl embedded_hal_0_2::blocking::delay::DelayUs<u16> for SystemDelay {
    fn delay_us(&mut self, us: u16) {
        DelayNs::delay_us(self, u32::from(us));
    }
}

impl embedded_hal_0_2::blocking::delay::DelayMs<u8> for SystemDelay {
    fn delay_ms(&mut self, ms: u8) {
        DelayNs::delay_ms(self, u32::from(ms));
    }
}

/// Monotonic uptime source.
pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn millis(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since this source was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
