//! RoomSense firmware entry point
//!
//! Hexagonal architecture around a single blocking poll loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter    CharLcd     LogEventSink   SystemDelay   │
//! │  (Sensor+Output)    (Display)   (EventSink)    (DelayNs)     │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)                 │      │
//! │  │  FSM table · occupancy counter · poll cycle        │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use roomsense::adapters::hardware::HardwareAdapter;
use roomsense::adapters::log_sink::LogEventSink;
use roomsense::adapters::time::{SystemDelay, Uptime};
use roomsense::app::service::AppService;
use roomsense::config::SystemConfig;
use roomsense::drivers::gpio::{GpioInput, GpioOutput};
use roomsense::drivers::hw_init;
use roomsense::drivers::lcd::CharLcd;
use roomsense::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    let uptime = Uptime::new();

    info!("RoomSense v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configure pins ─────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without GPIO there is nothing to count; let the task watchdog
        // reset the chip.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Compiled-in configuration ──────────────────────────
    let config = SystemConfig::default();
    let mut app = AppService::new(config.clone())?;

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        GpioInput::new(pins::BEAM_A_GPIO),
        GpioInput::new(pins::BEAM_B_GPIO),
        config.beam_active_low,
        GpioOutput::new(pins::INDICATOR_LED_GPIO),
        GpioOutput::new(pins::ACTUATOR_GPIO),
    );

    let mut lcd = CharLcd::new_4bit(
        GpioOutput::new(pins::LCD_RS_GPIO),
        GpioOutput::new(pins::LCD_EN_GPIO),
        GpioOutput::new(pins::LCD_D4_GPIO),
        GpioOutput::new(pins::LCD_D5_GPIO),
        GpioOutput::new(pins::LCD_D6_GPIO),
        GpioOutput::new(pins::LCD_D7_GPIO),
        SystemDelay::new(),
    )?;

    let mut sink = LogEventSink::new();
    let mut delay = SystemDelay::new();

    // ── 5. Poll forever ───────────────────────────────────────
    app.start(&mut lcd, &mut sink);
    info!("System ready after {} ms. Entering poll loop.", uptime.millis());

    app.run(&mut hw, &mut lcd, &mut delay, &mut sink)
}
