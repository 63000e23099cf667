//! GPIO pin assignments for the RoomSense doorway board (ESP32-S3).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Break-beam receivers
// ---------------------------------------------------------------------------

/// Outer beam (A): broken first by someone walking in.
pub const BEAM_A_GPIO: i32 = 4;
/// Inner beam (B): broken first by someone walking out.
pub const BEAM_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Binary outputs
// ---------------------------------------------------------------------------

/// Occupancy indicator LED (active HIGH).
pub const INDICATOR_LED_GPIO: i32 = 6;
/// Door/turnstile actuator driver input (active HIGH).
pub const ACTUATOR_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// HD44780 character LCD, 4-bit bus, R/W tied to GND
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 10;
pub const LCD_EN_GPIO: i32 = 11;
pub const LCD_D4_GPIO: i32 = 12;
pub const LCD_D5_GPIO: i32 = 13;
pub const LCD_D6_GPIO: i32 = 14;
pub const LCD_D7_GPIO: i32 = 15;

pub const INPUT_PINS: [i32; 2] = [BEAM_A_GPIO, BEAM_B_GPIO];

pub const OUTPUT_PINS: [i32; 8] = [
    INDICATOR_LED_GPIO,
    ACTUATOR_GPIO,
    LCD_RS_GPIO,
    LCD_EN_GPIO,
    LCD_D4_GPIO,
    LCD_D5_GPIO,
    LCD_D6_GPIO,
    LCD_D7_GPIO,
];
