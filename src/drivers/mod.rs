//! Pin access, hardware initialisation, and the character display drivers.

pub mod gpio;
pub mod hw_init;
pub mod lcd;
pub mod screen;
