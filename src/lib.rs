//! WS2812B addressable-LED output for the Pico 1, clocked by hardware instead of
//! the CPU.
//!
//! See [`ws2812`] for the driver, and [`ws2812::rp`] for the RP2040 peripherals
//! it runs on.
//!
//! # Glossary
//!
//! Resources the driver takes on the Pico 1:
//!
//! - **PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation)) Slice:** One of 8. Used only as a
//!   counter whose wrap paces the transfers, so its output pins stay free.
//! - **DMA ([Direct Memory Access](https://en.wikipedia.org/wiki/Direct_memory_access)):** Two of the 12 channels. One
//!   toggles the pin, the other feeds pulse lengths to the PWM slice.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: the board must be selected (unless testing with host feature)
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the board feature 'pico1' (or 'host' for tests)");

// Compile-time check: the RP2040 backend needs the ARM runtime
#[cfg(all(feature = "pico1", not(feature = "arm"), not(feature = "host")))]
compile_error!("Pico 1 (RP2040) requires the 'arm' architecture feature");

#[macro_use]
mod log;

mod error;
pub mod ws2812;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
