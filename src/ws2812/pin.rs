//! Pin descriptors and the on/off helper shared by plain LEDs and the WS2812
//! line conditioning.

use super::hal::{Drive, GpioLine};

/// One GPIO line, named by its port and a single-bit mask.
///
/// Owned by the caller; the driver only borrows it for one call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDescriptor {
    port: u8,
    mask: u32,
}

impl PinDescriptor {
    /// Line selected by `mask` on `port`.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one bit of `mask` is set.
    #[must_use]
    pub const fn new(port: u8, mask: u32) -> Self {
        assert!(
            mask.count_ones() == 1,
            "pin mask must select exactly one line"
        );
        Self { port, mask }
    }

    /// GPIO `line` of bank 0.
    ///
    /// # Panics
    ///
    /// Panics when `line` is 32 or more.
    #[must_use]
    pub const fn bank0(line: u8) -> Self {
        assert!(line < 32, "bank 0 has 32 lines");
        Self::new(0, 1 << line)
    }

    /// Port (register group) of the line.
    #[must_use]
    pub const fn port(&self) -> u8 {
        self.port
    }

    /// Single-bit mask of the line within its port.
    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Bit position of the line within its port.
    #[must_use]
    pub const fn line(&self) -> u8 {
        self.mask.trailing_zeros() as u8
    }
}

/// Turns a pin on or off.
///
/// On is a push-pull output driven high, so the line sources current. Off is an
/// open-drain output with no pull, written low, so it never fights an external
/// pull-up or driver. Calling it again with the same level changes nothing.
pub fn set_pin<G: GpioLine + ?Sized>(gpio: &mut G, pin: &PinDescriptor, active: bool) {
    info!(
        "pin {}.{}: {}",
        pin.port(),
        pin.line(),
        if active { "on" } else { "off" }
    );
    if active {
        gpio.configure_output(pin, Drive::PushPull);
        gpio.write(pin, true);
    } else {
        gpio.configure_output(pin, Drive::OpenDrain);
        gpio.write(pin, false);
    }
}
