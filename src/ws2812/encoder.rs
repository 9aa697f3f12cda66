//! Bit encoder: colors to a sentinel-terminated stream of timer reload counts.

use super::Rgb24;
use super::timing::{
    BITS_PER_LED, ENTRIES_PER_LED, MAX_LED_COUNT, ReloadCounts, SENTINEL, TIMING_BUFFER_LEN,
};
use crate::{Error, Result};

/// Reload counts for one frame, two entries (HIGH then LOW) per color bit.
///
/// The buffer starts out filled with [`SENTINEL`], so the first slot past the
/// encoded prefix always terminates the stream and an unused tail reads as
/// "stream ended". Two trailing slots are reserved for the terminator even when
/// the frame is full.
#[derive(Clone, Debug)]
pub struct TimingBuffer {
    entries: [u16; TIMING_BUFFER_LEN],
    len: usize,
}

impl TimingBuffer {
    /// Empty buffer, every slot holding the sentinel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: [SENTINEL; TIMING_BUFFER_LEN],
            len: 0,
        }
    }

    /// Encodes `led_count` copies of `color`.
    ///
    /// # Panics
    ///
    /// Panics when `led_count` is zero or above [`MAX_LED_COUNT`].
    /// [`Ws2812Config::reload_counts`](super::Ws2812Config::reload_counts) rejects such
    /// counts earlier.
    pub fn encode_color(&mut self, color: Rgb24, led_count: usize, counts: &ReloadCounts) {
        assert!(
            (1..=MAX_LED_COUNT).contains(&led_count),
            "LED count must be within 1..=MAX_LED_COUNT"
        );
        self.reset();
        for _ in 0..led_count {
            self.push_color(color, counts);
        }
    }

    /// Encodes one color per LED.
    ///
    /// On error the buffer is left empty.
    pub fn encode_frame<I>(&mut self, colors: I, counts: &ReloadCounts) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Rgb24>,
    {
        self.reset();
        let mut colors = colors.into_iter();
        let mut led_count = 0;
        while let Some(color) = colors.next() {
            if led_count == MAX_LED_COUNT {
                self.reset();
                return Err(Error::TooManyLeds {
                    requested: MAX_LED_COUNT + 1 + colors.count(),
                    max: MAX_LED_COUNT,
                });
            }
            self.push_color(color.into(), counts);
            led_count += 1;
        }
        if led_count == 0 {
            return Err(Error::EmptyFrame);
        }
        Ok(())
    }

    fn push_color(&mut self, color: Rgb24, counts: &ReloadCounts) {
        let grb = color.to_grb();
        let slots = &mut self.entries[self.len..self.len + ENTRIES_PER_LED];
        for (bit_index, pair) in (0..BITS_PER_LED).rev().zip(slots.chunks_exact_mut(2)) {
            let (high, low) = counts.for_bit((grb >> bit_index) & 1 == 1);
            pair[0] = high;
            pair[1] = low;
        }
        self.len += ENTRIES_PER_LED;
    }

    fn reset(&mut self) {
        self.entries.fill(SENTINEL);
        self.len = 0;
    }

    /// Zeroes every slot so no stale frame survives a transmission.
    ///
    /// A cleared buffer must be re-encoded before it is sent again.
    pub fn clear(&mut self) {
        self.entries.fill(0);
        self.len = 0;
    }

    /// Number of encoded (non-sentinel) entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been encoded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries a transfer must move: the encoded prefix plus its terminator.
    #[must_use]
    pub const fn transfer_len(&self) -> usize {
        self.len + 1
    }

    /// The encoded prefix, without the terminator.
    #[must_use]
    pub fn entries(&self) -> &[u16] {
        &self.entries[..self.len]
    }

    /// Every slot, including the sentinel tail.
    #[must_use]
    pub const fn slots(&self) -> &[u16; TIMING_BUFFER_LEN] {
        &self.entries
    }

    /// `(high, low)` reload pairs, one per encoded bit in transmission order.
    pub fn bit_pairs(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.entries()
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }
}

impl Default for TimingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
