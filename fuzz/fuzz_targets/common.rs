// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

/// Sequential byte reader that yields zeros once the input is exhausted, so
/// every input prefix maps to a complete decode.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn next_u8(&mut self) -> u8 {
        let byte = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos = self.pos.saturating_add(1);
        byte
    }

    pub fn next_i16(&mut self) -> i16 {
        i16::from_le_bytes([self.next_u8(), self.next_u8()])
    }
}

/// Maps a seed byte into `[lo, hi]` inclusive.
pub fn bounded(seed: u8, lo: usize, hi: usize) -> usize {
    debug_assert!(lo <= hi);
    lo + usize::from(seed) % (hi - lo + 1)
}

/// Maps a seed pair onto a kinematic scalar, occasionally injecting the
/// non-finite values the library must tolerate without panicking.
pub fn scalar(mode_seed: u8, raw_seed: i16, lo: f64, hi: f64) -> f64 {
    let unit = (f64::from(raw_seed) + f64::from(i16::MAX)) / (2.0 * f64::from(i16::MAX));
    match mode_seed % 16 {
        0 => f64::NAN,
        1 => f64::INFINITY,
        2 => f64::NEG_INFINITY,
        3 => 0.0,
        _ => lo + unit.clamp(0.0, 1.0) * (hi - lo),
    }
}
