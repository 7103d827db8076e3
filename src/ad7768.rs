// iio-stream/src/ad7768.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! AD7768, 8-channel 24-bit simultaneous sampling sigma-delta ADC.
//!

use std::io::{self, Write};

use crate::{adc, Converter, Result};

/// The AD7768 streaming device behind the AXI interface.
pub const DEVICE_NAME: &str = "axi-ad7768-adc";

/// The default channel to capture.
pub const DFLT_CHANNEL: u32 = 4;

/// The AD7768. It needs no register configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ad7768 {
    channel: u32,
}

impl Ad7768 {
    /// Creates a converter for capturing the given channel.
    pub fn new(channel: u32) -> Result<Self> {
        let channel = adc::check_channel::<Self>(channel)?;
        Ok(Self { channel })
    }

    /// Moves the 24-bit sample in the low bits of a word up to the top,
    /// discarding the status byte above it.
    pub fn decode(word: i32) -> i32 {
        word.wrapping_shl(8)
    }
}

impl Converter for Ad7768 {
    type Word = i32;

    const PART: &'static str = "AD7768";
    const DEVICE: &'static str = DEVICE_NAME;
    const NUM_CHANNELS: u32 = 8;

    fn channel(&self) -> u32 {
        self.channel
    }

    fn render(&self, id: &str, words: &[i32], out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{} ", id)?;
        for &word in words {
            write!(out, "{} ", Self::decode(word))?;
        }
        writeln!(out)
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_status_byte() {
        assert_eq!(Ad7768::decode(0x0000_0001), 0x100);
        assert_eq!(Ad7768::decode(0x5A7F_FFFF), 0x7FFF_FF00);
        // A negative full scale sample, with a status byte on top
        assert_eq!(Ad7768::decode(0x0F80_0000), i32::MIN);
    }

    #[test]
    fn renders_shifted() {
        let adc = Ad7768::new(DFLT_CHANNEL).unwrap();
        let mut out = Vec::new();
        adc.render("voltage4", &[1, 0x00FF_FFFF], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "voltage4 256 -256 \n");
    }
}
