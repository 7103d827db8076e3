// iio-stream/src/ad7606b.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! AD7606B, 8-channel 16-bit simultaneous sampling ADC.
//!

use std::io::{self, Write};

use crate::{adc, Converter, Result};

/// The AD7606B streaming device behind the AXI interface.
pub const DEVICE_NAME: &str = "axi-ad7606-adc";

/// The default channel to capture.
pub const DFLT_CHANNEL: u32 = 0;

/// The AD7606B. It needs no register configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ad7606b {
    channel: u32,
}

impl Ad7606b {
    /// Creates a converter for capturing the given channel.
    pub fn new(channel: u32) -> Result<Self> {
        let channel = adc::check_channel::<Self>(channel)?;
        Ok(Self { channel })
    }
}

impl Converter for Ad7606b {
    type Word = i16;

    const PART: &'static str = "AD7606B";
    const DEVICE: &'static str = DEVICE_NAME;
    const NUM_CHANNELS: u32 = 8;

    fn channel(&self) -> u32 {
        self.channel
    }

    fn render(&self, id: &str, words: &[i16], out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{} ", id)?;
        for val in words {
            write!(out, "{} ", val)?;
        }
        writeln!(out)
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_signed_decimal() {
        let adc = Ad7606b::new(0).unwrap();
        let mut out = Vec::new();
        adc.render("voltage0", &[0, 1, -1, i16::MIN], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "voltage0 0 1 -1 -32768 \n");
    }

    #[test]
    fn eight_channels() {
        assert!(Ad7606b::new(7).is_ok());
        assert!(Ad7606b::new(8).is_err());
    }
}
