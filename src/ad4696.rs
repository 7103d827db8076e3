// iio-stream/src/ad4696.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! AD4696, 16-channel 16-bit multiplexed SAR ADC.
//!

use std::{
    fmt,
    io::{self, Write},
};

use industrial_io as iio;
use tracing::info;

use crate::{adc, device, Converter, Error, Result};

/// The AD4696 streaming device behind the AXI interface.
pub const DEVICE_NAME: &str = "axi-ad469x-adc";

/// The default channel to capture.
pub const DFLT_CHANNEL: u32 = 0;

/// The sequencer configuration register.
pub const SEQ_CTRL_REG: u32 = 0x400;

/// How the channel sequencer steps through the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerMode {
    /// Conversions spread across the inputs in turn
    Staggered = 0,
    /// Back-to-back conversions
    Continuous = 1,
}

impl SequencerMode {
    /// The value for the sequencer configuration register.
    pub fn value(self) -> u32 {
        self as u32
    }
}

impl Default for SequencerMode {
    fn default() -> Self {
        SequencerMode::Continuous
    }
}

impl TryFrom<u32> for SequencerMode {
    type Error = Error;

    fn try_from(val: u32) -> Result<Self> {
        match val {
            0 => Ok(SequencerMode::Staggered),
            1 => Ok(SequencerMode::Continuous),
            _ => Err(Error::invalid_mode("AD4696 sequencer mode", val)),
        }
    }
}

impl fmt::Display for SequencerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerMode::Staggered => write!(f, "Staggered Mode"),
            SequencerMode::Continuous => write!(f, "Continuous Mode"),
        }
    }
}

/// The AD4696 and its sequencer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ad4696 {
    channel: u32,
    mode: SequencerMode,
}

impl Ad4696 {
    /// Creates a converter for capturing the given channel.
    pub fn new(channel: u32, mode: SequencerMode) -> Result<Self> {
        let channel = adc::check_channel::<Self>(channel)?;
        Ok(Self { channel, mode })
    }
}

impl Converter for Ad4696 {
    type Word = i16;

    const PART: &'static str = "AD4696";
    const DEVICE: &'static str = DEVICE_NAME;
    const NUM_CHANNELS: u32 = 16;

    fn channel(&self) -> u32 {
        self.channel
    }

    fn configure(&self, dev: &iio::Device) -> Result<()> {
        let val = device::write_register(dev, SEQ_CTRL_REG, self.mode.value())?;
        info!("In {}", self.mode);
        info!("Register 0x{:x} = 0x{:x}", SEQ_CTRL_REG, val);
        Ok(())
    }

    fn render(&self, id: &str, words: &[i16], out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} ", id)?;
        for (n, &val) in words.iter().enumerate() {
            // Hex of the sign-extended word
            writeln!(
                out,
                "Buffer Sample: {}\tCH{} Data: 0x{:x}",
                n,
                self.channel,
                i32::from(val)
            )?;
        }
        writeln!(out)
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_values() {
        assert_eq!(SequencerMode::Staggered.value(), 0);
        assert_eq!(SequencerMode::Continuous.value(), 1);
        assert_eq!(SequencerMode::default(), SequencerMode::Continuous);

        assert_eq!(SequencerMode::try_from(0).unwrap(), SequencerMode::Staggered);
        assert!(SequencerMode::try_from(2).is_err());
    }

    #[test]
    fn renders_hex() {
        let adc = Ad4696::new(3, SequencerMode::Continuous).unwrap();
        let mut out = Vec::new();
        adc.render("voltage3", &[0x1234, -1], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "voltage3 \n\
             Buffer Sample: 0\tCH3 Data: 0x1234\n\
             Buffer Sample: 1\tCH3 Data: 0xffffffff\n\n"
        );
    }

    #[test]
    fn sixteen_channels() {
        assert!(Ad4696::new(15, SequencerMode::Staggered).is_ok());
        assert!(Ad4696::new(16, SequencerMode::Staggered).is_err());
    }
}
