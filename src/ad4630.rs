// iio-stream/src/ad4630.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! AD4630-24, 2-channel 24-bit simultaneous sampling SAR ADC.
//!
//! The part packs both channels into one 64-bit word per sample: channel 0
//! in the low 32 bits, channel 1 in the high 32 bits. What each half holds
//! depends on the output data mode in the modes register (`0x20`):
//!
//! | mode | contents of each 32-bit half                 | shift |
//! |------|----------------------------------------------|-------|
//! | 0    | 24-bit data                                  | 8     |
//! | 1    | 16-bit data, 8-bit common mode               | 16    |
//! | 2    | 24-bit data, 8-bit common mode               | 8     |
//! | 3    | 30-bit averaged data, OR bit, SYNC bit       | 2     |
//! | 4    | 32-bit test pattern                          | 0     |
//!
//! Mode 3 needs additional averaging configuration that is not done here.
//!

use std::{
    fmt,
    io::{self, Write},
};

use industrial_io as iio;
use tracing::info;

use crate::{adc, device, Converter, Error, Result};

/// The AD4630 streaming device.
pub const DEVICE_NAME: &str = "ad4630";

/// The default channel to capture.
pub const DFLT_CHANNEL: u32 = 0;

/// The modes register.
pub const MODES_REG: u32 = 0x20;

/// The value the Linux driver leaves in the modes register.
pub const MODES_REG_LINUX_DFLT: u32 = 0x82;

/// The channel attribute holding the common-mode voltage.
const VCOM_ATTR: &str = "common_mode_voltage";

/// The output data mode (`OUT_DATA_MD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 24-bit data
    Data24 = 0,
    /// 16-bit data, 8-bit common mode
    Data16Cm8 = 1,
    /// 24-bit data, 8-bit common mode
    Data24Cm8 = 2,
    /// 30-bit averaged data, 1 OR bit, 1 SYNC bit
    Avg30OrSync = 3,
    /// 32-bit test pattern
    TestPattern32 = 4,
}

impl OutputMode {
    /// The right shift that aligns the data in a 32-bit half word.
    pub fn shift(self) -> u32 {
        use OutputMode::*;
        match self {
            Data24 | Data24Cm8 => 8,
            Data16Cm8 => 16,
            Avg30OrSync => 2,
            TestPattern32 => 0,
        }
    }

    /// Whether the part reports the common-mode voltage in this mode.
    pub fn has_common_mode(self) -> bool {
        matches!(self, OutputMode::Data16Cm8 | OutputMode::Data24Cm8)
    }

    /// Whether the samples carry the overrange and sync bits.
    pub fn has_or_sync(self) -> bool {
        self == OutputMode::Avg30OrSync
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Data16Cm8
    }
}

impl TryFrom<u32> for OutputMode {
    type Error = Error;

    fn try_from(val: u32) -> Result<Self> {
        use OutputMode::*;
        match val {
            0 => Ok(Data24),
            1 => Ok(Data16Cm8),
            2 => Ok(Data24Cm8),
            3 => Ok(Avg30OrSync),
            4 => Ok(TestPattern32),
            _ => Err(Error::invalid_mode("AD4630 output mode", val)),
        }
    }
}

/// The SDO data rate (`DDR_MD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    /// Single data rate
    Sdr = 0,
    /// Double data rate
    Ddr = 1,
}

/// The interface clocking mode (`CLK_MD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// SPI clocking mode
    Spi = 0,
    /// Echo clock mode
    Echo = 1,
    /// Host (master) clock mode
    Host = 2,
}

impl std::str::FromStr for ClockMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "spi" => Ok(ClockMode::Spi),
            "echo" => Ok(ClockMode::Echo),
            "host" | "master" => Ok(ClockMode::Host),
            _ => Err(Error::invalid_mode("AD4630 clock mode", s)),
        }
    }
}

/// The number of SDO lanes per channel (`LANE_MD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneMode {
    /// One lane per channel
    One = 0,
    /// Two lanes per channel
    Two = 1,
    /// Four lanes per channel
    Four = 2,
}

impl TryFrom<u32> for LaneMode {
    type Error = Error;

    fn try_from(val: u32) -> Result<Self> {
        match val {
            1 => Ok(LaneMode::One),
            2 => Ok(LaneMode::Two),
            4 => Ok(LaneMode::Four),
            _ => Err(Error::invalid_mode("AD4630 lanes per channel", val)),
        }
    }
}

/// The settings in the modes register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModesRegister {
    /// Lanes per channel
    pub lanes: LaneMode,
    /// Interface clocking
    pub clock: ClockMode,
    /// SDO data rate
    pub rate: DataRate,
    /// Output data format
    pub output: OutputMode,
}

impl ModesRegister {
    /// The register value for these settings.
    pub fn value(&self) -> u32 {
        (self.lanes as u32) << 6
            | (self.clock as u32) << 4
            | (self.rate as u32) << 3
            | self.output as u32
    }
}

impl Default for ModesRegister {
    fn default() -> Self {
        Self {
            lanes: LaneMode::Four,
            clock: ClockMode::Spi,
            rate: DataRate::Sdr,
            output: OutputMode::default(),
        }
    }
}

/// One channel's value taken from a sample word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// The data, shifted into place
    pub value: i32,
    /// The OR and SYNC bits, in averaging mode
    pub or_sync: Option<u8>,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.value)?;
        if let Some(bits) = self.or_sync {
            write!(f, "\tOR_SYNC: 0x{:x}", bits)?;
        }
        Ok(())
    }
}

/// The AD4630-24 and its interface settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ad4630 {
    channel: u32,
    modes: ModesRegister,
}

impl Ad4630 {
    /// Creates a converter for capturing the given channel.
    pub fn new(channel: u32, modes: ModesRegister) -> Result<Self> {
        let channel = adc::check_channel::<Self>(channel)?;
        Ok(Self { channel, modes })
    }

    /// Takes this converter's channel from a 64-bit sample word.
    pub fn decode(&self, word: i64) -> Sample {
        let half = if self.channel == 0 {
            word as i32
        }
        else {
            (word >> 32) as i32
        };

        let mode = self.modes.output;
        Sample {
            value: half >> mode.shift(),
            or_sync: mode.has_or_sync().then(|| (half & 0x3) as u8),
        }
    }
}

// Logs the common mode voltage read after a refill. A failed read ends the
// capture.
fn report_common_mode<E>(reading: std::result::Result<i64, E>) -> Result<()>
where
    Error: From<E>,
{
    let val = reading.map_err(Error::from)?;
    info!("\t {}: {}", VCOM_ATTR, val);
    Ok(())
}

impl Converter for Ad4630 {
    type Word = i64;

    const PART: &'static str = "AD4630-24";
    const DEVICE: &'static str = DEVICE_NAME;
    const NUM_CHANNELS: u32 = 2;

    fn channel(&self) -> u32 {
        self.channel
    }

    fn configure(&self, dev: &iio::Device) -> Result<()> {
        let val = device::write_register(dev, MODES_REG, self.modes.value())?;
        info!("* Modes Register 0x{:x} = 0x{:x}", MODES_REG, val);
        Ok(())
    }

    fn inspect(&self, chan: &iio::Channel) -> Result<()> {
        if self.modes.output.has_common_mode() {
            report_common_mode(chan.attr_read_int(VCOM_ATTR))?;
        }
        Ok(())
    }

    fn render(&self, id: &str, words: &[i64], out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} ", id)?;
        for (n, &word) in words.iter().enumerate() {
            writeln!(
                out,
                "Buffer Sample: {}\tCH{}: {}",
                n,
                self.channel,
                self.decode(word)
            )?;
        }
        writeln!(out)
    }

    fn restore(&self, dev: &iio::Device) -> Result<()> {
        let val = device::write_register(dev, MODES_REG, MODES_REG_LINUX_DFLT)?;
        info!("* Modes Register 0x{:x} = 0x{:x}", MODES_REG, val);
        Ok(())
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn adc(channel: u32, output: OutputMode) -> Ad4630 {
        let modes = ModesRegister {
            output,
            ..ModesRegister::default()
        };
        Ad4630::new(channel, modes).unwrap()
    }

    #[test]
    fn modes_register_value() {
        // Four lanes, SPI clock, SDR, 16-bit data + common mode
        assert_eq!(ModesRegister::default().value(), 0x81);

        let modes = ModesRegister {
            lanes: LaneMode::One,
            clock: ClockMode::Host,
            rate: DataRate::Ddr,
            output: OutputMode::TestPattern32,
        };
        assert_eq!(modes.value(), 0x2C);
    }

    #[test]
    fn parse_settings() {
        assert_eq!(OutputMode::try_from(3).unwrap(), OutputMode::Avg30OrSync);
        assert!(OutputMode::try_from(5).is_err());

        assert_eq!(LaneMode::try_from(4).unwrap(), LaneMode::Four);
        assert!(LaneMode::try_from(3).is_err());

        assert_eq!("echo".parse::<ClockMode>().unwrap(), ClockMode::Echo);
        assert!("fast".parse::<ClockMode>().is_err());
    }

    #[test]
    fn channel_halves() {
        let word = (0x00AB_CD00_i64 << 32) | 0x0012_3400;
        assert_eq!(adc(0, OutputMode::Data24).decode(word).value, 0x1234);
        assert_eq!(adc(1, OutputMode::Data24).decode(word).value, 0xABCD);
    }

    #[test]
    fn shifts_by_mode() {
        let word = 0x1234_5678;
        assert_eq!(adc(0, OutputMode::Data24).decode(word).value, 0x12_3456);
        assert_eq!(adc(0, OutputMode::Data16Cm8).decode(word).value, 0x1234);
        assert_eq!(adc(0, OutputMode::Data24Cm8).decode(word).value, 0x12_3456);
        assert_eq!(adc(0, OutputMode::TestPattern32).decode(word).value, 0x1234_5678);
    }

    #[test]
    fn sign_is_kept() {
        // 0xFFFFFF00 in the low half: -256 as a 32-bit value
        let word = 0xFFFF_FF00_i64;
        let s = adc(0, OutputMode::Data24).decode(word);
        assert_eq!(s.value, -1);
        assert_eq!(s.to_string(), "0xffffffff");
    }

    #[test]
    fn or_sync_bits() {
        let s = adc(0, OutputMode::Avg30OrSync).decode(0x107);
        assert_eq!(s.value, 0x41);
        assert_eq!(s.or_sync, Some(3));
        assert_eq!(s.to_string(), "0x41\tOR_SYNC: 0x3");

        assert_eq!(adc(0, OutputMode::Data24).decode(0x107).or_sync, None);
    }

    #[test]
    fn common_mode_read_failure_is_fatal() {
        assert!(report_common_mode::<Error>(Ok(2048)).is_ok());

        let res = report_common_mode(Err(Error::General("read failed".into())));
        assert!(matches!(res, Err(Error::General(msg)) if msg == "read failed"));
    }

    #[test]
    fn renders_block() {
        let conv = adc(1, OutputMode::Data16Cm8);
        let mut out = Vec::new();
        conv.render("voltage1", &[0x0001_0000_0000_0000], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "voltage1 \nBuffer Sample: 0\tCH1: 0x1\n\n"
        );
    }
}
