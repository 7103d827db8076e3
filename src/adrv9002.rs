// iio-stream/src/adrv9002.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! ADRV9002 narrow/wideband RF transceiver.
//!
//! The transceiver shows up as three IIO devices: the PHY, which holds the
//! RF configuration (LOs, gains, bandwidth), and the AXI receive and
//! transmit cores, which carry the sample streams.
//!
//! Two flows are provided:
//!
//! - [`stream()`] sets up a digital loopback from TX to RX, selects the
//!   source of the TX data (DDS tone, DMA buffer, test patterns, ...) and
//!   prints what comes back on the receive side.
//! - [`stream_dds()`] only generates a DDS tone and prints the receive side.
//!

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use industrial_io as iio;
use tracing::{info, warn};

use crate::{
    dds::{self, Tone, TxPair},
    device, iq, ContextSource, Error, Result, Session, StopFlag, Stream,
};

/// The PHY device.
pub const PHY_DEVICE: &str = "adrv9002-phy";
/// The receive streaming device.
pub const RX_DEVICE: &str = "axi-adrv9002-rx-lpc";
/// The transmit streaming device.
pub const TX_DEVICE: &str = "axi-adrv9002-tx-lpc";

/// The I and Q channels of the first receive path.
pub const RX_CHANNELS: [&str; 2] = ["voltage0_i", "voltage0_q"];
/// The I and Q channels of the first transmit path.
pub const TX_CHANNELS: [&str; 2] = ["voltage0", "voltage1"];

/// The TX DAC data source register on the transmit core.
pub const DAC_MODE_REG: u32 = 0x0418;

/// The buffer size for both directions, in samples (1 MiS).
pub const DFLT_BUFFER_LEN: usize = 1024 * 1024;

/// The default pause between buffer refills.
pub const DFLT_INTERVAL: Duration = Duration::from_secs(5);

/// The debug attributes that loop the TX data interface back to RX.
const LOOPBACK_ATTRS: [&str; 2] = [
    "tx0_ssi_test_mode_loopback_en",
    "tx1_ssi_test_mode_loopback_en",
];

/// Where the kernel exposes IIO debug attributes.
const DEBUGFS_IIO: &str = "/sys/kernel/debug/iio";

/// Converts a frequency in GHz to Hz, rounded.
pub fn ghz(x: f64) -> i64 {
    (x * 1_000_000_000.0 + 0.5) as i64
}

// --------------------------------------------------------------------------

/// The source of the data sent out by the TX DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxDacMode {
    /// Internal tone (DDS)
    Dds = 0x00,
    /// Input data from the DMA buffer
    Dma = 0x02,
    /// Zeros
    Standby = 0x03,
    /// PN7 sequence (O.150)
    Pn7 = 0x06,
    /// PN15 sequence (O.150)
    Pn15 = 0x07,
    /// Nibble ramp
    NibbleRamp = 0x0A,
    /// 16-bit ramp
    Ramp16 = 0x0B,
}

impl TxDacMode {
    /// The value for the DAC mode register.
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Whether the looped-back data has a meaningful Q component.
    pub fn is_quadrature(self) -> bool {
        matches!(self, TxDacMode::Dds | TxDacMode::Dma)
    }
}

impl Default for TxDacMode {
    fn default() -> Self {
        TxDacMode::Dds
    }
}

impl TryFrom<u32> for TxDacMode {
    type Error = Error;

    fn try_from(val: u32) -> Result<Self> {
        use TxDacMode::*;
        match val {
            0x00 => Ok(Dds),
            0x02 => Ok(Dma),
            0x03 => Ok(Standby),
            0x06 => Ok(Pn7),
            0x07 => Ok(Pn15),
            0x0A => Ok(NibbleRamp),
            0x0B => Ok(Ramp16),
            _ => Err(Error::invalid_mode("TX DAC mode", val)),
        }
    }
}

// --------------------------------------------------------------------------

/// The local oscillator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoConfig {
    /// The TX1 and RX1 LO frequency, in Hz
    pub frequency: i64,
    /// The TX1 hardware gain (attenuation), in dB, if it should be set
    pub tx_gain: Option<i64>,
}

/// Sets the TX1 and RX1 local oscillators, printing some useful info on the
/// way.
pub fn configure_lo(phy: &iio::Device, cfg: &LoConfig) -> Result<()> {
    let tx0 = device::find_channel(phy, "voltage0", true)?;
    device::find_channel(phy, "voltage1", true)?;

    let bw = tx0.attr_read_int("rf_bandwidth")?;
    info!("adrv9002 bandwidth: {}", bw);
    let fs = tx0.attr_read_int("sampling_frequency")?;
    info!("adrv9002 sampling_frequency: {}", fs);

    if let Some(gain) = cfg.tx_gain {
        if let Err(err) = tx0.attr_write_int("hardwaregain", gain) {
            warn!("Can't set TX hardware gain to {}dB: {}", gain, err);
        }
    }

    device::find_channel(phy, "altvoltage2", true)?
        .attr_write_int("TX1_LO_frequency", cfg.frequency)?;
    device::find_channel(phy, "altvoltage0", true)?
        .attr_write_int("RX1_LO_frequency", cfg.frequency)?;

    info!("adrv9002 TX1/RX1 LO: {} Hz", cfg.frequency);
    Ok(())
}

// --------------------------------------------------------------------------

/// Control of the TX to RX digital loopback.
///
/// The loopback switches are debug attributes of the PHY. These are only
/// reachable through debugfs on the machine with the hardware.
#[derive(Debug)]
pub struct Loopback {
    dir: Option<PathBuf>,
}

impl Loopback {
    /// Gets the loopback control for the PHY.
    ///
    /// For a remote context there's no control, and requests to change
    /// the loopback are logged and ignored.
    pub fn new(phy: &iio::Device, src: &ContextSource) -> Self {
        let dir = match phy.id() {
            Some(id) if src.is_local() => Some(Path::new(DEBUGFS_IIO).join(id)),
            _ => None,
        };
        Self { dir }
    }

    /// Gets a loopback control with the debug attributes in a given
    /// directory.
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Turns the loopback on or off for both TX paths.
    ///
    /// Failures are logged, not returned; streaming still works without the
    /// loopback, it just receives over the air.
    ///
    /// Returns whether the setting reached at least one of the TX paths.
    pub fn set(&self, on: bool) -> bool {
        let dir = match &self.dir {
            Some(dir) => dir,
            None => {
                warn!("Digital loopback is only available on a local context");
                return false;
            }
        };

        let val = if on { "1" } else { "0" };
        let mut written = 0;
        for attr in LOOPBACK_ATTRS {
            match fs::write(dir.join(attr), val) {
                Ok(()) => written += 1,
                Err(err) => warn!("Can't write '{}' to {}: {}", val, attr, err),
            }
        }

        if written > 0 {
            info!("* Digital loopback {}", if on { "enabled" } else { "disabled" });
        }
        written > 0
    }
}

// --------------------------------------------------------------------------

/// Options for the loopback streaming flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransceiverOptions {
    /// The TX data source
    pub dac_mode: TxDacMode,
    /// The tone generated in DDS mode
    pub tone: Tone,
    /// The LO frequency, in Hz
    pub lo_frequency: i64,
    /// The pause between refills
    pub interval: Duration,
    /// The buffer size, in samples
    pub buffer_len: usize,
}

impl Default for TransceiverOptions {
    fn default() -> Self {
        Self {
            dac_mode: TxDacMode::default(),
            tone: Tone {
                frequency: 10_000,
                scale: 0.5,
                phase: Some(dds::QUADRATURE_PHASE),
            },
            lo_frequency: ghz(2.5),
            interval: DFLT_INTERVAL,
            buffer_len: DFLT_BUFFER_LEN,
        }
    }
}

/// Streams with the TX data looped back to RX, printing the received
/// samples until a stop is requested or an error occurs.
pub fn stream(opts: &TransceiverOptions, src: &ContextSource, stop: &StopFlag) -> Result<()> {
    let session = Session::open(src)?;

    let phy = session.find_device(PHY_DEVICE)?;
    configure_lo(
        &phy,
        &LoConfig {
            frequency: opts.lo_frequency,
            tx_gain: Some(-24),
        },
    )?;

    let loopback = Loopback::new(&phy, src);
    loopback.set(true);

    let res = loopback_stream(opts, &session, stop);

    loopback.set(false);
    res
}

// Selects the TX source and streams. The loopback is already on.
fn loopback_stream(opts: &TransceiverOptions, session: &Session, stop: &StopFlag) -> Result<()> {
    let tx_dev = session.find_device(TX_DEVICE)?;
    let val = device::write_register(&tx_dev, DAC_MODE_REG, opts.dac_mode.value())?;
    info!("Register 0x{:x} = 0x{:x}", DAC_MODE_REG, val);

    if opts.dac_mode == TxDacMode::Dds {
        dds::single_tone(&tx_dev, TxPair::Tx1, &opts.tone)?;
    }

    let rx_dev = session.find_device(RX_DEVICE)?;
    let mut rx = Stream::prepare(rx_dev, &RX_CHANNELS, false)?;
    let mut tx = Stream::prepare(tx_dev, &TX_CHANNELS, true)?;

    if opts.dac_mode == TxDacMode::Dma {
        tx.create_buffer(opts.buffer_len)?;
    }
    rx.create_buffer(opts.buffer_len)?;

    let res = loopback_capture(opts, &mut rx, &mut tx, stop);

    // Both buffers go before either set of channels is disabled.
    rx.release_buffer();
    tx.release_buffer();
    res
}

// The receive loop, pushing the sine table out in DMA mode.
fn loopback_capture(
    opts: &TransceiverOptions,
    rx: &mut Stream,
    tx: &mut Stream,
    stop: &StopFlag,
) -> Result<()> {
    let dma = opts.dac_mode == TxDacMode::Dma;
    let table = iq::sine_table();

    if dma {
        // The first receive buffer holds data from before the TX buffer was
        // pushed, so it is discarded.
        fill_tx(tx, &table, opts.buffer_len)?;
        tx.push()?;
        rx.refill()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    info!("* Starting IO streaming (press CTRL+C to cancel)");
    while !stop.is_raised() {
        if dma {
            tx.push()?;
        }

        rx.refill()?;
        print_rx(rx, opts.dac_mode.is_quadrature(), &mut out)?;

        if dma {
            fill_tx(tx, &table, opts.buffer_len)?;
        }

        info!(
            "Refilling buffers in {} seconds. Press Ctrl+C to exit...",
            opts.interval.as_secs()
        );
        stop.wait(opts.interval);
    }
    Ok(())
}

// Writes the table, cycled to the buffer length, into the TX buffer.
fn fill_tx(tx: &Stream, table: &[iq::IqSample], n: usize) -> Result<()> {
    let (i, q) = iq::fill(table, n);
    tx.write_samples(0, &i)?;
    tx.write_samples(1, &q)?;
    Ok(())
}

// Prints the received samples, Q before I.
fn print_rx(rx: &Stream, quadrature: bool, out: &mut dyn Write) -> Result<()> {
    let i = rx.samples::<i16>(0)?;
    let q = rx.samples::<i16>(1)?;
    iq::render_swapped(&i, &q, quadrature, out)?;
    out.flush()?;
    Ok(())
}

// --------------------------------------------------------------------------

/// Options for the DDS streaming flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DdsOptions {
    /// The generated tone
    pub tone: Tone,
    /// The TX path generating the tone
    pub pair: TxPair,
    /// The LO frequency, in Hz
    pub lo_frequency: i64,
    /// The pause between refills
    pub interval: Duration,
    /// The receive buffer size, in samples
    pub buffer_len: usize,
}

impl Default for DdsOptions {
    fn default() -> Self {
        Self {
            tone: Tone {
                frequency: 5000,
                scale: 0.4,
                phase: None,
            },
            pair: TxPair::Tx1,
            lo_frequency: ghz(2.4),
            interval: DFLT_INTERVAL,
            buffer_len: DFLT_BUFFER_LEN,
        }
    }
}

/// Generates a DDS tone and prints the received samples until a stop is
/// requested or an error occurs.
pub fn stream_dds(opts: &DdsOptions, src: &ContextSource, stop: &StopFlag) -> Result<()> {
    let session = Session::open(src)?;

    let phy = session.find_device(PHY_DEVICE)?;
    configure_lo(
        &phy,
        &LoConfig {
            frequency: opts.lo_frequency,
            tx_gain: None,
        },
    )?;

    // Keep the TX core for as long as the tone plays.
    let tx_dev = session.find_device(TX_DEVICE)?;
    dds::single_tone(&tx_dev, opts.pair, &opts.tone)?;

    let rx_dev = session.find_device(RX_DEVICE)?;
    let mut rx = Stream::open(rx_dev, &RX_CHANNELS, false, opts.buffer_len)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    info!("* Starting IO streaming (press CTRL+C to cancel)");
    stop.wait(opts.interval);

    while !stop.is_raised() {
        rx.refill()?;
        info!("Buffer refilled");
        print_rx(&rx, true, &mut out)?;

        info!(
            "Refilling RX buffer in {} seconds. Press Ctrl+C to exit...",
            opts.interval.as_secs()
        );
        stop.wait(opts.interval);
    }
    Ok(())
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, process};

    #[test]
    fn frequency_helpers() {
        assert_eq!(ghz(2.5), 2_500_000_000);
        assert_eq!(ghz(2.4), 2_400_000_000);
    }

    #[test]
    fn dac_modes() {
        assert_eq!(TxDacMode::default().value(), 0);
        assert_eq!(TxDacMode::try_from(2).unwrap(), TxDacMode::Dma);
        assert_eq!(TxDacMode::try_from(11).unwrap(), TxDacMode::Ramp16);
        assert!(TxDacMode::try_from(1).is_err());
        assert!(TxDacMode::try_from(12).is_err());

        assert!(TxDacMode::Dds.is_quadrature());
        assert!(TxDacMode::Dma.is_quadrature());
        assert!(!TxDacMode::Pn15.is_quadrature());
    }

    #[test]
    fn default_options() {
        let opts = TransceiverOptions::default();
        assert_eq!(opts.tone.phase, Some(90_000));
        assert_eq!(opts.lo_frequency, 2_500_000_000);

        let opts = DdsOptions::default();
        assert_eq!(opts.tone.phase, None);
        assert_eq!(opts.pair, TxPair::Tx1);
        assert_eq!(opts.lo_frequency, 2_400_000_000);
    }

    #[test]
    fn loopback_writes_attrs() {
        let dir = env::temp_dir().join(format!("iio-stream-loopback-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();

        let lb = Loopback::with_dir(&dir);
        assert!(lb.set(true));
        for attr in LOOPBACK_ATTRS {
            assert_eq!(fs::read_to_string(dir.join(attr)).unwrap(), "1");
        }

        assert!(lb.set(false));
        for attr in LOOPBACK_ATTRS {
            assert_eq!(fs::read_to_string(dir.join(attr)).unwrap(), "0");
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loopback_reports_failed_writes() {
        let dir = env::temp_dir().join(format!("iio-stream-no-loopback-{}", process::id()));
        let _ = fs::remove_dir_all(&dir);

        assert!(!Loopback::with_dir(&dir).set(true));
        assert!(!Loopback { dir: None }.set(true));
    }
}
