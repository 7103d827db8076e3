// iio-stream/src/dds.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Direct Digital Synthesis (DDS) tone generation on a transmit device.
//!
//! The AXI DAC cores carry two DDS generators per converter. For a complex
//! (I/Q) transmit path, a tone uses one generator on each of the I and Q
//! converters, exposed as `altvoltage` output channels with `frequency`,
//! `scale` and `phase` attributes.
//!

use industrial_io as iio;
use tracing::info;

use crate::{device, Error, Result};

/// A phase offset of 90 degrees, in millidegrees, for the I channel of a
/// complex tone.
pub const QUADRATURE_PHASE: i64 = 90_000;

/// A transmit channel pair (the I and Q converters of one TX path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPair {
    /// The first transmit path
    Tx1,
    /// The second transmit path
    Tx2,
}

impl TryFrom<u32> for TxPair {
    type Error = Error;

    fn try_from(val: u32) -> Result<Self> {
        match val {
            0 => Ok(TxPair::Tx1),
            1 => Ok(TxPair::Tx2),
            _ => Err(Error::invalid_mode("TX channel", val)),
        }
    }
}

/// Which of the two DDS generators per converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// The first generator (F1)
    F1,
    /// The second generator (F2)
    F2,
}

/// Gets the IDs of the I and Q DDS channels for a TX pair and generator.
pub fn channel_ids(pair: TxPair, gen: Generator) -> (&'static str, &'static str) {
    use Generator::*;
    use TxPair::*;
    match (pair, gen) {
        (Tx1, F1) => ("altvoltage0", "altvoltage2"),
        (Tx1, F2) => ("altvoltage1", "altvoltage3"),
        (Tx2, F1) => ("altvoltage4", "altvoltage6"),
        (Tx2, F2) => ("altvoltage5", "altvoltage7"),
    }
}

/// The settings for one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz. Must be less than half the sample rate.
    pub frequency: i64,
    /// Amplitude in the range [0, 1], where 1 is full scale.
    pub scale: f64,
    /// Phase of the I channel in millidegrees, if it should be set.
    pub phase: Option<i64>,
}

impl Tone {
    /// Creates a tone with the given frequency and scale, leaving the phase
    /// as it is.
    pub fn new(frequency: i64, scale: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&scale) {
            return Err(Error::invalid_mode("DDS scale", scale));
        }
        if frequency < 0 {
            return Err(Error::invalid_mode("DDS frequency", frequency));
        }
        Ok(Self {
            frequency,
            scale,
            phase: None,
        })
    }

    /// Sets the phase of the I channel, in millidegrees.
    pub fn with_phase(mut self, phase: i64) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Generates a single tone on a TX pair.
pub fn single_tone(tx: &iio::Device, pair: TxPair, tone: &Tone) -> Result<()> {
    set_tone(tx, pair, Generator::F1, tone)
}

/// Generates two tones at once on a TX pair, using both generators of each
/// converter.
pub fn dual_tone(tx: &iio::Device, pair: TxPair, tone1: &Tone, tone2: &Tone) -> Result<()> {
    set_tone(tx, pair, Generator::F1, tone1)?;
    set_tone(tx, pair, Generator::F2, tone2)
}

// Programs one generator on both the I and Q converters, and enables them.
fn set_tone(tx: &iio::Device, pair: TxPair, gen: Generator, tone: &Tone) -> Result<()> {
    let (i_id, q_id) = channel_ids(pair, gen);
    let chan_i = device::find_channel(tx, i_id, true)?;
    chan_i.attr_write_int("frequency", tone.frequency)?;
    chan_i.attr_write_float("scale", tone.scale)?;
    if let Some(phase) = tone.phase {
        chan_i.attr_write_int("phase", phase)?;
    }
    log_settings(&chan_i, i_id)?;

    let chan_q = device::find_channel(tx, q_id, true)?;
    chan_q.attr_write_int("frequency", tone.frequency)?;
    chan_q.attr_write_float("scale", tone.scale)?;
    log_settings(&chan_q, q_id)?;

    chan_i.enable();
    chan_q.enable();
    Ok(())
}

// Reads back what the driver accepted, which is rounded to its resolution.
fn log_settings(chan: &iio::Channel, id: &str) -> Result<()> {
    let freq = chan.attr_read_int("frequency")?;
    info!("adrv9002 {} frequency: {}", id, freq);
    let scale = chan.attr_read_float("scale")?;
    info!("adrv9002 {} scale: {:.6}", id, scale);
    Ok(())
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_map() {
        assert_eq!(channel_ids(TxPair::Tx1, Generator::F1), ("altvoltage0", "altvoltage2"));
        assert_eq!(channel_ids(TxPair::Tx1, Generator::F2), ("altvoltage1", "altvoltage3"));
        assert_eq!(channel_ids(TxPair::Tx2, Generator::F1), ("altvoltage4", "altvoltage6"));
        assert_eq!(channel_ids(TxPair::Tx2, Generator::F2), ("altvoltage5", "altvoltage7"));
    }

    #[test]
    fn tx_pair_from_index() {
        assert_eq!(TxPair::try_from(0).unwrap(), TxPair::Tx1);
        assert_eq!(TxPair::try_from(1).unwrap(), TxPair::Tx2);
        assert!(TxPair::try_from(2).is_err());
    }

    #[test]
    fn tone_limits() {
        let tone = Tone::new(10_000, 0.5).unwrap().with_phase(QUADRATURE_PHASE);
        assert_eq!(tone.phase, Some(90_000));
        assert_eq!(Tone::new(5000, 0.4).unwrap().phase, None);

        assert!(Tone::new(5000, 1.5).is_err());
        assert!(Tone::new(5000, -0.1).is_err());
        assert!(Tone::new(-1, 0.4).is_err());
    }
}
