// iio-stream/src/iq.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Complex (I/Q) sample data.
//!

use std::{
    f64::consts::PI,
    io::{self, Write},
};

/// The number of entries in the sine table.
pub const SINE_TABLE_LEN: usize = 1024;

/// Samples per period of the table's tone.
const SINE_PERIOD: usize = 128;

/// Peak amplitude of the table's tone; about 0.3 of 16-bit full scale.
const SINE_AMPLITUDE: f64 = 9830.0;

/// One complex sample.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IqSample {
    /// In-phase component
    pub i: i16,
    /// Quadrature component
    pub q: i16,
}

/// Creates the transmit test waveform: eight periods of a complex tone,
/// with `I` the sine and `Q` the cosine, truncated toward zero.
pub fn sine_table() -> Vec<IqSample> {
    (0..SINE_TABLE_LEN)
        .map(|k| {
            let ph = 2.0 * PI * k as f64 / SINE_PERIOD as f64;
            IqSample {
                i: (SINE_AMPLITUDE * ph.sin()) as i16,
                q: (SINE_AMPLITUDE * ph.cos()) as i16,
            }
        })
        .collect()
}

/// Fills `n` samples from the table, starting over at its end as needed.
///
/// Returns the I and Q components as separate vectors, ready to be written
/// to their channels.
pub fn fill(table: &[IqSample], n: usize) -> (Vec<i16>, Vec<i16>) {
    table.iter().cycle().take(n).map(|s| (s.i, s.q)).unzip()
}

/// Writes received samples with I and Q swapped.
///
/// With `quadrature` both components are shown, otherwise just I.
pub fn render_swapped(
    i: &[i16],
    q: &[i16],
    quadrature: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    for (&i, &q) in i.iter().zip(q) {
        if quadrature {
            writeln!(out, "Voltage (Q) = {}\t\t\tVoltage (I) = {}", q, i)?;
        }
        else {
            writeln!(out, "Voltage (I) = {}", i)?;
        }
    }
    Ok(())
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Splits a packed table word: I in the high half, Q in the low.
    fn unpack(word: u32) -> IqSample {
        IqSample {
            i: (word >> 16) as i16,
            q: word as i16,
        }
    }

    #[test]
    fn table_matches_reference_words() {
        let tbl = sine_table();
        assert_eq!(tbl.len(), SINE_TABLE_LEN);

        assert_eq!(tbl[0], unpack(0x0000_2666));
        assert_eq!(tbl[1], unpack(0x01E2_265A));
        assert_eq!(tbl[2], unpack(0x03C3_2636));
        assert_eq!(tbl[16], unpack(0x1B26_1B26));
        assert_eq!(tbl[32], unpack(0x2666_0000));
        assert_eq!(tbl[33], unpack(0x265A_FE1E));
        assert_eq!(tbl[64], unpack(0x0000_D99A));
        assert_eq!(tbl[1023], unpack(0xFE1E_265A));
    }

    #[test]
    fn table_repeats_each_period() {
        let tbl = sine_table();
        for k in SINE_PERIOD..SINE_TABLE_LEN {
            assert_eq!(tbl[k], tbl[k % SINE_PERIOD], "index {}", k);
        }
    }

    #[test]
    fn fill_wraps_around() {
        let tbl = sine_table();
        let (i, q) = fill(&tbl, SINE_TABLE_LEN + 3);
        assert_eq!(i.len(), SINE_TABLE_LEN + 3);
        assert_eq!(q.len(), SINE_TABLE_LEN + 3);
        assert_eq!(i[SINE_TABLE_LEN + 1], tbl[1].i);
        assert_eq!(q[SINE_TABLE_LEN + 2], tbl[2].q);
    }

    #[test]
    fn swapped_output() {
        let mut out = Vec::new();
        render_swapped(&[1, 2], &[-1, -2], true, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Voltage (Q) = -1\t\t\tVoltage (I) = 1\n\
             Voltage (Q) = -2\t\t\tVoltage (I) = 2\n"
        );

        let mut out = Vec::new();
        render_swapped(&[7], &[9], false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Voltage (I) = 7\n");
    }
}
