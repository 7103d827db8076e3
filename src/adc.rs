// iio-stream/src/adc.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Buffered capture from a single A/D converter channel.
//!
//! All of the converter tools follow the same sequence: open the context,
//! find the converter and one of its `voltage` channels, apply the register
//! settings, enable the channel, then refill a buffer and print its raw
//! samples until stopped.
//! The parts differ only in their register settings and in how a raw
//! sample word is turned into a printable value, which is what the
//! [`Converter`] trait captures.
//!

use std::io::{self, Write};

use industrial_io as iio;
use tracing::{debug, info};

use crate::{device, ContextSource, Result, Session, StopFlag, Stream};

/// The default number of samples per buffer.
pub const DFLT_BUFFER_LEN: usize = 400;

/// Gets the size, in bytes, of one sample with the given format.
pub fn sample_size(length: u32, repeat: u32) -> usize {
    (length / 8 * repeat) as usize
}

/// An A/D converter that can be streamed.
pub trait Converter {
    /// The raw word type for one sample in the buffer.
    type Word: Copy + 'static;

    /// The part name, for messages.
    const PART: &'static str;
    /// The name of the IIO streaming device.
    const DEVICE: &'static str;
    /// The number of input channels on the part.
    const NUM_CHANNELS: u32;

    /// The index of the `voltage` channel to capture.
    fn channel(&self) -> u32;

    /// Applies the register configuration before streaming.
    ///
    /// Called once the streaming channel has been found, before it is
    /// enabled.
    fn configure(&self, _dev: &iio::Device) -> Result<()> {
        Ok(())
    }

    /// Called after every refill, before the samples are rendered.
    ///
    /// An error ends the capture.
    fn inspect(&self, _chan: &iio::Channel) -> Result<()> {
        Ok(())
    }

    /// Writes one buffer's worth of raw samples, from the channel with the
    /// given ID.
    fn render(&self, id: &str, words: &[Self::Word], out: &mut dyn Write) -> io::Result<()>;

    /// Puts the device back to its default state after streaming.
    fn restore(&self, _dev: &iio::Device) -> Result<()> {
        Ok(())
    }
}

/// Checks a channel index against the number of channels on the part.
pub fn check_channel<C: Converter>(idx: u32) -> Result<u32> {
    if idx < C::NUM_CHANNELS {
        Ok(idx)
    }
    else {
        Err(crate::Error::ChannelIndex {
            part: C::PART,
            index: idx,
            count: C::NUM_CHANNELS,
        })
    }
}

/// Streams from the converter, printing the samples to stdout, until a stop
/// is requested or an error occurs.
pub fn stream<C: Converter>(
    conv: &C,
    src: &ContextSource,
    buffer_len: usize,
    stop: &StopFlag,
) -> Result<()> {
    let session = Session::open(src)?;

    info!("* Acquiring {} streaming device", C::PART);
    let dev = session.find_device(C::DEVICE)?;

    let chan_name = device::channel_name("voltage", conv.channel());
    info!("* Acquiring {} channel {}", C::PART, conv.channel());
    let mut rx = Stream::find(dev, &[chan_name.as_str()], false)?;

    info!("* Configuring {} for streaming", C::PART);
    conv.configure(rx.device())?;

    rx.enable();
    rx.create_buffer(buffer_len)?;

    info!("* Starting IO streaming (press CTRL+C to cancel)");
    let res = capture(conv, &mut rx, stop);

    // The device is restored even if the capture failed.
    let restored = conv.restore(rx.device());
    res.and(restored)
}

// Refills and prints until stopped.
fn capture<C: Converter>(conv: &C, rx: &mut Stream, stop: &StopFlag) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while !stop.is_raised() {
        rx.refill()?;

        let chan = &rx.channels()[0];
        conv.inspect(chan)?;

        let fmt = chan.data_format();
        debug!(
            "Fmt length = {}, fmt repeat = {}, sample size = {}",
            fmt.length(),
            fmt.repeat(),
            sample_size(fmt.length(), fmt.repeat())
        );

        let id = chan.id().unwrap_or_default();
        let words = rx.samples::<C::Word>(0)?;
        conv.render(&id, &words, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl Converter for Dummy {
        type Word = u8;

        const PART: &'static str = "DUMMY";
        const DEVICE: &'static str = "iio_dummy_part_no";
        const NUM_CHANNELS: u32 = 2;

        fn channel(&self) -> u32 {
            0
        }

        fn render(&self, _id: &str, _words: &[u8], _out: &mut dyn Write) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sample_sizes() {
        assert_eq!(sample_size(16, 1), 2);
        assert_eq!(sample_size(32, 1), 4);
        assert_eq!(sample_size(64, 1), 8);
        assert_eq!(sample_size(16, 2), 4);
    }

    #[test]
    fn channel_range() {
        assert_eq!(check_channel::<Dummy>(1).unwrap(), 1);
        let err = check_channel::<Dummy>(2).unwrap_err();
        assert_eq!(err.to_string(), "DUMMY has 2 channels; channel 2 is out of range");
    }
}
