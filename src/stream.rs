// iio-stream/src/stream.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Streaming through Industrial I/O Buffers.
//!
//! A [`Stream`] couples one device with the channels that were enabled for
//! streaming and the buffer created over them. The channels must be enabled
//! before the buffer is created, since the library decides which samples
//! the buffer carries at creation time.
//!
//! When a stream is dropped it releases its resources in the reverse order
//! of their acquisition: the buffer first, then the channels are disabled.
//! The device (and through it, the context) is released last.
//!

use std::fmt;

use industrial_io as iio;
use tracing::{debug, info};

use crate::{device, Error, Result};

/// A set of enabled channels on a device and, once created, their buffer.
pub struct Stream {
    /// The buffer, once created.
    buf: Option<iio::Buffer>,
    /// The enabled channels, in the order they were requested.
    chans: Vec<iio::Channel>,
    /// The device carrying the channels.
    dev: iio::Device,
}

impl Stream {
    /// Finds the named channels on the device, without enabling them.
    pub fn find(dev: iio::Device, names: &[&str], is_output: bool) -> Result<Self> {
        let mut chans = Vec::with_capacity(names.len());
        for name in names {
            chans.push(device::find_channel(&dev, name, is_output)?);
        }

        Ok(Self {
            buf: None,
            chans,
            dev,
        })
    }

    /// Finds and enables the named channels on the device.
    ///
    /// No buffer is created yet; use [`Stream::create_buffer()`] once all
    /// the streams sharing the hardware have been prepared.
    pub fn prepare(dev: iio::Device, names: &[&str], is_output: bool) -> Result<Self> {
        let stream = Self::find(dev, names, is_output)?;
        stream.enable();
        Ok(stream)
    }

    /// Enables the channels for streaming.
    pub fn enable(&self) {
        let ids: Vec<_> = self
            .chans
            .iter()
            .map(|chan| chan.id().unwrap_or_default())
            .collect();
        info!("* Enabling IIO streaming channels: {}", ids.join(", "));
        for chan in &self.chans {
            chan.enable();
        }
    }

    /// Finds and enables the channels, then creates a non-cyclic buffer
    /// holding `capacity` samples of each.
    pub fn open(
        dev: iio::Device,
        names: &[&str],
        is_output: bool,
        capacity: usize,
    ) -> Result<Self> {
        let mut stream = Self::prepare(dev, names, is_output)?;
        stream.create_buffer(capacity)?;
        Ok(stream)
    }

    /// Creates the non-cyclic buffer for the enabled channels.
    pub fn create_buffer(&mut self, capacity: usize) -> Result<()> {
        info!(
            "* Creating non-cyclic IIO buffer on {} with {} samples",
            device::device_name(&self.dev),
            capacity
        );
        let buf = self.dev.create_buffer(capacity, false).map_err(|err| {
            Error::General(format!(
                "Could not create buffer on {}: {}",
                device::device_name(&self.dev),
                err
            ))
        })?;
        self.buf = Some(buf);
        Ok(())
    }

    /// Destroys the buffer, if one was created.
    ///
    /// This is done automatically when the stream is dropped, but a program
    /// driving several streams may want to release all the buffers before
    /// any of the channels.
    pub fn release_buffer(&mut self) {
        if let Some(buf) = self.buf.take() {
            info!("* Destroying buffer on {}", device::device_name(&self.dev));
            drop(buf);
        }
    }

    /// Gets the device for the stream.
    pub fn device(&self) -> &iio::Device {
        &self.dev
    }

    /// Gets the enabled channels, in the order they were requested.
    pub fn channels(&self) -> &[iio::Channel] {
        &self.chans
    }

    /// Gets the buffer.
    pub fn buffer(&self) -> Result<&iio::Buffer> {
        self.buf.as_ref().ok_or(Error::NoBuffer)
    }

    /// Fetches more samples from the hardware into an input stream.
    ///
    /// Returns the number of bytes now in the buffer.
    pub fn refill(&mut self) -> Result<usize> {
        let buf = self.buf.as_mut().ok_or(Error::NoBuffer)?;
        let n = buf
            .refill()
            .map_err(|err| Error::General(format!("Error refilling buffer: {}", err)))?;
        debug!("Refilled {} bytes", n);
        Ok(n)
    }

    /// Sends the samples in an output stream to the hardware.
    ///
    /// Returns the number of bytes pushed.
    pub fn push(&mut self) -> Result<usize> {
        let buf = self.buf.as_mut().ok_or(Error::NoBuffer)?;
        let n = buf
            .push()
            .map_err(|err| Error::General(format!("Error pushing buffer: {}", err)))?;
        debug!("Pushed {} bytes", n);
        Ok(n)
    }

    /// Collects the raw samples of one of the enabled channels.
    ///
    /// The samples are in the hardware format; nothing is converted or
    /// shifted into place.
    pub fn samples<T: Copy>(&self, idx: usize) -> Result<Vec<T>> {
        let buf = self.buffer()?;
        let chan = self
            .chans
            .get(idx)
            .ok_or_else(|| Error::General(format!("No stream channel at index {}", idx)))?;
        Ok(buf.channel_iter::<T>(chan).collect())
    }

    /// Places raw samples for one of the enabled channels into an output
    /// buffer. They go to the hardware on the next [`Stream::push()`].
    ///
    /// Returns the number of samples written.
    pub fn write_samples<T>(&self, idx: usize, data: &[T]) -> Result<usize>
    where
        T: Default + Copy + 'static,
    {
        let buf = self.buffer()?;
        let chan = self
            .chans
            .get(idx)
            .ok_or_else(|| Error::General(format!("No stream channel at index {}", idx)))?;
        Ok(chan.write_raw(buf, data)?)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("device", &device::device_name(&self.dev))
            .field("channels", &self.chans.len())
            .field("buffered", &self.buf.is_some())
            .finish()
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        self.release_buffer();

        info!("* Disabling streaming channels");
        for chan in &self.chans {
            chan.disable();
        }
    }
}
