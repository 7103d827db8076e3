// iio-stream/src/device.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Device and channel lookup helpers.
//!

use industrial_io as iio;
use tracing::debug;

use crate::{Error, Result};

/// Makes a channel ID from its type prefix and index, like "voltage4".
pub fn channel_name(kind: &str, idx: u32) -> String {
    format!("{}{}", kind, idx)
}

/// Gets a printable name for the device, falling back to its ID.
pub fn device_name(dev: &iio::Device) -> String {
    dev.name()
        .or_else(|| dev.id())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Finds an input or output channel on the device by its name or ID.
pub fn find_channel(dev: &iio::Device, name: &str, is_output: bool) -> Result<iio::Channel> {
    dev.find_channel(name, is_output).ok_or_else(|| Error::NoChannel {
        device: device_name(dev),
        channel: name.to_string(),
    })
}

/// Writes a device register, then reads it back.
///
/// Returns the value that was read back, which may differ from the one
/// written for registers with read-only or self-clearing bits.
pub fn write_register(dev: &iio::Device, addr: u32, val: u32) -> Result<u32> {
    dev.reg_write(addr, val)?;
    let readback = dev.reg_read(addr)?;
    debug!(
        "{}: wrote 0x{:x} to register 0x{:x}, read 0x{:x}",
        device_name(dev),
        val,
        addr,
        readback
    );
    Ok(readback)
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names() {
        assert_eq!(channel_name("voltage", 0), "voltage0");
        assert_eq!(channel_name("voltage", 15), "voltage15");
        assert_eq!(channel_name("altvoltage", 6), "altvoltage6");
    }

    #[test]
    fn channel_lookup_takes_direction_flag() {
        let find: fn(&iio::Device, &str, bool) -> Result<iio::Channel> = find_channel;
        let _ = find;
    }
}
