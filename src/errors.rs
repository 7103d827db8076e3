// iio-stream/src/errors.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//!
//! Error definitions for the IIO streaming tools.

use std::io;
use thiserror::Error;

use industrial_io as iio;

/// The Error type for the streaming tools
#[derive(Error, Debug)]
pub enum Error {
    /// An error from the underlying IIO library
    #[error("{0}")]
    Iio(#[from] iio::Error),
    /// A low-level I/O error
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The signal handler could not be installed
    #[error("{0}")]
    Signal(#[from] ctrlc::Error),
    /// The context was opened, but it holds no devices at all
    #[error("No IIO devices in the context")]
    NoDevices,
    /// A named device is not present in the context
    #[error("No IIO device named '{0}'")]
    NoDevice(String),
    /// A named channel is not present on a device
    #[error("No '{channel}' channel on device '{device}'")]
    NoChannel {
        /// The device that was searched
        device: String,
        /// The channel that was requested
        channel: String,
    },
    /// The requested channel index is beyond the number of converter channels
    #[error("{part} has {count} channels; channel {index} is out of range")]
    ChannelIndex {
        /// The converter part name
        part: &'static str,
        /// The requested index
        index: u32,
        /// The number of channels on the part
        count: u32,
    },
    /// A numeric value that does not map to a known mode setting
    #[error("Invalid {what}: {value}")]
    InvalidMode {
        /// The name of the setting
        what: &'static str,
        /// The offending value
        value: String,
    },
    /// A stream operation was attempted before its buffer was created
    #[error("No buffer has been created for the stream")]
    NoBuffer,
    /// A generic error with a string explanation
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Creates an `InvalidMode` error from anything printable.
    pub fn invalid_mode<T: ToString>(what: &'static str, value: T) -> Self {
        Error::InvalidMode {
            what,
            value: value.to_string(),
        }
    }
}

/// The default result type for the streaming tools
pub type Result<T> = std::result::Result<T, Error>;

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_error_names_both_sides() {
        let err = Error::NoChannel {
            device: "ad4630".into(),
            channel: "voltage3".into(),
        };
        assert_eq!(err.to_string(), "No 'voltage3' channel on device 'ad4630'");
    }

    #[test]
    fn invalid_mode_message() {
        let err = Error::invalid_mode("AD4630 output mode", 7);
        assert_eq!(err.to_string(), "Invalid AD4630 output mode: 7");
    }
}
