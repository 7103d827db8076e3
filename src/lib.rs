// iio-stream/src/lib.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//!
//! Streaming tools for Analog Devices converters using Linux Industrial I/O.
//!
//! This crate holds the common pieces for a set of small programs that
//! capture samples from A/D converters (AD7606B, AD7768, AD4696, AD4630-24)
//! and exercise the ADRV9002 transceiver, through _libiio_ and the
//! [industrial-io](https://crates.io/crates/industrial-io) crate.
//!
//! Each program acquires a context (local, by URI, or over the network),
//! finds its devices and channels by name, applies a few register or
//! attribute settings, then loops refilling (or pushing) a buffer until it
//! gets ^C. The handles are released in the reverse order of their
//! acquisition when the program ends.
//!
//! For more information, see:
//!
//!   [IIO Wiki](https://wiki.analog.com/software/linux/docs/iio/iio)
//!
//!   [libiio Wiki](https://wiki.analog.com/resources/tools-software/linux-software/libiio)
//!

// Lints
#![deny(
    missing_docs,
    missing_debug_implementations,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub use crate::adc::Converter;
pub use crate::context::*;
pub use crate::errors::*;
pub use crate::signal::StopFlag;
pub use crate::stream::Stream;

pub mod adc;
pub mod context;
pub mod device;
pub mod errors;
pub mod logging;
pub mod signal;
pub mod stream;

pub mod ad4630;
pub mod ad4696;
pub mod ad7606b;
pub mod ad7768;

pub mod adrv9002;
pub mod dds;
pub mod iq;

#[cfg(feature = "utilities")]
pub mod cli;
