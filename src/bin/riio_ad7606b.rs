// iio-stream/src/bin/riio_ad7606b.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! Streams samples from one channel of an AD7606B.
//!
//! Run on the target with the local context:
//!   $ riio_ad7606b
//!
//! or from a host PC, with a URI reported by `iio_info -s`:
//!   $ riio_ad7606b usb:1.2.5
//!

use anyhow::{Context, Result};
use iio_stream::{ad7606b::{self, Ad7606b}, adc, cli, logging, StopFlag};
use std::process;

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::adc_command("riio_ad7606b", "Rust IIO AD7606B streaming example.")
        .get_matches();

    logging::init();
    let stop = StopFlag::install().context("Error setting Ctrl-C handler")?;

    let src = cli::context_source(&args);
    let conv = Ad7606b::new(cli::channel(&args, ad7606b::DFLT_CHANNEL))?;

    adc::stream(&conv, &src, cli::samples(&args), &stop)
        .with_context(|| format!("Error streaming from {}", ad7606b::DEVICE_NAME))
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
