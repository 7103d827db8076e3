// iio-stream/src/bin/riio_ad7768.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! Streams samples from one channel of an AD7768.
//!
//! The 24-bit samples are printed shifted to the top of a 32-bit word.
//!

use anyhow::{Context, Result};
use iio_stream::{ad7768::{self, Ad7768}, adc, cli, logging, StopFlag};
use std::process;

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::adc_command("riio_ad7768", "Rust IIO AD7768 streaming example.")
        .get_matches();

    logging::init();
    let stop = StopFlag::install().context("Error setting Ctrl-C handler")?;

    let src = cli::context_source(&args);
    let conv = Ad7768::new(cli::channel(&args, ad7768::DFLT_CHANNEL))?;

    adc::stream(&conv, &src, cli::samples(&args), &stop)
        .with_context(|| format!("Error streaming from {}", ad7768::DEVICE_NAME))
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
