// iio-stream/src/bin/riio_ad4696.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! Streams samples from one channel of an AD4696, with the sequencer in
//! continuous or staggered mode.
//!

use anyhow::{Context, Result};
use clap::{Arg, ArgAction};
use iio_stream::{
    ad4696::{self, Ad4696, SequencerMode},
    adc, cli, logging, StopFlag,
};
use std::process;

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::adc_command("riio_ad4696", "Rust IIO AD4696 streaming example.")
        .arg(
            Arg::new("staggered")
                .long("staggered")
                .action(ArgAction::SetTrue)
                .help("Put the sequencer in staggered mode, rather than continuous"),
        )
        .get_matches();

    logging::init();
    let stop = StopFlag::install().context("Error setting Ctrl-C handler")?;

    let mode = if cli::flag(&args, "staggered") {
        SequencerMode::Staggered
    }
    else {
        SequencerMode::Continuous
    };

    let src = cli::context_source(&args);
    let conv = Ad4696::new(cli::channel(&args, ad4696::DFLT_CHANNEL), mode)?;

    adc::stream(&conv, &src, cli::samples(&args), &stop)
        .with_context(|| format!("Error streaming from {}", ad4696::DEVICE_NAME))
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
