// iio-stream/src/bin/riio_adrv9002.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! ADRV9002 streaming with a TX to RX digital loopback.
//!
//! The TX DAC data source is selected with `--dac-mode`:
//!   0  = internal tone (DDS)
//!   2  = input data (DMA buffer), a complex sine from a table
//!   3  = standby
//!   6  = PN7
//!   7  = PN15
//!   10 = nibble ramp
//!   11 = 16-bit ramp
//!
//! The digital loopback is set through debugfs, so it needs a local context
//! and root privileges.
//!

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction};
use iio_stream::{
    adrv9002::{self, TransceiverOptions, TxDacMode},
    cli,
    dds::{self, Tone},
    logging, StopFlag,
};
use std::{process, time::Duration};

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::command("riio_adrv9002", "Rust IIO ADRV9002 loopback streaming example.")
        .arg(
            Arg::new("dac_mode")
                .short('m')
                .long("dac-mode")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .default_value("0")
                .help("The TX DAC data source"),
        )
        .arg(
            Arg::new("frequency")
                .short('f')
                .long("frequency")
                .action(ArgAction::Set)
                .value_parser(value_parser!(i64))
                .default_value("10000")
                .help("The DDS tone frequency, in Hz"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .action(ArgAction::Set)
                .value_parser(value_parser!(f64))
                .default_value("0.5")
                .help("The DDS tone scale [0-1]"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .default_value("5")
                .help("Seconds to wait between buffer refills"),
        )
        .get_matches();

    logging::init();
    let stop = StopFlag::install().context("Error setting Ctrl-C handler")?;

    let dflt = TransceiverOptions::default();
    let tone = Tone::new(
        *args.get_one::<i64>("frequency").unwrap_or(&dflt.tone.frequency),
        *args.get_one::<f64>("scale").unwrap_or(&dflt.tone.scale),
    )?
    .with_phase(dds::QUADRATURE_PHASE);

    let opts = TransceiverOptions {
        dac_mode: TxDacMode::try_from(*args.get_one::<u32>("dac_mode").unwrap_or(&0))?,
        tone,
        interval: args
            .get_one::<u64>("interval")
            .map(|&secs| Duration::from_secs(secs))
            .unwrap_or(dflt.interval),
        ..dflt
    };

    let src = cli::context_source(&args);
    adrv9002::stream(&opts, &src, &stop).context("Error streaming from the ADRV9002")
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
