// iio-stream/src/bin/riio_adrv9002_dds.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! ADRV9002 single tone generation with the DDS, printing what comes back
//! on the first receive path.
//!

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction};
use iio_stream::{
    adrv9002::{self, DdsOptions},
    cli,
    dds::{Tone, TxPair},
    logging, StopFlag,
};
use std::{process, time::Duration};

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::command("riio_adrv9002_dds", "Rust IIO ADRV9002 DDS tone example.")
        .arg(
            Arg::new("frequency")
                .short('f')
                .long("frequency")
                .action(ArgAction::Set)
                .value_parser(value_parser!(i64))
                .default_value("5000")
                .help("The tone frequency, in Hz"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .action(ArgAction::Set)
                .value_parser(value_parser!(f64))
                .default_value("0.4")
                .help("The tone scale [0-1]"),
        )
        .arg(
            Arg::new("tx_channel")
                .short('t')
                .long("tx-channel")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .default_value("0")
                .help("The TX path generating the tone [0, 1]"),
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

    let dflt = DdsOptions::default();
    let opts = DdsOptions {
        tone: Tone::new(
            *args.get_one::<i64>("frequency").unwrap_or(&dflt.tone.frequency),
            *args.get_one::<f64>("scale").unwrap_or(&dflt.tone.scale),
        )?,
        pair: TxPair::try_from(*args.get_one::<u32>("tx_channel").unwrap_or(&0))?,
        interval: args
            .get_one::<u64>("interval")
            .map(|&secs| Duration::from_secs(secs))
            .unwrap_or(dflt.interval),
        ..dflt
    };

    let src = cli::context_source(&args);
    adrv9002::stream_dds(&opts, &src, &stop).context("Error streaming from the ADRV9002")
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
