// iio-stream/src/bin/riio_ad4630.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//

//! Streams samples from one channel of an AD4630-24.
//!
//! The modes register is set for the requested output data format and
//! interface before streaming, and put back to the driver's default after.
//!
//! Output data modes:
//!   0 = 24-bit data
//!   1 = 16-bit data, 8-bit common mode
//!   2 = 24-bit data, 8-bit common mode
//!   3 = 30-bit averaged data, 1 OR bit, 1 SYNC bit
//!   4 = 32-bit test pattern
//!

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction};
use iio_stream::{
    ad4630::{self, Ad4630, ClockMode, DataRate, LaneMode, ModesRegister, OutputMode},
    adc, cli, logging, StopFlag,
};
use std::process;

// --------------------------------------------------------------------------

fn run() -> Result<()> {
    let args = cli::adc_command("riio_ad4630", "Rust IIO AD4630-24 streaming example.")
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .default_value("1")
                .help("The output data mode [0-4]"),
        )
        .arg(
            Arg::new("lanes")
                .long("lanes")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .default_value("4")
                .help("The number of SDO lanes per channel [1, 2, 4]"),
        )
        .arg(
            Arg::new("clock")
                .long("clock")
                .action(ArgAction::Set)
                .default_value("spi")
                .help("The interface clocking mode [spi, echo, host]"),
        )
        .arg(
            Arg::new("ddr")
                .long("ddr")
                .action(ArgAction::SetTrue)
                .help("Use double data rate on the SDO lanes"),
        )
        .get_matches();

    logging::init();
    let stop = StopFlag::install().context("Error setting Ctrl-C handler")?;

    let modes = ModesRegister {
        lanes: LaneMode::try_from(*args.get_one::<u32>("lanes").unwrap_or(&4))?,
        clock: args
            .get_one::<String>("clock")
            .map(|s| s.parse::<ClockMode>())
            .transpose()?
            .unwrap_or(ClockMode::Spi),
        rate: if cli::flag(&args, "ddr") {
            DataRate::Ddr
        }
        else {
            DataRate::Sdr
        },
        output: OutputMode::try_from(*args.get_one::<u32>("mode").unwrap_or(&1))?,
    };

    let src = cli::context_source(&args);
    let conv = Ad4630::new(cli::channel(&args, ad4630::DFLT_CHANNEL), modes)?;

    adc::stream(&conv, &src, cli::samples(&args), &stop)
        .with_context(|| format!("Error streaming from {}", ad4630::DEVICE_NAME))
}

// --------------------------------------------------------------------------

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
