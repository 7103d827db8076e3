// iio-stream/src/cli.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Command-line handling shared by the streaming utilities.
//!
//! Every utility takes an optional context URI as its only positional
//! argument, or a network host with `-n`. The ADC utilities also share the
//! channel and buffer size options.
//!

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::ContextSource;

/// The version of the utilities
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a command with the common context arguments.
pub fn command(name: &'static str, about: &'static str) -> Command<'static> {
    Command::new(name)
        .version(VERSION)
        .about(about)
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .short('?')
                .long("help")
                .global(true)
                .action(ArgAction::Help)
                .help("Print help information"),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .action(ArgAction::Set)
                .help("Use the network backend with the provided hostname"),
        )
        .arg(
            Arg::new("uri")
                .action(ArgAction::Set)
                .value_name("URI")
                .help("Use the context with the provided URI (e.g. ip:192.168.2.1, usb:1.2.5)"),
        )
}

/// Adds the options common to the single channel ADC utilities.
pub fn adc_command(name: &'static str, about: &'static str) -> Command<'static> {
    command(name, about)
        .arg(
            Arg::new("channel")
                .short('c')
                .long("channel")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u32))
                .help("The index of the voltage channel to capture [default: part specific]"),
        )
        .arg(
            Arg::new("samples")
                .short('s')
                .long("samples")
                .action(ArgAction::Set)
                .value_parser(value_parser!(usize))
                .default_value("400")
                .help("The number of samples per buffer"),
        )
}

/// Gets the context source from the parsed arguments.
pub fn context_source(args: &ArgMatches) -> ContextSource {
    ContextSource::from_args(
        args.get_one::<String>("uri").map(String::as_str),
        args.get_one::<String>("network").map(String::as_str),
    )
}

/// Gets the channel index for an ADC utility, or the part's default.
pub fn channel(args: &ArgMatches, dflt: u32) -> u32 {
    args.get_one::<u32>("channel").copied().unwrap_or(dflt)
}

/// Gets the buffer size for an ADC utility.
pub fn samples(args: &ArgMatches) -> usize {
    args.get_one::<usize>("samples")
        .copied()
        .unwrap_or(crate::adc::DFLT_BUFFER_LEN)
}

/// Determines if a flag was given.
pub fn flag(args: &ArgMatches, id: &str) -> bool {
    args.get_one::<bool>(id).copied().unwrap_or(false)
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_uri() {
        let args = command("test", "Test")
            .try_get_matches_from(["test", "ip:10.0.0.2"])
            .unwrap();
        assert_eq!(context_source(&args), ContextSource::Uri("ip:10.0.0.2".into()));
    }

    #[test]
    fn network_host() {
        let args = command("test", "Test")
            .try_get_matches_from(["test", "-n", "analog.local"])
            .unwrap();
        assert_eq!(context_source(&args), ContextSource::Network("analog.local".into()));
    }

    #[test]
    fn no_args_is_default() {
        let args = command("test", "Test")
            .try_get_matches_from(["test"])
            .unwrap();
        assert_eq!(context_source(&args), ContextSource::Default);
    }

    #[test]
    fn adc_defaults_and_overrides() {
        let args = adc_command("test", "Test")
            .try_get_matches_from(["test"])
            .unwrap();
        assert_eq!(channel(&args, 4), 4);
        assert_eq!(samples(&args), 400);

        let args = adc_command("test", "Test")
            .try_get_matches_from(["test", "-c", "2", "--samples", "1024", "usb:1.2.5"])
            .unwrap();
        assert_eq!(channel(&args, 4), 2);
        assert_eq!(samples(&args), 1024);
        assert_eq!(context_source(&args), ContextSource::Uri("usb:1.2.5".into()));
    }

    #[test]
    fn bad_channel_is_rejected() {
        let res = adc_command("test", "Test").try_get_matches_from(["test", "-c", "x"]);
        assert!(res.is_err());
    }
}
