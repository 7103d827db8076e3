// iio-stream/src/logging.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Diagnostic logging for the streaming tools.
//!
//! Progress and configuration read-backs go to stderr through `tracing`,
//! leaving stdout to the sample data. The level defaults to INFO and can be
//! changed with the `RUST_LOG` environment variable.
//!

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
