// iio-stream/src/context.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Acquiring Industrial I/O Contexts.
//!
//! A context is the connection to a set of IIO devices, either on the local
//! machine or on a remote one reached through `iiod`. The streaming tools
//! open exactly one context for the life of the program, and hold it in a
//! [`Session`] so that its release is the last step of the teardown.
//!

use std::fmt;

use industrial_io as iio;
use tracing::{debug, info};

use crate::{Error, Result};

/// Where to find the IIO context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    /// The default context.
    ///
    /// This is the local context unless the `IIOD_REMOTE` environment
    /// variable names a remote host.
    Default,
    /// A context given by URI, like "ip:192.168.2.1" or "usb:1.2.3"
    Uri(String),
    /// The network backend for the given host name or address.
    Network(String),
}

impl ContextSource {
    /// Determines the source from the optional command-line values.
    ///
    /// A network host takes precedence over a URI.
    pub fn from_args(uri: Option<&str>, host: Option<&str>) -> Self {
        match (host, uri) {
            (Some(host), _) => ContextSource::Network(host.to_string()),
            (None, Some(uri)) => ContextSource::Uri(uri.to_string()),
            (None, None) => ContextSource::Default,
        }
    }

    /// Whether the context is on this machine (as far as we can tell).
    pub fn is_local(&self) -> bool {
        match self {
            ContextSource::Default => std::env::var_os("IIOD_REMOTE").is_none(),
            ContextSource::Uri(uri) => uri.starts_with("local:"),
            ContextSource::Network(_) => false,
        }
    }

    /// Opens the context.
    pub fn open(&self) -> Result<iio::Context> {
        let ctx = match self {
            ContextSource::Default => iio::Context::new(),
            ContextSource::Uri(uri) => iio::Context::from_uri(uri),
            ContextSource::Network(host) => {
                iio::Context::with_backend(iio::Backend::Network(host))
            }
        }?;
        Ok(ctx)
    }
}

impl Default for ContextSource {
    fn default() -> Self {
        ContextSource::Default
    }
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSource::Default => write!(f, "default context"),
            ContextSource::Uri(uri) => write!(f, "{}", uri),
            ContextSource::Network(host) => write!(f, "ip:{}", host),
        }
    }
}

// --------------------------------------------------------------------------

/// An open IIO context for the lifetime of one streaming program.
///
/// Devices and channels found through the session keep the underlying
/// context alive themselves, so the session can be dropped at any point.
/// Declared first in a scope, it is dropped last.
pub struct Session {
    ctx: iio::Context,
}

impl Session {
    /// Opens the context and makes sure that it has at least one device.
    pub fn open(src: &ContextSource) -> Result<Self> {
        debug!("libiio version: {}", iio::library_version());
        info!("* Acquiring IIO context ({})", src);

        let ctx = src.open()?;
        if ctx.num_devices() == 0 {
            return Err(Error::NoDevices);
        }
        Ok(Self { ctx })
    }

    /// Finds a device by name or ID.
    pub fn find_device(&self, name: &str) -> Result<iio::Device> {
        self.ctx
            .find_device(name)
            .ok_or_else(|| Error::NoDevice(name.to_string()))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("devices", &self.ctx.num_devices())
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!("* Destroying context");
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_wins_over_uri() {
        let src = ContextSource::from_args(Some("usb:1.2.5"), Some("pluto.local"));
        assert_eq!(src, ContextSource::Network("pluto.local".into()));

        let src = ContextSource::from_args(Some("usb:1.2.5"), None);
        assert_eq!(src, ContextSource::Uri("usb:1.2.5".into()));

        assert_eq!(ContextSource::from_args(None, None), ContextSource::Default);
    }

    #[test]
    fn locality() {
        assert!(ContextSource::Uri("local:".into()).is_local());
        assert!(!ContextSource::Uri("ip:10.0.0.2".into()).is_local());
        assert!(!ContextSource::Network("10.0.0.2".into()).is_local());
    }

    #[test]
    fn display() {
        assert_eq!(ContextSource::Network("10.0.0.2".into()).to_string(), "ip:10.0.0.2");
        assert_eq!(ContextSource::Uri("usb:1.2.5".into()).to_string(), "usb:1.2.5");
    }
}
