// iio-stream/src/signal.rs
//
// Copyright (c) 2018-2025, Frank Pagliughi
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.
//
//! Graceful shutdown on ^C or SIGTERM.
//!

use std::{
    cmp,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use tracing::info;

use crate::Result;

/// How often a wait checks for the stop request.
const POLL_PERIOD: Duration = Duration::from_millis(100);

/// A flag, set from the signal handler, that asks the streaming loop to quit.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Creates a flag that is not raised, and not tied to any signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag that is raised on SIGINT or SIGTERM.
    ///
    /// This can only be done once per process.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handler_flag = flag.clone();

        ctrlc::set_handler(move || {
            info!("Waiting for process to finish...");
            handler_flag.raise();
        })?;

        Ok(flag)
    }

    /// Requests a stop.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Determines if a stop was requested.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sleeps for the duration, or until a stop is requested.
    ///
    /// A duration too long to represent as a deadline waits until a stop
    /// is requested.
    ///
    /// Returns whether a stop was requested.
    pub fn wait(&self, dur: Duration) -> bool {
        let deadline = Instant::now().checked_add(dur);
        while !self.is_raised() {
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    cmp::min(POLL_PERIOD, deadline - now)
                }
                None => POLL_PERIOD,
            };
            thread::sleep(pause);
        }
        self.is_raised()
    }
}

// --------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = StopFlag::new();
        let other = flag.clone();
        assert!(!flag.is_raised());

        other.raise();
        assert!(flag.is_raised());
    }

    #[test]
    fn wait_times_out() {
        let flag = StopFlag::new();
        let start = Instant::now();
        assert!(!flag.wait(Duration::from_millis(150)));
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn wait_ends_early_on_stop() {
        let flag = StopFlag::new();
        let other = flag.clone();

        let thr = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            other.raise();
        });

        let start = Instant::now();
        assert!(flag.wait(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(5));
        thr.join().unwrap();
    }

    #[test]
    fn huge_wait_returns_when_raised() {
        let flag = StopFlag::new();
        flag.raise();
        assert!(flag.wait(Duration::from_secs(u64::MAX)));
    }

    #[test]
    fn huge_wait_ends_on_stop() {
        let flag = StopFlag::new();
        let other = flag.clone();

        let thr = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            other.raise();
        });

        assert!(flag.wait(Duration::MAX));
        thr.join().unwrap();
    }
}
