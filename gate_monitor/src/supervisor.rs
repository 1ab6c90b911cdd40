//! Outer loop: connect, then monitor until a fault, forever.

use crate::clock::Clock;
use crate::error::MonitorError;
use crate::monitor::Monitor;
use crate::network::NetworkLink;
use gate::consts::{FLASHES_CONNECTED, FLASHES_CONNECTING};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{error, info};

/// Restarts the monitor from network association after every fault.
pub struct Supervisor<C: Clock> {
    monitor: Monitor<C>,
    link: Box<dyn NetworkLink>,
    restart_delay: Duration,
    restarts: u64,
}

impl<C: Clock> Supervisor<C> {
    pub fn new(monitor: Monitor<C>, link: Box<dyn NetworkLink>, restart_delay: Duration) -> Self {
        Self {
            monitor,
            link,
            restart_delay,
            restarts: 0,
        }
    }

    #[inline]
    pub fn monitor(&self) -> &Monitor<C> {
        &self.monitor
    }

    /// One outer-loop iteration. Only returns on a fault.
    pub fn run_once(&mut self) -> MonitorError {
        match self.connect_and_monitor() {
            Ok(never) => match never {},
            Err(e) => e,
        }
    }

    /// Run forever.
    pub fn run(&mut self) -> ! {
        loop {
            let fault = self.run_once();
            self.restarts += 1;
            error!(
                "Monitor stopped: {} (restart {} in {:?})",
                fault, self.restarts, self.restart_delay
            );
            self.monitor.clock().sleep(self.restart_delay);
        }
    }

    fn connect_and_monitor(&mut self) -> Result<Infallible, MonitorError> {
        self.monitor.flash(FLASHES_CONNECTING);
        info!("Establishing network via {}", self.link.name());
        self.link.ensure_connected(self.monitor.clock())?;
        self.monitor.flash(FLASHES_CONNECTED);
        self.monitor.run()
    }
}
