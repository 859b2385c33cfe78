//! Discretized simulation time and the cooperative stepping loop.
//!
//! There is no wall clock and no thread: time is a monotonic nanosecond
//! counter advanced in controller-clock quanta. Every wait in the harness
//! (half serial-clock pacing, edge polling, measurement deadlines) reduces
//! to repeated single-tick advances, so two logical activities interleave
//! without any true concurrency and without locks.

use log::trace;

use crate::bus::{BusDevice, BusLineState, OutputLines};
use crate::signal::ProbePoint;
use crate::types::TimeUnit;

pub struct Simulation<D: BusDevice> {
    device: D,
    clk_period_ns: u64,
    now_ns: u64,
}

impl<D: BusDevice> Simulation<D> {
    pub fn new(device: D, clk_period_ns: u64) -> Self {
        assert!(clk_period_ns > 0, "controller clock period must be nonzero");
        Simulation {
            device,
            clk_period_ns,
            now_ns: 0,
        }
    }

    /// Current simulation time in nanoseconds. Monotonic, starts at zero.
    pub fn now_ns(&self) -> u64 {
        self.now_ns
    }

    /// Current simulation time scaled to `unit`.
    pub fn now(&self, unit: TimeUnit) -> f64 {
        unit.from_ns(self.now_ns)
    }

    /// One controller-clock tick in nanoseconds.
    pub fn clk_period_ns(&self) -> u64 {
        self.clk_period_ns
    }

    /// Advance by `cycles` controller-clock ticks, clocking the device once
    /// per tick.
    pub fn advance_cycles(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.device.clock_edge();
            self.now_ns += self.clk_period_ns;
        }
    }

    /// Advance tick by tick until at least `duration_ns` has elapsed.
    pub fn advance_at_least_ns(&mut self, duration_ns: u64) {
        let target = self.now_ns + duration_ns;
        while self.now_ns < target {
            self.advance_cycles(1);
        }
        trace!("advanced to t={} ns", self.now_ns);
    }

    /// Drive the controller-owned input lines at the current tick.
    pub fn drive(&mut self, lines: BusLineState) {
        self.device.write_input_lines(lines);
    }

    /// Sample one output line at the current tick.
    pub fn sample(&self, probe: ProbePoint) -> bool {
        self.device.read_output_lines().bit(probe)
    }

    /// Read both response buses for scenario assertions.
    pub fn outputs(&self) -> OutputLines {
        self.device.read_output_lines()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
