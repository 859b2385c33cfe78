//! Edge detection over the discretized time axis.
//!
//! Polling happens at one controller-clock tick of resolution: each step
//! advances the simulation a single tick, samples the probe, and compares
//! against the previous sample. A deadline that elapses first is an
//! outcome, not an error; the duty measurer relies on it to classify
//! stuck-low and stuck-high signals.

use crate::bus::BusDevice;
use crate::signal::ProbePoint;
use crate::sim::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// A detected transition. Transient: produced by the waiter, consumed by
/// the measurers, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEvent {
    pub timestamp_ns: u64,
    pub direction: Edge,
}

pub struct EdgeWaiter;

impl EdgeWaiter {
    /// Wait until `probe` transitions in `direction`, or until simulation
    /// time reaches `deadline_ns` (absolute). `None` means the deadline
    /// elapsed with no matching edge.
    ///
    /// Rising means previous sample low and current sample high; falling is
    /// the converse. Equal consecutive samples are never edges.
    pub fn wait<D: BusDevice>(
        sim: &mut Simulation<D>,
        probe: ProbePoint,
        direction: Edge,
        deadline_ns: Option<u64>,
    ) -> Option<EdgeEvent> {
        let mut previous = sim.sample(probe);
        loop {
            if let Some(deadline) = deadline_ns {
                if sim.now_ns() >= deadline {
                    return None;
                }
            }
            sim.advance_cycles(1);
            let current = sim.sample(probe);
            let matched = match direction {
                Edge::Rising => !previous && current,
                Edge::Falling => previous && !current,
            };
            if matched {
                return Some(EdgeEvent {
                    timestamp_ns: sim.now_ns(),
                    direction,
                });
            }
            previous = current;
        }
    }

    /// Blocking wait with no deadline, for signals known to be
    /// free-running.
    pub fn wait_unbounded<D: BusDevice>(
        sim: &mut Simulation<D>,
        probe: ProbePoint,
        direction: Edge,
    ) -> EdgeEvent {
        loop {
            if let Some(event) = Self::wait(sim, probe, direction, None) {
                return event;
            }
        }
    }
}
