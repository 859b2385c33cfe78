//! Duty-cycle extraction.
//!
//! The measurement is a strictly sequential three-phase state machine:
//! seek a rising edge, seek the falling edge, seek the next rising edge to
//! close the period. Two terminal shortcuts bypass the remaining phases:
//! no rising edge within one nominal period means the signal sat low for a
//! full cycle (exactly 0.0), and no falling edge within one nominal period
//! of the high-phase start means it sat high (exactly 100.0). Naive
//! edge-counting gets both of these wrong.
//!
//! The transition function is pure and tick-free so the machine is
//! testable without a live time source; [`DutyCycleMeasurer`] drives it
//! against a simulation.

use log::debug;

use crate::bus::BusDevice;
use crate::edge::{Edge, EdgeWaiter};
use crate::sim::Simulation;
use crate::signal::ProbePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyPhase {
    SeekRise,
    SeekFall,
    SeekNextRise,
    Done,
}

/// Input to the transition function: either the matching edge arrived at a
/// timestamp, or the bounding deadline elapsed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyEvent {
    Edge(u64),
    Deadline,
}

/// The three-phase machine. No backward transitions; `step` returns the
/// final percentage exactly once, when the machine reaches `Done`.
#[derive(Debug)]
pub struct DutyMachine {
    phase: DutyPhase,
    t_start_ns: u64,
    t_fall_ns: u64,
}

impl DutyMachine {
    pub fn new() -> Self {
        DutyMachine {
            phase: DutyPhase::SeekRise,
            t_start_ns: 0,
            t_fall_ns: 0,
        }
    }

    pub fn phase(&self) -> DutyPhase {
        self.phase
    }

    /// Start of the observed high phase, once known.
    pub fn high_phase_start_ns(&self) -> Option<u64> {
        match self.phase {
            DutyPhase::SeekRise => None,
            _ => Some(self.t_start_ns),
        }
    }

    pub fn step(&mut self, event: DutyEvent) -> Option<f64> {
        match (self.phase, event) {
            (DutyPhase::SeekRise, DutyEvent::Edge(t)) => {
                self.t_start_ns = t;
                self.phase = DutyPhase::SeekFall;
                None
            }
            // Low for a full nominal period: 0%, an exact sentinel.
            (DutyPhase::SeekRise, DutyEvent::Deadline) => {
                self.phase = DutyPhase::Done;
                Some(0.0)
            }
            (DutyPhase::SeekFall, DutyEvent::Edge(t)) => {
                self.t_fall_ns = t;
                self.phase = DutyPhase::SeekNextRise;
                None
            }
            // High for a full nominal period: 100%, an exact sentinel.
            (DutyPhase::SeekFall, DutyEvent::Deadline) => {
                self.phase = DutyPhase::Done;
                Some(100.0)
            }
            (DutyPhase::SeekNextRise, DutyEvent::Edge(t_end)) => {
                self.phase = DutyPhase::Done;
                let period = t_end.saturating_sub(self.t_start_ns);
                if period == 0 {
                    // Non-physical; cannot occur with a free-running
                    // signal. Mapped to 0% instead of propagated.
                    return Some(0.0);
                }
                let high_time = self.t_fall_ns.saturating_sub(self.t_start_ns);
                Some(high_time as f64 / period as f64 * 100.0)
            }
            // The closing wait is unbounded; a deadline here or any event
            // after Done is ignored.
            (DutyPhase::SeekNextRise, DutyEvent::Deadline) | (DutyPhase::Done, _) => None,
        }
    }
}

impl Default for DutyMachine {
    fn default() -> Self {
        DutyMachine::new()
    }
}

/// Drives [`DutyMachine`] against a live simulation.
pub struct DutyCycleMeasurer {
    pub nominal_period_us: f64,
}

impl DutyCycleMeasurer {
    pub fn new(nominal_period_us: f64) -> Self {
        DutyCycleMeasurer { nominal_period_us }
    }

    /// Measure the duty cycle of `probe` in percent.
    ///
    /// A signal already high at call time counts the call time as the
    /// start of the high phase. Each bounded phase gets one nominal period;
    /// the closing rising edge is waited for without a deadline.
    pub fn measure<D: BusDevice>(&self, sim: &mut Simulation<D>, probe: ProbePoint) -> f64 {
        let nominal_ns = (self.nominal_period_us * 1_000.0).round() as u64;
        let mut machine = DutyMachine::new();

        // Mid-high-phase entry: treat now as the rising edge.
        if sim.sample(probe) {
            machine.step(DutyEvent::Edge(sim.now_ns()));
        }

        loop {
            let event = match machine.phase() {
                DutyPhase::SeekRise => {
                    let deadline = sim.now_ns() + nominal_ns;
                    Self::poll(sim, probe, Edge::Rising, Some(deadline))
                }
                DutyPhase::SeekFall => {
                    let t_start = machine
                        .high_phase_start_ns()
                        .unwrap_or_else(|| sim.now_ns());
                    Self::poll(sim, probe, Edge::Falling, Some(t_start + nominal_ns))
                }
                DutyPhase::SeekNextRise => Self::poll(sim, probe, Edge::Rising, None),
                DutyPhase::Done => break,
            };
            if let Some(duty_pct) = machine.step(event) {
                debug!("measured duty cycle: {:.2}%", duty_pct);
                return duty_pct;
            }
        }

        // Unreachable: step returns the result before the phase reads Done.
        0.0
    }

    fn poll<D: BusDevice>(
        sim: &mut Simulation<D>,
        probe: ProbePoint,
        direction: Edge,
        deadline_ns: Option<u64>,
    ) -> DutyEvent {
        match EdgeWaiter::wait(sim, probe, direction, deadline_ns) {
            Some(event) => DutyEvent::Edge(event.timestamp_ns),
            None => DutyEvent::Deadline,
        }
    }
}
