use log::debug;

use crate::bus::BusDevice;
use crate::edge::{Edge, EdgeWaiter};
use crate::error::HarnessError;
use crate::sim::Simulation;
use crate::signal::ProbePoint;
use crate::types::TimeUnit;

/// One period observation: consecutive rising-edge spacing and the implied
/// frequency. `period` is in the unit the measurement was requested in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSample {
    pub period: f64,
    pub frequency_khz: f64,
}

/// Captures rising edges of a free-running signal and checks every derived
/// frequency against an expected target with a relative tolerance.
pub struct PeriodMeasurer {
    pub expected_khz: f64,
    pub tolerance: f64,
}

impl PeriodMeasurer {
    pub fn new(expected_khz: f64, tolerance: f64) -> Self {
        PeriodMeasurer {
            expected_khz,
            tolerance,
        }
    }

    /// Capture `cycle_count` rising edges (after one discarded alignment
    /// edge) and derive `cycle_count - 1` samples. Waits are unbounded: the
    /// signal is assumed free-running. The tolerance check runs only after
    /// the capture completes, and a violation names the offending sample.
    ///
    /// `cycle_count < 2` is a valid degenerate call: empty result, no
    /// check.
    pub fn measure<D: BusDevice>(
        &self,
        sim: &mut Simulation<D>,
        probe: ProbePoint,
        cycle_count: usize,
        unit: TimeUnit,
    ) -> Result<Vec<PeriodSample>, HarnessError> {
        if cycle_count < 2 {
            return Ok(Vec::new());
        }

        // First rising edge is only a phase reference.
        EdgeWaiter::wait_unbounded(sim, probe, Edge::Rising);

        let mut timestamps = Vec::with_capacity(cycle_count);
        for _ in 0..cycle_count {
            let event = EdgeWaiter::wait_unbounded(sim, probe, Edge::Rising);
            timestamps.push(unit.from_ns(event.timestamp_ns));
        }

        let samples: Vec<PeriodSample> = timestamps
            .windows(2)
            .map(|pair| {
                let period = pair[1] - pair[0];
                PeriodSample {
                    period,
                    frequency_khz: unit.khz_numerator() / period,
                }
            })
            .collect();

        for (index, sample) in samples.iter().enumerate() {
            debug!(
                "period sample {}: {:.3} {} -> {:.4} kHz",
                index, sample.period, unit, sample.frequency_khz
            );
            let relative = (sample.frequency_khz - self.expected_khz).abs() / self.expected_khz;
            if relative >= self.tolerance {
                return Err(HarnessError::FrequencyOutOfTolerance {
                    index,
                    measured_khz: sample.frequency_khz,
                    expected_khz: self.expected_khz,
                    tolerance_pct: self.tolerance * 100.0,
                });
            }
        }

        Ok(samples)
    }
}
