//! Signal measurement engines: period/frequency capture and duty-cycle
//! extraction, both built on fixed-resolution edge polling.

pub mod duty;
pub mod period;

pub use duty::{DutyCycleMeasurer, DutyEvent, DutyMachine, DutyPhase};
pub use period::{PeriodMeasurer, PeriodSample};
