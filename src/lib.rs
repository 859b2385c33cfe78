//! # PWM Bench
//!
//! A cycle-accurate verification harness for a peripheral controlled over a
//! 2-wire serial interface and observed through two free-running output
//! signals.
//!
//! This library provides:
//! - Bit-accurate serial transaction encoding against a simulated input bus
//! - Discretized, single-threaded simulation time with cooperative stepping
//! - Edge waiting with deadline semantics over polled signal probes
//! - Period/frequency measurement with relative-tolerance checking
//! - Duty-cycle measurement robust to the 0% and 100% boundary cases
//! - JSON-configurable timing parameters

pub mod bus;
pub mod config;
pub mod edge;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod measure;
pub mod sim;
pub mod signal;
pub mod types;

// Re-export commonly used items for easier importing
pub use bus::{BusDevice, BusLineState, OutputLines};
pub use config::{DutyBand, HarnessConfig};
pub use edge::{Edge, EdgeEvent, EdgeWaiter};
pub use encoder::TransactionEncoder;
pub use error::HarnessError;
pub use frame::{BusFrame, Direction};
pub use measure::{DutyCycleMeasurer, PeriodMeasurer, PeriodSample};
pub use sim::Simulation;
pub use signal::{Level, OutputBus, ProbePoint};
pub use types::TimeUnit;
