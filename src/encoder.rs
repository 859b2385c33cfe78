//! Serial transaction encoder.
//!
//! Turns a [`BusFrame`] into the timed sequence of bus-line writes the
//! responder expects: chip select asserted low, sixteen bits shifted MSB
//! first with data settling while the serial clock is low and held through
//! the rising edge (the responder samples on that edge), then chip select
//! released and a settle hold. All pacing comes from [`HarnessConfig`];
//! the encoder owns the controller lines for the duration of a call.

use log::debug;

use crate::bus::{BusDevice, BusLineState};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::frame::{BusFrame, Direction, FRAME_BITS};
use crate::sim::Simulation;

pub struct TransactionEncoder<'a> {
    config: &'a HarnessConfig,
}

impl<'a> TransactionEncoder<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        TransactionEncoder { config }
    }

    /// Construct and send a frame. Range violations fail here, before any
    /// bus line is written.
    pub fn send_transaction<D: BusDevice>(
        &self,
        sim: &mut Simulation<D>,
        direction: Direction,
        address: u16,
        data: u16,
    ) -> Result<BusLineState, HarnessError> {
        let frame = BusFrame::new(direction, address, data)?;
        Ok(self.send(sim, frame))
    }

    /// Serialize `frame` onto the bus. Returns the idle line state left on
    /// the bus after the settle hold, for release assertions by callers.
    pub fn send<D: BusDevice>(&self, sim: &mut Simulation<D>, frame: BusFrame) -> BusLineState {
        debug!("sending transaction: {}", frame);

        // Assert chip select with clock low and data at idle, and give the
        // responder one hold interval to register the assertion.
        sim.drive(BusLineState::new(false, false, false));
        sim.advance_cycles(self.config.cs_assert_cycles);

        for index in 0..FRAME_BITS {
            let bit = frame.bit(index);
            // Data settles while the serial clock is low...
            sim.drive(BusLineState::new(false, bit, false));
            sim.advance_at_least_ns(self.config.sclk_half_period_ns);
            // ...and is held unchanged through the rising edge, where the
            // responder samples it.
            sim.drive(BusLineState::new(false, bit, true));
            sim.advance_at_least_ns(self.config.sclk_half_period_ns);
        }

        // Release the bus and hold long enough for internal latching.
        let idle = BusLineState::idle();
        sim.drive(idle);
        sim.advance_cycles(self.config.cs_settle_cycles);
        idle
    }
}
