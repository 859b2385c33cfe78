use thiserror::Error;

/// Errors surfaced by the harness.
///
/// Timing-boundary conditions (no edge before a deadline) are deliberately
/// not represented here: a missing edge is an ordinary measurement outcome
/// and is reported as `None` or a 0%/100% duty sentinel by the measurers.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Frame address exceeds the 7-bit range. Raised at construction; no
    /// bus lines are written for a rejected frame.
    #[error("address out of range: {0:#04x} (must be 0..=0x7f)")]
    AddressOutOfRange(u16),

    /// Frame data exceeds the 8-bit range.
    #[error("data out of range: {0:#05x} (must be 0..=0xff)")]
    DataOutOfRange(u16),

    /// A period sample's derived frequency fell outside the acceptance
    /// band. The measurement completed; the offending sample is named.
    #[error(
        "frequency out of tolerance: sample {index} measured {measured_khz:.4} kHz, \
         expected {expected_khz:.4} kHz +/- {tolerance_pct:.2}%"
    )]
    FrequencyOutOfTolerance {
        index: usize,
        measured_khz: f64,
        expected_khz: f64,
        tolerance_pct: f64,
    },

    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
