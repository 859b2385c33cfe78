use std::fmt;

/// Time unit for timestamps handed back by the measurement primitives.
///
/// Simulation time is kept internally in nanoseconds; measurements scale
/// to the caller's unit and derive frequencies in kHz through the
/// unit-dependent reciprocal factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Ns,
    Us,
    Ms,
}

impl TimeUnit {
    /// Scale a nanosecond count into this unit.
    pub fn from_ns(&self, ns: u64) -> f64 {
        match self {
            TimeUnit::Ns => ns as f64,
            TimeUnit::Us => ns as f64 / 1_000.0,
            TimeUnit::Ms => ns as f64 / 1_000_000.0,
        }
    }

    /// Numerator of the kHz reciprocal relation for a period expressed in
    /// this unit: `freq_khz = khz_numerator() / period`.
    pub fn khz_numerator(&self) -> f64 {
        match self {
            TimeUnit::Ns => 1e6,
            TimeUnit::Us => 1_000.0,
            TimeUnit::Ms => 1.0,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
