use std::fmt;

/// Logic level of a single digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::High => "High",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Level::Low => '0',
            Level::High => '1',
        }
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn to_bool(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// The two read-only response buses exposed by the device under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputBus {
    /// Primary output vector (mirrors the output-enable register, carries
    /// the PWM wave on its low bit when PWM is enabled).
    Primary,
    /// Secondary output vector.
    Secondary,
}

/// Selects one boolean output line to observe: a bus and a bit position.
///
/// Probes are read-only; the harness polls them against the simulation's
/// current tick and never drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePoint {
    pub bus: OutputBus,
    pub bit: u8,
}

impl ProbePoint {
    pub fn new(bus: OutputBus, bit: u8) -> Self {
        ProbePoint { bus, bit }
    }

    /// The PWM wave observed by the stock scenarios: primary bus, bit 0.
    pub fn pwm() -> Self {
        ProbePoint::new(OutputBus::Primary, 0)
    }
}

impl fmt::Display for ProbePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bus = match self.bus {
            OutputBus::Primary => "primary",
            OutputBus::Secondary => "secondary",
        };
        write!(f, "{}[{}]", bus, self.bit)
    }
}
