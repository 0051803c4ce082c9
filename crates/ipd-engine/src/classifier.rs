//! Static per-kind strategy metadata

use core::fmt;
use serde::Serialize;

/// How many past rounds a strategy may consult
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MemoryDepth {
    Finite(u32),
    Unbounded,
}

impl MemoryDepth {
    /// Whether a strategy with this depth is allowed to look `rounds` back.
    pub fn covers(self, rounds: u32) -> bool {
        match self {
            MemoryDepth::Finite(depth) => rounds <= depth,
            MemoryDepth::Unbounded => true,
        }
    }
}

impl fmt::Display for MemoryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryDepth::Finite(depth) => write!(f, "{}", depth),
            MemoryDepth::Unbounded => write!(f, "inf"),
        }
    }
}

/// Guarantees a strategy kind honors.
///
/// Attached to the kind at registration, never computed at runtime. Tests
/// play canned scenarios against every kind and check these fields hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Classifier {
    pub memory_depth: MemoryDepth,
    /// Consults the match's random stream
    pub stochastic: bool,
    pub long_run_time: bool,
    /// Reads the opponent's decision logic through the introspection channel
    pub inspects_source: bool,
    pub manipulates_source: bool,
    pub manipulates_state: bool,
    /// Match attributes the strategy reasons about (documentation only)
    pub makes_use_of: &'static [&'static str],
}

impl Classifier {
    /// A deterministic, memoryless, non-introspective baseline.
    pub const fn basic(memory_depth: MemoryDepth) -> Self {
        Self {
            memory_depth,
            stochastic: false,
            long_run_time: false,
            inspects_source: false,
            manipulates_source: false,
            manipulates_state: false,
            makes_use_of: &[],
        }
    }

    pub const fn stochastic(mut self) -> Self {
        self.stochastic = true;
        self
    }

    pub const fn inspecting(mut self) -> Self {
        self.inspects_source = true;
        self
    }

    pub const fn manipulating_state(mut self) -> Self {
        self.manipulates_state = true;
        self
    }

    pub const fn using(mut self, attributes: &'static [&'static str]) -> Self {
        self.makes_use_of = attributes;
        self
    }
}
