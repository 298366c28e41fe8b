use std::fmt;

/// Controls what an [`ExpectationQueue`](crate::testing::ExpectationQueue)
/// does with calls made after its script is used up.
///
/// | Strictness | Call after the last expectation is satisfied |
/// |------------|----------------------------------------------|
/// | [`Lenient`](Self::Lenient) | Succeeds without running a handler |
/// | [`Strict`](Self::Strict) | Fails the test: "all expectations already satisfied" |
///
/// Lenient queues let a test script only the calls it cares about and
/// ignore whatever trailing calls follow. An empty lenient queue accepts
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl Strictness {
    /// Returns `true` if this is [`Strict`](Self::Strict).
    pub fn is_strict(&self) -> bool {
        matches!(self, Strictness::Strict)
    }

    /// Returns `true` if this is [`Lenient`](Self::Lenient).
    pub fn is_lenient(&self) -> bool {
        matches!(self, Strictness::Lenient)
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "Lenient"),
            Strictness::Strict => write!(f, "Strict"),
        }
    }
}
