use crate::testing::Strictness;

/// Configuration for a [`CommunicatorDouble`](crate::testing::CommunicatorDouble).
///
/// Each call shape has its own queue and its own [`Strictness`]. Both are
/// lenient by default.
///
/// # Examples
///
/// ```rust
/// use comm_double::testing::{CommunicatorDouble, DoubleConfig, Strictness};
///
/// let config = DoubleConfig::default()
///     .with_start_strictness(Strictness::Strict)   // no unscripted commands
///     .with_upload_strictness(Strictness::Lenient); // extra uploads are fine
///
/// let comm = CommunicatorDouble::with_config(config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleConfig {
    /// Strictness of the `start` queue.
    /// Default: Lenient
    start_strictness: Strictness,

    /// Strictness of the `upload` queue.
    /// Default: Lenient
    upload_strictness: Strictness,
}

impl DoubleConfig {
    /// Set the strictness of every queue.
    pub fn with_strictness(self, strictness: Strictness) -> Self {
        self.with_start_strictness(strictness)
            .with_upload_strictness(strictness)
    }

    /// Set the strictness of the `start` queue.
    pub fn with_start_strictness(mut self, strictness: Strictness) -> Self {
        self.start_strictness = strictness;
        self
    }

    /// Returns the strictness of the `start` queue.
    pub fn start_strictness(&self) -> Strictness {
        self.start_strictness
    }

    /// Set the strictness of the `upload` queue.
    pub fn with_upload_strictness(mut self, strictness: Strictness) -> Self {
        self.upload_strictness = strictness;
        self
    }

    /// Returns the strictness of the `upload` queue.
    pub fn upload_strictness(&self) -> Strictness {
        self.upload_strictness
    }
}
