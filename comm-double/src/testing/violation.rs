use std::borrow::Cow;

/// A mismatch between the scripted expectations and the calls actually made.
///
/// Unlike [`Error`](crate::Error), a `Violation` is never handed to the
/// component under test. The call adapters and
/// [`CommunicatorDouble::verify`](crate::testing::CommunicatorDouble::verify)
/// fail the test with it by panicking; the `try_*` methods return it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A call arrived after every expectation of the queue was used up.
    #[error("{queue}: all expectations already satisfied")]
    Exhausted { queue: Cow<'static, str> },

    /// An expectation was never satisfied.
    #[error("{queue}: unsatisfied expectation #{index}: {description}")]
    Unsatisfied {
        queue: Cow<'static, str>,
        index: usize,
        description: String,
    },
}

impl Violation {
    /// Name of the queue that detected the violation.
    pub fn queue(&self) -> &str {
        match self {
            Violation::Exhausted { queue } | Violation::Unsatisfied { queue, .. } => {
                queue.as_ref()
            }
        }
    }

    /// Fail the current test with this violation.
    pub(crate) fn raise(self) -> ! {
        tracing::error!(queue = %self.queue(), violation = %self, "expectation violated");
        panic!("{}", self)
    }
}
