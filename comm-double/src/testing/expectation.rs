/// One step of a scripted interaction.
///
/// Handlers receive the current `Expectation` alongside the call arguments
/// and decide when it is fulfilled by calling
/// [`mark_satisfied`](Self::mark_satisfied). An expectation that is never
/// marked keeps receiving calls, and fails
/// [`verify`](crate::testing::CommunicatorDouble::verify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    description: String,
    satisfied: bool,
}

impl Expectation {
    pub(crate) fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            satisfied: false,
        }
    }

    /// Human-readable description, reported when the expectation is unmet.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub fn mark_satisfied(&mut self) {
        self.satisfied = true;
    }
}
