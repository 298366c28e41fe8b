use std::{borrow::Cow, fmt};

use crate::testing::{Expectation, Strictness, Violation};

struct Entry<H> {
    expectation: Expectation,
    handler: H,
}

/// An ordered script of expectations for one call shape.
///
/// `H` is the handler type of that call shape (see
/// [`StartHandler`](crate::testing::StartHandler) and
/// [`UploadHandler`](crate::testing::UploadHandler)). Expectations are
/// consumed strictly in registration order: a cursor points at the current
/// one and moves past it on the first lookup after it is satisfied. An
/// expectation the cursor has moved past is never returned again.
///
/// # Example
///
/// ```
/// use comm_double::testing::{ExpectationQueue, Strictness, Violation};
///
/// let mut queue = ExpectationQueue::new("steps", Strictness::Strict);
/// queue.append_expectation("first", ());
/// queue.append_expectation("second", ());
///
/// queue.current_expect().unwrap().mark_satisfied();
/// assert_eq!(queue.current_expect().unwrap().description(), "second");
/// assert!(matches!(queue.verify(), Err(Violation::Unsatisfied { index: 1, .. })));
/// ```
pub struct ExpectationQueue<H> {
    name: Cow<'static, str>,
    entries: Vec<Entry<H>>,
    cursor: usize,
    strictness: Strictness,
}

impl<H> fmt::Debug for ExpectationQueue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectationQueue")
            .field("name", &self.name)
            .field("strictness", &self.strictness)
            .field("cursor", &self.cursor)
            .field("expectations", &self.expectations().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<H> ExpectationQueue<H> {
    /// Create an empty queue. `name` identifies the queue in violation messages.
    pub fn new(name: impl Into<Cow<'static, str>>, strictness: Strictness) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            cursor: 0,
            strictness,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Number of registered expectations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current expectation.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Registered expectations in registration order.
    pub fn expectations(&self) -> impl Iterator<Item = &Expectation> {
        self.entries.iter().map(|entry| &entry.expectation)
    }

    /// Append an unsatisfied expectation to the end of the script.
    pub fn append_expectation(&mut self, description: impl Into<String>, handler: H) {
        let expectation = Expectation::new(description);
        tracing::debug!(
            queue = %self.name,
            index = self.entries.len(),
            description = %expectation.description(),
            "expectation registered"
        );
        self.entries.push(Entry {
            expectation,
            handler,
        });
    }

    /// Returns the expectation the next call should be matched against.
    ///
    /// If the expectation at the cursor is already satisfied the cursor
    /// first moves to the next one. Fails with [`Violation::Exhausted`]
    /// when there is no next one, leaving the cursor where it was.
    pub fn current_expect(&mut self) -> Result<&mut Expectation, Violation> {
        self.current_entry().map(|entry| &mut entry.expectation)
    }

    /// Returns `true` once the cursor is on the last expectation and that
    /// expectation is satisfied. An empty queue is satisfied.
    pub fn is_satisfied(&self) -> bool {
        match self.entries.last() {
            None => true,
            Some(last) => {
                self.cursor == self.entries.len() - 1 && last.expectation.is_satisfied()
            }
        }
    }

    /// Check that every expectation was satisfied, wherever the cursor is.
    ///
    /// Reports the first unsatisfied expectation in registration order.
    pub fn verify(&self) -> Result<(), Violation> {
        match self
            .entries
            .iter()
            .position(|entry| !entry.expectation.is_satisfied())
        {
            None => Ok(()),
            Some(index) => Err(Violation::Unsatisfied {
                queue: self.name.clone(),
                index,
                description: self.entries[index].expectation.description().to_owned(),
            }),
        }
    }

    /// Route one call to the current expectation's handler.
    ///
    /// A lenient queue that is fully satisfied swallows the call and returns
    /// `Ok(())`. Otherwise `invoke` runs with the current expectation and its
    /// handler, and its result is returned unchanged. Fails the test if the
    /// script is exhausted.
    pub(crate) fn dispatch<F>(&mut self, invoke: F) -> crate::Result
    where
        F: FnOnce(&mut Expectation, &mut H) -> crate::Result,
    {
        if self.strictness.is_lenient() && self.is_satisfied() {
            tracing::trace!(queue = %self.name, "script complete, call ignored");
            return Ok(());
        }

        if let Err(violation) = self.current_entry() {
            violation.raise();
        }
        let index = self.cursor;
        let Entry {
            expectation,
            handler,
        } = &mut self.entries[index];
        tracing::trace!(
            queue = %self.name,
            index,
            description = %expectation.description(),
            "call dispatched"
        );
        invoke(expectation, handler)
    }

    fn current_entry(&mut self) -> Result<&mut Entry<H>, Violation> {
        let Some(current) = self.entries.get(self.cursor) else {
            return Err(self.exhausted());
        };
        if current.expectation.is_satisfied() {
            let next = self.cursor + 1;
            if next == self.entries.len() {
                return Err(self.exhausted());
            }
            self.cursor = next;
        }
        Ok(&mut self.entries[self.cursor])
    }

    fn exhausted(&self) -> Violation {
        Violation::Exhausted {
            queue: self.name.clone(),
        }
    }
}
