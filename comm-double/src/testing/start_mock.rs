use crate::{
    RemoteCmd, Result,
    testing::{Expectation, ExpectationQueue, Strictness, Violation},
};

/// Handler for one scripted [`Communicator::start`](crate::Communicator::start) call.
///
/// Receives the current expectation and the command. Mark the expectation
/// satisfied once the command matches; return an error to simulate a
/// transport failure.
pub type StartHandler = Box<dyn FnMut(&mut Expectation, &mut RemoteCmd) -> Result>;

/// Routes `start` calls through an [`ExpectationQueue`] of [`StartHandler`]s.
#[derive(Debug)]
pub struct StartMock {
    queue: ExpectationQueue<StartHandler>,
}

impl StartMock {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            queue: ExpectationQueue::new("start", strictness),
        }
    }

    /// Script the next `start` call.
    pub fn expect<F>(&mut self, description: impl Into<String>, handler: F)
    where
        F: FnMut(&mut Expectation, &mut RemoteCmd) -> Result + 'static,
    {
        self.queue.append_expectation(description, Box::new(handler));
    }

    /// Hand `cmd` to the current expectation's handler and return its result.
    ///
    /// # Panics
    ///
    /// Panics with [`Violation::Exhausted`] if the queue is strict and every
    /// expectation is already satisfied.
    pub fn call(&mut self, cmd: &mut RemoteCmd) -> Result {
        self.queue.dispatch(|expect, handler| handler(expect, cmd))
    }

    pub fn queue(&self) -> &ExpectationQueue<StartHandler> {
        &self.queue
    }

    pub fn verify(&self) -> std::result::Result<(), Violation> {
        self.queue.verify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn call_runs_handlers_in_order() {
        let mut mock = StartMock::new(Strictness::Strict);
        mock.expect("install ansible", |expect, cmd| {
            assert_eq!(cmd.command(), "apt-get install -y ansible");
            expect.mark_satisfied();
            Ok(())
        });
        mock.expect("check version", |expect, cmd| {
            assert_eq!(cmd.command(), "ansible --version");
            cmd.write_stdout("ansible 2.9.6");
            expect.mark_satisfied();
            Ok(())
        });

        mock.call(&mut RemoteCmd::new("apt-get install -y ansible"))
            .unwrap();
        let mut version = RemoteCmd::new("ansible --version");
        mock.call(&mut version).unwrap();

        assert_eq!(version.stdout(), b"ansible 2.9.6");
        assert_eq!(mock.verify(), Ok(()));
    }

    #[test]
    fn call_does_not_touch_exit_status() {
        let mut mock = StartMock::new(Strictness::Strict);
        mock.expect("anything", |expect, _| {
            expect.mark_satisfied();
            Ok(())
        });
        let mut cmd = RemoteCmd::new("true");
        mock.call(&mut cmd).unwrap();
        assert!(!cmd.exited());
    }

    #[test]
    fn unsatisfied_handler_receives_repeated_calls() {
        let mut mock = StartMock::new(Strictness::Strict);
        let mut attempts = 0;
        mock.expect("retry until the third attempt", move |expect, _| {
            attempts += 1;
            if attempts < 3 {
                return Err(Error::remote("connection refused"));
            }
            expect.mark_satisfied();
            Ok(())
        });

        let mut cmd = RemoteCmd::new("ping");
        assert!(mock.call(&mut cmd).is_err());
        assert!(mock.call(&mut cmd).is_err());
        assert_eq!(mock.call(&mut cmd), Ok(()));
        assert_eq!(mock.verify(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "start: all expectations already satisfied")]
    fn strict_call_without_expectations_panics() {
        let mut mock = StartMock::new(Strictness::Strict);
        let _ = mock.call(&mut RemoteCmd::new("whoami"));
    }
}
