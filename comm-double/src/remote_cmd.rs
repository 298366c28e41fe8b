use std::fmt;

/// A command to be executed on the remote side of a [`Communicator`](crate::Communicator).
///
/// The caller builds a `RemoteCmd`, hands it to
/// [`Communicator::start`](crate::Communicator::start), and reads the
/// exit status and captured output afterwards. A communicator (or a test
/// handler standing in for one) fills the output buffers and calls
/// [`set_exited`](Self::set_exited) once the command has finished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteCmd {
    command: String,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_status: Option<i32>,
}

impl RemoteCmd {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// The full command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns `true` once an exit status has been recorded.
    pub fn exited(&self) -> bool {
        self.exit_status.is_some()
    }

    /// The recorded exit status, or `None` while the command is still running.
    pub fn exit_status(&self) -> Option<i32> {
        self.exit_status
    }

    /// Mark the command as finished with the given exit status.
    pub fn set_exited(&mut self, status: i32) {
        self.exit_status = Some(status);
    }

    pub fn write_stdout(&mut self, bytes: impl AsRef<[u8]>) {
        self.stdout.extend_from_slice(bytes.as_ref());
    }

    pub fn write_stderr(&mut self, bytes: impl AsRef<[u8]>) {
        self.stderr.extend_from_slice(bytes.as_ref());
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }
}

impl fmt::Display for RemoteCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_command_has_not_exited() {
        let cmd = RemoteCmd::new("uname -a");
        assert_eq!(cmd.command(), "uname -a");
        assert!(!cmd.exited());
        assert_eq!(cmd.exit_status(), None);
    }

    #[test]
    fn set_exited_records_status() {
        let mut cmd = RemoteCmd::new("false");
        cmd.set_exited(1);
        assert!(cmd.exited());
        assert_eq!(cmd.exit_status(), Some(1));
    }

    #[test]
    fn output_buffers_accumulate() {
        let mut cmd = RemoteCmd::new("echo");
        cmd.write_stdout("hello ");
        cmd.write_stdout(b"world");
        cmd.write_stderr("warning");
        assert_eq!(cmd.stdout(), b"hello world");
        assert_eq!(cmd.stderr(), b"warning");
    }
}
