use std::io::{Read, Write};

use crate::{
    Communicator, FileInfo, RemoteCmd, Result,
    testing::{DoubleConfig, Expectation, StartMock, Strictness, UploadMock, Violation},
};

/// A [`Communicator`] that replays a scripted sequence of calls.
///
/// `start` and `upload` calls are matched, in order, against the
/// expectations registered with [`expect_start`](Self::expect_start) and
/// [`expect_upload`](Self::expect_upload). The two call shapes are scripted
/// independently; ordering is enforced within each one.
///
/// `upload_dir`, `download` and `download_dir` are not scripted and always
/// succeed.
///
/// Commands always complete synchronously: after the `start` handler runs,
/// a command that has not exited is marked exited with status 0. A status
/// set by the handler is kept.
///
/// Call [`verify`](Self::verify) at the end of the test.
///
/// # Example
///
/// ```
/// use comm_double::{Communicator, Error, RemoteCmd, testing::CommunicatorDouble};
///
/// let mut comm = CommunicatorDouble::new();
/// comm.expect_start("first attempt loses the connection", |expect, _| {
///     expect.mark_satisfied();
///     Err(Error::remote("connection reset"))
/// });
/// comm.expect_start("retry fails the playbook", |expect, cmd| {
///     cmd.set_exited(2);
///     expect.mark_satisfied();
///     Ok(())
/// });
///
/// let mut cmd = RemoteCmd::new("ansible-playbook site.yml");
/// assert!(comm.start(&mut cmd).is_err());
///
/// let mut retry = RemoteCmd::new("ansible-playbook site.yml");
/// comm.start(&mut retry).unwrap();
/// assert_eq!(retry.exit_status(), Some(2));
///
/// comm.verify();
/// ```
#[derive(Debug)]
pub struct CommunicatorDouble {
    start: StartMock,
    upload: UploadMock,
}

impl Default for CommunicatorDouble {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunicatorDouble {
    /// Create a double with lenient queues.
    pub fn new() -> Self {
        Self::with_config(DoubleConfig::default())
    }

    /// Create a double whose queues reject every unscripted call.
    pub fn strict() -> Self {
        Self::with_config(DoubleConfig::default().with_strictness(Strictness::Strict))
    }

    pub fn with_config(config: DoubleConfig) -> Self {
        Self {
            start: StartMock::new(config.start_strictness()),
            upload: UploadMock::new(config.upload_strictness()),
        }
    }

    /// Script the next [`start`](Communicator::start) call.
    pub fn expect_start<F>(&mut self, description: impl Into<String>, handler: F)
    where
        F: FnMut(&mut Expectation, &mut RemoteCmd) -> Result + 'static,
    {
        self.start.expect(description, handler);
    }

    /// Script the next [`upload`](Communicator::upload) call.
    pub fn expect_upload<F>(&mut self, description: impl Into<String>, handler: F)
    where
        F: FnMut(&mut Expectation, &str, &mut dyn Read, Option<&FileInfo>) -> Result + 'static,
    {
        self.upload.expect(description, handler);
    }

    pub fn start_mock(&self) -> &StartMock {
        &self.start
    }

    pub fn upload_mock(&self) -> &UploadMock {
        &self.upload
    }

    /// Fail the test if any scripted call was not satisfied.
    ///
    /// # Panics
    ///
    /// Panics with the first [`Violation`] reported by [`try_verify`](Self::try_verify).
    pub fn verify(&self) {
        if let Err(violation) = self.try_verify() {
            violation.raise();
        }
    }

    /// Check every queue, `start` first, and return the first unmet expectation.
    pub fn try_verify(&self) -> std::result::Result<(), Violation> {
        self.start.verify()?;
        self.upload.verify()
    }
}

impl Communicator for CommunicatorDouble {
    fn start(&mut self, cmd: &mut RemoteCmd) -> Result {
        let result = self.start.call(cmd);
        if !cmd.exited() {
            tracing::debug!(command = %cmd, "forcing exit status 0");
            cmd.set_exited(0);
        }
        result
    }

    fn upload(&mut self, dst: &str, contents: &mut dyn Read, info: Option<&FileInfo>) -> Result {
        self.upload.call(dst, contents, info)
    }

    fn upload_dir(&mut self, dst: &str, src: &str, _exclude: &[String]) -> Result {
        tracing::trace!(dst, src, "upload_dir ignored");
        Ok(())
    }

    fn download(&mut self, src: &str, _dst: &mut dyn Write) -> Result {
        tracing::trace!(src, "download ignored");
        Ok(())
    }

    fn download_dir(&mut self, src: &str, dst: &str, _exclude: &[String]) -> Result {
        tracing::trace!(src, dst, "download_dir ignored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::Error;

    /// A minimal provisioner: uploads a playbook, then runs it.
    fn provision(comm: &mut impl Communicator, playbook: &str) -> Result<i32> {
        let info = FileInfo::new("site.yml", playbook.len() as u64);
        comm.upload("/tmp/provision/site.yml", &mut playbook.as_bytes(), Some(&info))?;
        let mut cmd = RemoteCmd::new("ansible-playbook /tmp/provision/site.yml");
        comm.start(&mut cmd)?;
        Ok(cmd.exit_status().unwrap_or(-1))
    }

    fn satisfied_start(expect: &mut Expectation, _: &mut RemoteCmd) -> Result {
        expect.mark_satisfied();
        Ok(())
    }

    fn satisfied_upload(
        expect: &mut Expectation,
        _: &str,
        _: &mut dyn Read,
        _: Option<&FileInfo>,
    ) -> Result {
        expect.mark_satisfied();
        Ok(())
    }

    // ==================== start ====================

    #[test]
    fn start_forces_exit_status_zero() {
        let mut comm = CommunicatorDouble::strict();
        comm.expect_start("run once", satisfied_start);

        let mut cmd = RemoteCmd::new("true");
        comm.start(&mut cmd).unwrap();

        assert!(cmd.exited());
        assert_eq!(cmd.exit_status(), Some(0));
        comm.verify();
    }

    #[test]
    fn start_keeps_exit_status_set_by_handler() {
        let mut comm = CommunicatorDouble::strict();
        comm.expect_start("command fails", |expect, cmd| {
            cmd.set_exited(3);
            expect.mark_satisfied();
            Ok(())
        });

        let mut cmd = RemoteCmd::new("false");
        comm.start(&mut cmd).unwrap();
        assert_eq!(cmd.exit_status(), Some(3));
    }

    #[test]
    fn start_forces_exit_even_when_handler_errors() {
        let mut comm = CommunicatorDouble::new();
        comm.expect_start("transport drops", |expect, _| {
            expect.mark_satisfied();
            Err(Error::remote("broken pipe"))
        });

        let mut cmd = RemoteCmd::new("uptime");
        assert_eq!(comm.start(&mut cmd), Err(Error::remote("broken pipe")));
        assert_eq!(cmd.exit_status(), Some(0));
    }

    #[test]
    fn lenient_start_after_script_still_completes_command() {
        let mut comm = CommunicatorDouble::new();
        let mut cmd = RemoteCmd::new("unscripted");
        comm.start(&mut cmd).unwrap();
        assert_eq!(cmd.exit_status(), Some(0));
        comm.verify();
    }

    #[test]
    #[should_panic(expected = "all expectations already satisfied")]
    fn strict_start_without_expectations_fails() {
        let mut comm = CommunicatorDouble::strict();
        let _ = comm.start(&mut RemoteCmd::new("whoami"));
    }

    // ==================== upload ====================

    #[test]
    #[should_panic(expected = "upload: unsatisfied expectation #1: upload inventory")]
    fn verify_reports_second_upload_when_only_one_made() {
        let mut comm = CommunicatorDouble::new();
        comm.expect_upload("upload playbook", satisfied_upload);
        comm.expect_upload("upload inventory", satisfied_upload);

        comm.upload("/tmp/site.yml", &mut std::io::empty(), None)
            .unwrap();
        comm.verify();
    }

    #[test]
    fn handler_error_is_returned_and_does_not_fail_verify() {
        let mut comm = CommunicatorDouble::strict();
        comm.expect_upload("disk is full", |expect, _, _, _| {
            expect.mark_satisfied();
            Err(Error::remote("no space left on device"))
        });

        let result = comm.upload("/tmp/big", &mut std::io::empty(), None);
        assert_eq!(result, Err(Error::remote("no space left on device")));
        assert_eq!(comm.try_verify(), Ok(()));
    }

    // ==================== pass-through ====================

    #[test]
    fn unscripted_methods_always_succeed() {
        let mut comm = CommunicatorDouble::strict();
        let mut sink = Vec::new();

        assert_eq!(comm.upload_dir("/etc/ansible", "roles", &[]), Ok(()));
        assert_eq!(comm.download("/var/log/ansible.log", &mut sink), Ok(()));
        assert_eq!(
            comm.download_dir("/etc", "backup", &["*.tmp".to_owned()]),
            Ok(())
        );

        assert!(sink.is_empty());
        comm.verify();
    }

    // ==================== verify ====================

    #[test]
    fn try_verify_checks_start_queue_first() {
        let mut comm = CommunicatorDouble::new();
        comm.expect_upload("never uploaded", satisfied_upload);
        comm.expect_start("never started", satisfied_start);

        let violation = comm.try_verify().unwrap_err();
        assert_eq!(violation.queue(), "start");
    }

    #[test]
    fn queues_are_ordered_independently() {
        let mut comm = CommunicatorDouble::strict();
        comm.expect_start("run", satisfied_start);
        comm.expect_upload("upload", satisfied_upload);

        comm.start(&mut RemoteCmd::new("run")).unwrap();
        comm.upload("/tmp/f", &mut std::io::empty(), None).unwrap();

        assert!(comm.start_mock().queue().is_satisfied());
        assert!(comm.upload_mock().queue().is_satisfied());
        comm.verify();
    }

    // ==================== component under test ====================

    #[test]
    fn provisioner_uploads_then_runs_playbook() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut comm = CommunicatorDouble::strict();

        let log = order.clone();
        comm.expect_upload("playbook is uploaded", move |expect, dst, contents, info| {
            let mut body = String::new();
            contents.read_to_string(&mut body)?;
            assert_eq!(dst, "/tmp/provision/site.yml");
            assert_eq!(body, "- hosts: all\n");
            assert_eq!(info.map(FileInfo::size), Some(body.len() as u64));
            log.borrow_mut().push("upload");
            expect.mark_satisfied();
            Ok(())
        });

        let log = order.clone();
        comm.expect_start("playbook is executed", move |expect, cmd| {
            assert_eq!(cmd.command(), "ansible-playbook /tmp/provision/site.yml");
            log.borrow_mut().push("start");
            expect.mark_satisfied();
            Ok(())
        });

        assert_eq!(provision(&mut comm, "- hosts: all\n"), Ok(0));
        assert_eq!(*order.borrow(), ["upload", "start"]);
        comm.verify();
    }

    #[test]
    fn provisioner_stops_when_upload_fails() {
        let mut comm = CommunicatorDouble::strict();
        comm.expect_upload("upload is refused", |expect, _, _, _| {
            expect.mark_satisfied();
            Err(Error::remote("permission denied"))
        });

        assert_eq!(
            provision(&mut comm, "- hosts: all\n"),
            Err(Error::remote("permission denied"))
        );
        comm.verify();
    }
}
