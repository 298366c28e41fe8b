use std::io::{Read, Write};

use crate::{FileInfo, RemoteCmd, Result};

/// Transport used to run commands and move files on a remote machine.
///
/// A provisioner depends on a `Communicator` rather than on SSH, WinRM or a
/// container runtime directly. Tests substitute
/// [`CommunicatorDouble`](crate::testing::CommunicatorDouble).
///
/// # Commands
///
/// - [`start`](Self::start) - Run a command; its exit status is recorded on the [`RemoteCmd`]
///
/// # Files
///
/// - [`upload`](Self::upload) / [`upload_dir`](Self::upload_dir) - Copy to the remote side
/// - [`download`](Self::download) / [`download_dir`](Self::download_dir) - Copy back
///
/// Every method returns [`Error`](crate::Error) when the transport itself fails.
/// A command that runs and exits non-zero is not a transport failure; callers
/// inspect [`RemoteCmd::exit_status`] for that.
pub trait Communicator {
    /// Run `cmd` on the remote machine.
    ///
    /// Implementations record the exit status with [`RemoteCmd::set_exited`]
    /// and may append to the command's output buffers.
    fn start(&mut self, cmd: &mut RemoteCmd) -> Result;

    /// Write everything read from `contents` to the remote path `dst`.
    fn upload(&mut self, dst: &str, contents: &mut dyn Read, info: Option<&FileInfo>) -> Result;

    /// Recursively copy the local directory `src` to `dst`, skipping `exclude` patterns.
    fn upload_dir(&mut self, dst: &str, src: &str, exclude: &[String]) -> Result;

    /// Stream the remote file `src` into `dst`.
    fn download(&mut self, src: &str, dst: &mut dyn Write) -> Result;

    /// Recursively copy the remote directory `src` to the local path `dst`.
    fn download_dir(&mut self, src: &str, dst: &str, exclude: &[String]) -> Result;
}
