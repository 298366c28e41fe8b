//! Scripted test double for [`Communicator`](crate::Communicator).
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//!
//! use comm_double::{Communicator, FileInfo, RemoteCmd, testing::CommunicatorDouble};
//!
//! let mut comm = CommunicatorDouble::strict();
//! comm.expect_upload("upload the playbook", |expect, dst, contents, _info| {
//!     let mut body = String::new();
//!     contents.read_to_string(&mut body)?;
//!     assert_eq!(dst, "/tmp/site.yml");
//!     assert!(body.contains("hosts: all"));
//!     expect.mark_satisfied();
//!     Ok(())
//! });
//! comm.expect_start("run the playbook", |expect, cmd| {
//!     assert_eq!(cmd.command(), "ansible-playbook /tmp/site.yml");
//!     expect.mark_satisfied();
//!     Ok(())
//! });
//!
//! // The component under test would make these calls.
//! let playbook = b"- hosts: all\n";
//! let info = FileInfo::new("site.yml", playbook.len() as u64);
//! comm.upload("/tmp/site.yml", &mut &playbook[..], Some(&info)).unwrap();
//! comm.start(&mut RemoteCmd::new("ansible-playbook /tmp/site.yml")).unwrap();
//!
//! comm.verify();
//! ```
//!
//! # Note
//!
//! Handlers are boxed closures without a `Send` bound, so queues and the
//! double are `!Send` and `!Sync`. Use one double per test, on the test's
//! own thread.

mod communicator_double;
mod double_config;
mod expectation;
mod expectation_queue;
mod start_mock;
mod strictness;
mod upload_mock;
mod violation;

pub use communicator_double::CommunicatorDouble;
pub use double_config::DoubleConfig;
pub use expectation::Expectation;
pub use expectation_queue::ExpectationQueue;
pub use start_mock::{StartHandler, StartMock};
pub use strictness::Strictness;
pub use upload_mock::{UploadHandler, UploadMock};
pub use violation::Violation;
