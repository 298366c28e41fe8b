#![cfg_attr(docsrs, feature(doc_cfg))]
//! # comm-double
//!
//! An ordered-expectation test double for a command/file transport.
//!
//! Components that provision a remote machine talk to it through a
//! [`Communicator`]: they start commands and upload files. `comm-double`
//! lets a test script the exact sequence of calls such a component must
//! make, check each call's arguments in a handler, and verify at the end
//! that nothing was skipped.
//!
//! ## Quick Start
//!
//! ```rust
//! use comm_double::{Communicator, RemoteCmd, testing::CommunicatorDouble};
//!
//! let mut comm = CommunicatorDouble::new();
//! comm.expect_start("run the playbook", |expect, cmd| {
//!     assert!(cmd.command().starts_with("ansible-playbook"));
//!     expect.mark_satisfied();
//!     Ok(())
//! });
//!
//! let mut cmd = RemoteCmd::new("ansible-playbook site.yml");
//! comm.start(&mut cmd).unwrap();
//! assert_eq!(cmd.exit_status(), Some(0));
//!
//! comm.verify();
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Communicator`] | The transport contract a component under test depends on |
//! | [`RemoteCmd`] | A command to run remotely, with output buffers and exit status |
//! | [`FileInfo`] | Metadata accompanying an upload |
//! | [`Error`] | Transport failures, real or simulated by a handler |
//! | [`testing::CommunicatorDouble`] | The scripted `Communicator` used in tests |
//! | [`testing::ExpectationQueue`] | Ordered expectations with a cursor |
//! | [`testing::Expectation`] | One described, satisfiable step of the script |
//!
//! ## Strict and lenient queues
//!
//! Every call shape has its own queue. A [`Strict`](testing::Strictness::Strict)
//! queue fails the test on any call beyond the registered script. A
//! [`Lenient`](testing::Strictness::Lenient) queue (the default) accepts and
//! ignores calls once its last expectation is satisfied. See
//! [`testing::DoubleConfig`].
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`FileInfo`] and the
//!   configuration types

mod communicator;
mod error;
mod file_info;
mod remote_cmd;

pub mod testing;

pub use communicator::Communicator;
pub use error::Error;
pub use file_info::FileInfo;
pub use remote_cmd::RemoteCmd;

/// Convenience alias for `Result<T, comm_double::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
