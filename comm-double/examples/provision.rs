//! Provisioner Example - Scripted Communicator Demonstration
//!
//! A small local-Ansible style provisioner stages a playbook on a remote
//! machine and runs it. The provisioner only knows about the `Communicator`
//! trait; here it is driven against a `CommunicatorDouble` that scripts:
//!
//! - **mkdir**: the staging directory is created
//! - **upload**: the playbook is copied into the staging directory
//! - **ansible-playbook**: the playbook is executed and exits cleanly
//!
//! Run with `cargo run --example provision` to see the double's trace output.

use std::io::Read;

use comm_double::{Communicator, Error, FileInfo, RemoteCmd, Result, testing::CommunicatorDouble};

// ============================================================================
// Component under test
// ============================================================================

struct Provisioner {
    staging_dir: String,
    playbook_name: String,
    playbook: String,
}

impl Provisioner {
    fn remote_playbook(&self) -> String {
        format!("{}/{}", self.staging_dir, self.playbook_name)
    }

    fn provision(&self, comm: &mut impl Communicator) -> Result {
        self.run(comm, format!("mkdir -p '{}'", self.staging_dir))?;

        let info = FileInfo::new(&self.playbook_name, self.playbook.len() as u64);
        comm.upload(
            &self.remote_playbook(),
            &mut self.playbook.as_bytes(),
            Some(&info),
        )?;

        self.run(
            comm,
            format!(
                "cd {} && ansible-playbook {} -c local -i 127.0.0.1,",
                self.staging_dir,
                self.remote_playbook()
            ),
        )
    }

    fn run(&self, comm: &mut impl Communicator, command: String) -> Result {
        let mut cmd = RemoteCmd::new(command);
        comm.start(&mut cmd)?;
        match cmd.exit_status() {
            Some(0) => Ok(()),
            status => Err(Error::remote(format!(
                "'{}' exited with {:?}: {}",
                cmd.command(),
                status,
                String::from_utf8_lossy(cmd.stderr())
            ))),
        }
    }
}

// ============================================================================
// Script
// ============================================================================

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let provisioner = Provisioner {
        staging_dir: "/tmp/packer-provisioner-ansible-local".into(),
        playbook_name: "site.yml".into(),
        playbook: "- hosts: all\n  tasks:\n    - ping:\n".into(),
    };

    let mut comm = CommunicatorDouble::strict();
    comm.expect_start("staging directory is created", |expect, cmd| {
        assert!(cmd.command().starts_with("mkdir -p"));
        expect.mark_satisfied();
        Ok(())
    });
    comm.expect_upload("playbook is uploaded", |expect, dst, contents, info| {
        let mut body = String::new();
        contents.read_to_string(&mut body)?;
        assert!(dst.ends_with("/site.yml"));
        assert_eq!(info.map(FileInfo::size), Some(body.len() as u64));
        expect.mark_satisfied();
        Ok(())
    });
    comm.expect_start("playbook is executed", |expect, cmd| {
        assert!(cmd.command().contains("ansible-playbook"));
        cmd.write_stdout("PLAY RECAP: ok=1 changed=0 failed=0\n");
        expect.mark_satisfied();
        Ok(())
    });

    provisioner.provision(&mut comm)?;
    comm.verify();

    println!("provisioner made every scripted call, in order");
    Ok(())
}
