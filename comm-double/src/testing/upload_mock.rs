use std::io::Read;

use crate::{
    FileInfo, Result,
    testing::{Expectation, ExpectationQueue, Strictness, Violation},
};

/// Handler for one scripted [`Communicator::upload`](crate::Communicator::upload) call.
///
/// Receives the current expectation, the destination path, the content
/// stream and the optional file metadata.
pub type UploadHandler =
    Box<dyn FnMut(&mut Expectation, &str, &mut dyn Read, Option<&FileInfo>) -> Result>;

/// Routes `upload` calls through an [`ExpectationQueue`] of [`UploadHandler`]s.
#[derive(Debug)]
pub struct UploadMock {
    queue: ExpectationQueue<UploadHandler>,
}

impl UploadMock {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            queue: ExpectationQueue::new("upload", strictness),
        }
    }

    /// Script the next `upload` call.
    pub fn expect<F>(&mut self, description: impl Into<String>, handler: F)
    where
        F: FnMut(&mut Expectation, &str, &mut dyn Read, Option<&FileInfo>) -> Result + 'static,
    {
        self.queue.append_expectation(description, Box::new(handler));
    }

    /// Hand the upload to the current expectation's handler and return its result.
    ///
    /// # Panics
    ///
    /// Panics with [`Violation::Exhausted`] if the queue is strict and every
    /// expectation is already satisfied.
    pub fn call(&mut self, dst: &str, contents: &mut dyn Read, info: Option<&FileInfo>) -> Result {
        self.queue
            .dispatch(|expect, handler| handler(expect, dst, contents, info))
    }

    pub fn queue(&self) -> &ExpectationQueue<UploadHandler> {
        &self.queue
    }

    pub fn verify(&self) -> std::result::Result<(), Violation> {
        self.queue.verify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_sees_destination_contents_and_metadata() {
        let mut mock = UploadMock::new(Strictness::Strict);
        mock.expect("upload inventory", |expect, dst, contents, info| {
            let mut body = String::new();
            contents.read_to_string(&mut body)?;
            assert_eq!(dst, "/tmp/inventory");
            assert_eq!(body, "[web]\nhost1\n");
            assert_eq!(info.map(FileInfo::name), Some("inventory"));
            expect.mark_satisfied();
            Ok(())
        });

        let body = b"[web]\nhost1\n";
        let info = FileInfo::new("inventory", body.len() as u64);
        mock.call("/tmp/inventory", &mut &body[..], Some(&info))
            .unwrap();
        assert_eq!(mock.verify(), Ok(()));
    }

    #[test]
    fn lenient_mock_ignores_extra_uploads() {
        let mut mock = UploadMock::new(Strictness::Lenient);
        mock.expect("first upload only", |expect, _, _, _| {
            expect.mark_satisfied();
            Ok(())
        });

        for _ in 0..3 {
            mock.call("/tmp/x", &mut std::io::empty(), None).unwrap();
        }
        assert_eq!(mock.verify(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "upload: all expectations already satisfied")]
    fn strict_mock_rejects_extra_upload() {
        let mut mock = UploadMock::new(Strictness::Strict);
        mock.expect("single upload", |expect, _, _, _| {
            expect.mark_satisfied();
            Ok(())
        });

        mock.call("/tmp/a", &mut std::io::empty(), None).unwrap();
        let _ = mock.call("/tmp/b", &mut std::io::empty(), None);
    }
}
