use std::fmt;
use std::rc::Rc;

use super::fixture::PayloadFixture;
use crate::{MockError, Result};

/// Write callback receiving the bytes of a performed transfer.
pub type WriteSink = Box<dyn FnMut(&[u8])>;

/// Position of a handle relative to a [`TransferPool`](super::TransferPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleState {
    Unregistered,
    Active,
    Removed,
}

/// A single simulated resource fetch.
///
/// The handle serves one payload from its fixture per `perform`, delivering
/// it in one piece to the configured write sink.
pub struct TransferHandle {
    fixture: Rc<PayloadFixture>,
    selected: Option<usize>,
    target: Option<String>,
    sink: Option<WriteSink>,
    state: HandleState,
    performed: usize,
}

impl TransferHandle {
    pub fn new(fixture: Rc<PayloadFixture>) -> Self {
        Self {
            fixture,
            selected: None,
            target: None,
            sink: None,
            state: HandleState::Unregistered,
            performed: 0,
        }
    }

    /// Route the bytes of the next performed transfer to `sink`
    pub fn configure_output(&mut self, sink: impl FnMut(&[u8]) + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Point the handle at the payload named in `identifier`.
    ///
    /// An identifier naming no known payload keeps the previous selection.
    pub fn select_target(&mut self, identifier: &str) -> Option<usize> {
        match self.fixture.lookup(identifier) {
            Some(index) => {
                log::trace!("{} resolved to payload {}", identifier, index);
                self.selected = Some(index);
                self.target = Some(identifier.to_owned());
                Some(index)
            }
            None => {
                log::warn!(
                    "{} matches no known payload, keeping {:?}",
                    identifier,
                    self.selected
                );
                None
            }
        }
    }

    /// Deliver the selected payload to the sink, returning its length
    pub fn perform(&mut self) -> Result<usize> {
        let index = self.selected.ok_or_else(|| {
            MockError::Unconfigured("no target selected".to_owned())
        })?;
        let payload = self.fixture.get(index).ok_or_else(|| {
            MockError::Unconfigured(format!(
                "payload index {} is out of range",
                index
            ))
        })?;
        let sink = self.sink.as_mut().ok_or_else(|| {
            MockError::Unconfigured("no output sink".to_owned())
        })?;

        sink(payload.data.as_slice());
        self.performed += 1;

        log::debug!(
            "delivered {} bytes of {}",
            payload.data.len(),
            payload.name
        );
        Ok(payload.data.len())
    }

    /// Release the sink
    pub fn close(&mut self) {
        self.sink = None;
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == HandleState::Active
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Identifier of the last successful `select_target`
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn perform_count(&self) -> usize {
        self.performed
    }

    pub(super) fn set_state(&mut self, state: HandleState) {
        self.state = state;
    }
}

impl fmt::Debug for TransferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferHandle")
            .field("selected", &self.selected)
            .field("target", &self.target)
            .field("has_sink", &self.sink.is_some())
            .field("state", &self.state)
            .field("performed", &self.performed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso;
    use crate::transfer::CaptureBuffer;

    fn handle() -> TransferHandle {
        TransferHandle::new(iso::shared_fixture())
    }

    #[test]
    fn delivers_selected_payload() {
        let buffer = CaptureBuffer::new();
        let mut handle = handle();
        handle.configure_output(buffer.sink());

        assert_eq!(handle.select_target("http://example/test2.iso"), Some(2));
        assert_eq!(handle.perform().unwrap(), iso::TEST2_ISO_CONTENT.len());
        assert_eq!(buffer.as_string(), "This is another file.\n");
        assert_eq!(handle.perform_count(), 1);
        assert_eq!(handle.target(), Some("http://example/test2.iso"));
    }

    #[test]
    fn unknown_target_keeps_previous_selection() {
        let mut handle = handle();
        handle.select_target("http://example/test3.iso");
        assert_eq!(handle.select_target("http://example/other.rpm"), None);
        assert_eq!(handle.selected(), Some(3));
    }

    #[test]
    fn perform_requires_target() {
        let mut handle = handle();
        handle.configure_output(|_| {});
        assert!(matches!(
            handle.perform(),
            Err(MockError::Unconfigured(_))
        ));
    }

    #[test]
    fn perform_requires_sink() {
        let mut handle = handle();
        handle.select_target("MANIFEST");
        assert!(matches!(
            handle.perform(),
            Err(MockError::Unconfigured(_))
        ));
    }

    #[test]
    fn close_releases_sink() {
        let buffer = CaptureBuffer::new();
        let mut handle = handle();
        handle.configure_output(buffer.sink());
        handle.select_target("test.iso");
        handle.perform().unwrap();
        handle.close();

        assert!(handle.perform().is_err());
        assert_eq!(buffer.as_string(), iso::TEST_ISO_CONTENT);
    }

    #[test]
    fn fresh_handle_is_unregistered() {
        let handle = handle();
        assert_eq!(handle.state(), HandleState::Unregistered);
        assert!(!handle.is_active());
        assert_eq!(handle.selected(), None);
    }
}
