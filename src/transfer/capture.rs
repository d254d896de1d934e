use std::cell::RefCell;
use std::rc::Rc;

/// Shared byte buffer collecting what handles write.
///
/// Clones share the same storage, so a test keeps one clone and hands
/// sinks made from it to handles.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> impl FnMut(&[u8]) + 'static {
        let bytes = self.bytes.clone();
        move |chunk: &[u8]| bytes.borrow_mut().extend_from_slice(chunk)
    }

    pub fn contents(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.bytes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}
