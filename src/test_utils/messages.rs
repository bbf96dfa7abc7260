//! Recording message surface for assertions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::output::MessageSurface;

#[derive(Debug, Default)]
struct Recorded {
    errors: Vec<String>,
    notices: Vec<String>,
}

/// Message surface spy. Clones share the same recording, so a test can hand
/// one clone to the client and keep another for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingMessages {
    recorded: Rc<RefCell<Recorded>>,
}

impl RecordingMessages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every error text shown so far, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.recorded.borrow().errors.clone()
    }

    /// Every transient notice shown so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.recorded.borrow().notices.clone()
    }
}

impl MessageSurface for RecordingMessages {
    fn show_error(&self, text: &str) {
        self.recorded.borrow_mut().errors.push(text.to_string());
    }

    fn show_transient_notice(&self, text: &str) {
        self.recorded.borrow_mut().notices.push(text.to_string());
    }
}
