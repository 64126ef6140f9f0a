use dexalloc_common::message::Messages;
use dexalloc_common::Driver;

/// A driver which keeps every reported message around for inspection.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub messages: Messages,
}

impl Driver for MockDriver {
    fn report(&mut self, messages: Messages) {
        self.messages.merge(messages);
    }
}
