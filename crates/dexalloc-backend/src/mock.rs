use dexalloc_common::message::Messages;
use dexalloc_common::ssa::Method;
use dexalloc_common::Driver;

/// A driver which fails the test on any diagnostic.
#[derive(Debug, Default)]
pub struct MockDriver;

impl Driver for MockDriver {
    fn report(&mut self, messages: Messages) {
        assert!(messages.is_empty(), "unexpected messages: {messages:?}");
    }
}

/// Parse a listing holding exactly one method.
pub fn method(src: &str) -> Method {
    let mut methods = dexalloc_frontend::parse_listing(&mut MockDriver, src, 0);
    assert_eq!(1, methods.len());
    methods.remove(0)
}
