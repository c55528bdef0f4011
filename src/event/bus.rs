use std::cell::RefCell;

use crate::event::{EventHandler, SessionEvent};

/// Fans session events out to every subscribed handler, in subscription order.
///
/// Lives on the UI thread next to the controller; handlers are borrowed mutably
/// for the duration of one `emit`, so a handler must not emit back into the bus.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus(<{} handlers>)", self.handler_count())
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, event: SessionEvent) {
        let mut handlers = self.handlers.borrow_mut();
        if handlers.is_empty() {
            log::trace!("dropping {:?}, no subscribers", event);
            return;
        }
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }
}
