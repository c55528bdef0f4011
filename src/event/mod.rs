mod bus;
mod events;

pub use bus::EventBus;
pub use events::*;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &SessionEvent);
}

/// Writes every session event to the log at debug level
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &SessionEvent) {
        log::debug!("session event: {:?}", event);
    }
}
