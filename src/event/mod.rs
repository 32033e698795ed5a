mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::EditorEvent;

/// Receives change notifications; re-read whatever state you render on each call
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent),
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
