use std::cell::{Cell, RefCell};
use std::fmt;

use crate::event::{EditorEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to detach that listener again
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Fans editor change notifications out to whoever renders the surface.
///
/// Listeners run synchronously inside `emit`, oldest subscription first, and
/// must not subscribe, unsubscribe or emit from inside `handle_event`.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(SubscriptionId, Box<dyn EventHandler>)>>,
    next_id: Cell<u64>,
}

// Listeners belong to the surface that registered them; a copy starts detached
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, handler));
        id
    }

    /// Detach a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener, _)| *listener != id);
        listeners.len() != before
    }

    pub fn emit(&self, event: EditorEvent) {
        log::trace!("Editor event: {:?}", event);
        for (_, handler) in self.listeners.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder(seen: &Rc<RefCell<Vec<EditorEvent>>>) -> Box<dyn EventHandler> {
        let sink = Rc::clone(seen);
        Box::new(move |event: &EditorEvent| sink.borrow_mut().push(event.clone()))
    }

    #[test]
    fn test_listeners_see_events_in_order() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(recorder(&seen));

        bus.emit(EditorEvent::BrushChanged);
        bus.emit(EditorEvent::ContoursChanged { count: 2 });

        assert_eq!(
            *seen.borrow(),
            vec![EditorEvent::BrushChanged, EditorEvent::ContoursChanged { count: 2 }]
        );
    }

    #[test]
    fn test_unsubscribed_listener_stops_hearing() {
        let bus = EventBus::new();
        let kept = Rc::new(RefCell::new(Vec::new()));
        let dropped = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(recorder(&kept));
        let id = bus.subscribe(recorder(&dropped));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(EditorEvent::BrushChanged);

        assert_eq!(kept.borrow().len(), 1);
        assert!(dropped.borrow().is_empty());
    }

    #[test]
    fn test_clone_starts_detached() {
        let bus = EventBus::new();
        bus.subscribe(Box::new(|_: &EditorEvent| {}));
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.clone().listener_count(), 0);
    }
}
