//! Host View
//!
//! The editor never renders. It reports what changed through [`HostView`]
//! and the host draws however it likes. [`EventBus`] is a ready-made view
//! that turns the notifications into [`ViewEvent`]s on channels.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cursor::CaretKind;
use crate::layout::Rect;
use crate::syntax::StyledSpan;

/// Notifications from the editor to whatever draws it
pub trait HostView {
    /// Line `index` has new text or highlighting
    fn on_line_changed(
        &mut self,
        index: usize,
        text: &str,
        spans: &[StyledSpan],
        entry_in_comment: bool,
    );
    /// Line `index` no longer exists
    fn on_line_removed(&mut self, index: usize);
    /// A new line object is needed at `index`; its content follows as a change
    fn on_line_inserted(&mut self, index: usize);
    /// A caret moved to pixel position `(x, y)`
    fn on_caret_moved(&mut self, caret: CaretKind, x: f32, y: f32);
    /// Selection highlight rectangles, empty when nothing is selected
    fn on_selection_rects_changed(&mut self, rects: &[Rect]);
    /// The host should scroll `offset` into view
    fn on_scroll_hint(&mut self, offset: usize);
}

/// A view that ignores everything, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl HostView for NullView {
    fn on_line_changed(&mut self, _: usize, _: &str, _: &[StyledSpan], _: bool) {}
    fn on_line_removed(&mut self, _: usize) {}
    fn on_line_inserted(&mut self, _: usize) {}
    fn on_caret_moved(&mut self, _: CaretKind, _: f32, _: f32) {}
    fn on_selection_rects_changed(&mut self, _: &[Rect]) {}
    fn on_scroll_hint(&mut self, _: usize) {}
}

/// Notifications as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    LineChanged {
        index: usize,
        text: String,
        spans: Vec<StyledSpan>,
        entry_in_comment: bool,
    },
    LineRemoved {
        index: usize,
    },
    LineInserted {
        index: usize,
    },
    CaretMoved {
        caret: CaretKind,
        x: f32,
        y: f32,
    },
    SelectionRectsChanged {
        rects: Vec<Rect>,
    },
    ScrollHint {
        offset: usize,
    },
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<ViewEvent>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<ViewEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<ViewEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything queued so far
    pub fn drain(&self) -> Vec<ViewEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Broadcasts view notifications to any number of subscribers
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<ViewEvent>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers, dropping the ones that hung up
    pub fn emit(&self, event: ViewEvent) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());

        trace!("Event {:?} delivered to {} subscribers", event, subscribers.len());
        subscribers.len()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// The host keeps a clone of the `Arc` to subscribe with
impl HostView for Arc<EventBus> {
    fn on_line_changed(
        &mut self,
        index: usize,
        text: &str,
        spans: &[StyledSpan],
        entry_in_comment: bool,
    ) {
        self.emit(ViewEvent::LineChanged {
            index,
            text: text.to_string(),
            spans: spans.to_vec(),
            entry_in_comment,
        });
    }

    fn on_line_removed(&mut self, index: usize) {
        self.emit(ViewEvent::LineRemoved { index });
    }

    fn on_line_inserted(&mut self, index: usize) {
        self.emit(ViewEvent::LineInserted { index });
    }

    fn on_caret_moved(&mut self, caret: CaretKind, x: f32, y: f32) {
        self.emit(ViewEvent::CaretMoved { caret, x, y });
    }

    fn on_selection_rects_changed(&mut self, rects: &[Rect]) {
        self.emit(ViewEvent::SelectionRectsChanged {
            rects: rects.to_vec(),
        });
    }

    fn on_scroll_hint(&mut self, offset: usize) {
        self.emit(ViewEvent::ScrollHint { offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        let sub1 = bus.subscribe();
        let sub2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let delivered = bus.emit(ViewEvent::ScrollHint { offset: 3 });
        assert_eq!(delivered, 2);

        assert_eq!(sub1.try_recv().ok(), Some(ViewEvent::ScrollHint { offset: 3 }));
        assert!(sub2.try_recv().is_ok());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.emit(ViewEvent::LineRemoved { index: 0 }), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 1);
    }

    #[test]
    fn test_host_view_impl_emits_events() {
        let mut bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();

        bus.on_line_inserted(2);
        bus.on_caret_moved(CaretKind::Anchor, 42.0, 16.0);
        bus.on_selection_rects_changed(&[]);

        assert_eq!(
            sub.drain(),
            vec![
                ViewEvent::LineInserted { index: 2 },
                ViewEvent::CaretMoved {
                    caret: CaretKind::Anchor,
                    x: 42.0,
                    y: 16.0
                },
                ViewEvent::SelectionRectsChanged { rects: vec![] },
            ]
        );
    }

}
