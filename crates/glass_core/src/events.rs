//! Event types
//!
//! The subset of host events a glass widget consumes: pointer interaction,
//! native scroll notifications, and element lifecycle.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Pointer stream interrupted by the host (touch cancel, capture lost)
    pub const POINTER_CANCEL: EventType = 6;
    /// Native scroll offset changed (wheel, trackpad, keyboard or programmatic)
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// Structural or text mutation inside an observed element
    pub const MUTATION: EventType = 41;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// Host element identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ElementId(pub u64);

/// Host pointer identifier (one per mouse, pen or touch contact)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: ElementId,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position in client coordinates
    Pointer { pointer_id: PointerId, x: f32, y: f32 },
    Scroll { offset_x: f32, offset_y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: ElementId, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Create a pointer event
    pub fn pointer(
        event_type: EventType,
        target: ElementId,
        pointer_id: PointerId,
        x: f32,
        y: f32,
    ) -> Self {
        Self::new(event_type, target, EventData::Pointer { pointer_id, x, y })
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Pointer id and position, if this is a pointer event
    pub fn pointer_position(&self) -> Option<(PointerId, f32, f32)> {
        match self.data {
            EventData::Pointer { pointer_id, x, y } => Some((pointer_id, x, y)),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        use event_types::*;
        matches!(
            self.event_type,
            POINTER_DOWN
                | POINTER_UP
                | POINTER_MOVE
                | POINTER_ENTER
                | POINTER_LEAVE
                | POINTER_CANCEL
        )
    }
}

#[cfg(test)]
mod tests {
    use super::event_types::*;
    use super::*;

    #[test]
    fn test_pointer_event_position() {
        let event = Event::pointer(POINTER_MOVE, ElementId(7), PointerId(1), 12.0, 40.0);
        assert!(event.is_pointer());
        assert_eq!(event.pointer_position(), Some((PointerId(1), 12.0, 40.0)));
    }

    #[test]
    fn test_non_pointer_event_has_no_position() {
        let data = EventData::Scroll {
            offset_x: 0.0,
            offset_y: 10.0,
        };
        let event = Event::new(SCROLL, ElementId(7), data);
        assert!(!event.is_pointer());
        assert_eq!(event.pointer_position(), None);
    }

    #[test]
    fn test_stop_propagation() {
        let mut event = Event::new(POINTER_UP, ElementId(1), EventData::None).with_timestamp(42);
        assert!(!event.propagation_stopped);
        event.stop_propagation();
        assert!(event.propagation_stopped);
        assert_eq!(event.timestamp, 42);
    }
}
