//! Thumb drag controller
//!
//! Each axis runs its own `Idle -> Dragging -> Idle` state machine. A session
//! remembers where the pointer and the content were when the drag began,
//! plus the frozen [`DragMapping`]; every move is applied relative to that
//! anchor, so rounding never accumulates across moves.

use glass_core::events::event_types::*;
use glass_core::{Axis, EventType, PointerId, StateMachine, StateTransitions};
use smallvec::SmallVec;

use crate::geometry::DragMapping;

/// Drag interaction state for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for DragState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (DragState::Idle, POINTER_DOWN) => Some(DragState::Dragging),
            (DragState::Dragging, POINTER_UP) => Some(DragState::Idle),
            (DragState::Dragging, POINTER_CANCEL) => Some(DragState::Idle),
            _ => None,
        }
    }
}

/// An active thumb drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    pub pointer: PointerId,
    /// Pointer coordinate along the axis at drag start
    pub anchor_pointer: f32,
    /// Content scroll offset at drag start
    pub anchor_scroll: f32,
    pub mapping: DragMapping,
}

impl DragSession {
    /// Scroll offset for the pointer's current coordinate, unclamped
    pub fn target_offset(&self, pointer_position: f32) -> f32 {
        let pointer_delta = pointer_position - self.anchor_pointer;
        self.anchor_scroll + self.mapping.scroll_delta(pointer_delta)
    }
}

#[derive(Debug, Clone, Default)]
struct AxisDrag {
    fsm: StateMachine<DragState>,
    session: Option<DragSession>,
}

/// Drag sessions for both axes
#[derive(Debug, Clone, Default)]
pub struct DragController {
    axes: [AxisDrag; 2],
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, axis: Axis) -> DragState {
        self.axes[axis.index()].fsm.current_state()
    }

    pub fn is_dragging(&self, axis: Axis) -> bool {
        self.state(axis) == DragState::Dragging
    }

    pub fn session(&self, axis: Axis) -> Option<&DragSession> {
        self.axes[axis.index()].session.as_ref()
    }

    /// Transition history for an axis (oldest first)
    pub fn history(&self, axis: Axis) -> &[(DragState, EventType, DragState)] {
        self.axes[axis.index()].fsm.history()
    }

    /// Start a drag. Returns false, leaving the running session untouched,
    /// if the axis is already dragging.
    pub fn begin(
        &mut self,
        axis: Axis,
        pointer: PointerId,
        anchor_pointer: f32,
        anchor_scroll: f32,
        mapping: DragMapping,
    ) -> bool {
        let slot = &mut self.axes[axis.index()];
        if slot.fsm.send(POINTER_DOWN).is_none() {
            return false;
        }
        slot.session = Some(DragSession {
            axis,
            pointer,
            anchor_pointer,
            anchor_scroll,
            mapping,
        });
        true
    }

    /// Scroll offset to apply for a pointer move on `axis`, or `None` when
    /// the axis is idle or the move belongs to another pointer
    pub fn drag_to(&self, axis: Axis, pointer: PointerId, pointer_position: f32) -> Option<f32> {
        self.session(axis)
            .filter(|session| session.pointer == pointer)
            .map(|session| session.target_offset(pointer_position))
    }

    /// End the session on `axis` with `POINTER_UP` or `POINTER_CANCEL`
    pub fn end(&mut self, axis: Axis, event: EventType) -> Option<DragSession> {
        let slot = &mut self.axes[axis.index()];
        if slot.fsm.is_in(DragState::Idle) {
            return None;
        }
        // Anything other than a cancel ends the session as a release
        let event = if event == POINTER_CANCEL { POINTER_CANCEL } else { POINTER_UP };
        slot.fsm.send(event);
        slot.session.take()
    }

    /// End every session driven by `pointer`
    pub fn end_pointer(
        &mut self,
        pointer: PointerId,
        event: EventType,
    ) -> SmallVec<[DragSession; 2]> {
        let axes: SmallVec<[Axis; 2]> = Axis::ALL
            .into_iter()
            .filter(|axis| self.session(*axis).is_some_and(|s| s.pointer == pointer))
            .collect();
        axes.into_iter().filter_map(|axis| self.end(axis, event)).collect()
    }

    /// End all sessions (teardown)
    pub fn end_all(&mut self) -> SmallVec<[DragSession; 2]> {
        Axis::ALL
            .into_iter()
            .filter_map(|axis| self.end(axis, POINTER_CANCEL))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mapping() -> DragMapping {
        DragMapping {
            max_thumb_travel: 240.0,
            max_scroll: 800.0,
        }
    }

    #[test]
    fn test_drag_state_transitions() {
        assert_eq!(DragState::Idle.on_event(POINTER_DOWN), Some(DragState::Dragging));
        assert_eq!(DragState::Dragging.on_event(POINTER_UP), Some(DragState::Idle));
        assert_eq!(DragState::Dragging.on_event(POINTER_CANCEL), Some(DragState::Idle));
        assert_eq!(DragState::Dragging.on_event(POINTER_DOWN), None);
        assert_eq!(DragState::Idle.on_event(POINTER_MOVE), None);
        assert_eq!(DragState::Idle.on_event(POINTER_UP), None);
    }

    #[test]
    fn test_drag_maps_pointer_to_scroll() {
        let mut drag = DragController::new();
        assert!(drag.begin(Axis::Horizontal, PointerId(1), 50.0, 400.0, mapping()));
        assert!(drag.is_dragging(Axis::Horizontal));

        let target = drag.drag_to(Axis::Horizontal, PointerId(1), 170.0).unwrap();
        assert_abs_diff_eq!(target, 800.0, epsilon = 1e-3);

        // Unclamped: the host clamps
        let past = drag.drag_to(Axis::Horizontal, PointerId(1), 290.0).unwrap();
        assert_abs_diff_eq!(past, 1200.0, epsilon = 1e-3);

        let back = drag.drag_to(Axis::Horizontal, PointerId(1), -100.0).unwrap();
        assert_abs_diff_eq!(back, -100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let drag = DragController::new();
        assert_eq!(drag.drag_to(Axis::Vertical, PointerId(1), 10.0), None);
    }

    #[test]
    fn test_second_pointer_down_rejected() {
        let mut drag = DragController::new();
        assert!(drag.begin(Axis::Vertical, PointerId(1), 10.0, 0.0, mapping()));
        assert!(!drag.begin(Axis::Vertical, PointerId(2), 99.0, 500.0, mapping()));

        let session = drag.session(Axis::Vertical).unwrap();
        assert_eq!(session.pointer, PointerId(1));
        assert_eq!(session.anchor_pointer, 10.0);
        assert_eq!(drag.drag_to(Axis::Vertical, PointerId(2), 50.0), None);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut drag = DragController::new();
        assert!(drag.begin(Axis::Horizontal, PointerId(1), 0.0, 0.0, mapping()));
        assert!(drag.begin(Axis::Vertical, PointerId(2), 0.0, 0.0, mapping()));

        drag.end(Axis::Horizontal, POINTER_UP);
        assert!(!drag.is_dragging(Axis::Horizontal));
        assert!(drag.is_dragging(Axis::Vertical));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut drag = DragController::new();
        drag.begin(Axis::Horizontal, PointerId(1), 0.0, 100.0, mapping());

        let ended = drag.end(Axis::Horizontal, POINTER_CANCEL).unwrap();
        assert_eq!(ended.anchor_scroll, 100.0);
        assert_eq!(drag.state(Axis::Horizontal), DragState::Idle);
        assert!(drag.session(Axis::Horizontal).is_none());
        assert_eq!(
            drag.history(Axis::Horizontal),
            &[
                (DragState::Idle, POINTER_DOWN, DragState::Dragging),
                (DragState::Dragging, POINTER_CANCEL, DragState::Idle),
            ]
        );

        // Ending again is harmless
        assert!(drag.end(Axis::Horizontal, POINTER_CANCEL).is_none());
    }

    #[test]
    fn test_end_pointer_only_ends_its_sessions() {
        let mut drag = DragController::new();
        drag.begin(Axis::Horizontal, PointerId(1), 0.0, 0.0, mapping());
        drag.begin(Axis::Vertical, PointerId(2), 0.0, 0.0, mapping());

        let ended = drag.end_pointer(PointerId(2), POINTER_UP);
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].axis, Axis::Vertical);
        assert!(drag.is_dragging(Axis::Horizontal));

        assert_eq!(drag.end_all().len(), 1);
        assert!(!drag.is_dragging(Axis::Horizontal));
    }

    #[test]
    fn test_zero_travel_mapping_never_scrolls() {
        let mut drag = DragController::new();
        let frozen = DragMapping {
            max_thumb_travel: 0.0,
            max_scroll: 800.0,
        };
        drag.begin(Axis::Horizontal, PointerId(1), 0.0, 300.0, frozen);
        assert_eq!(drag.drag_to(Axis::Horizontal, PointerId(1), 500.0), Some(300.0));
    }
}
