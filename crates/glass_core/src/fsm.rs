//! State Machine Runtime
//!
//! Flat state machines for widget interaction states. States are plain
//! `Copy` enums that map an incoming event type to their successor; the
//! machine tracks the current state and a short transition history.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::EventType;

/// Number of transitions kept in the history ring
const HISTORY_LIMIT: usize = 16;

/// Trait for state types that can handle event transitions
///
/// # Example
///
/// ```
/// use glass_core::events::event_types::*;
/// use glass_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Press {
///     #[default]
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Up, POINTER_DOWN) => Some(Press::Down),
///             (Press::Down, POINTER_UP) => Some(Press::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Up.on_event(POINTER_DOWN), Some(Press::Down));
/// assert_eq!(Press::Up.on_event(POINTER_UP), None);
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// Most recent transitions, oldest first (for debugging)
    history: SmallVec<[(S, EventType, S); HISTORY_LIMIT]>,
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        self.current_state = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Hover {
        #[default]
        Idle,
        Hovered,
        Pressed,
    }

    impl StateTransitions for Hover {
        fn on_event(&self, event: EventType) -> Option<Self> {
            match (self, event) {
                (Hover::Idle, POINTER_ENTER) => Some(Hover::Hovered),
                (Hover::Hovered, POINTER_LEAVE) => Some(Hover::Idle),
                (Hover::Hovered, POINTER_DOWN) => Some(Hover::Pressed),
                (Hover::Pressed, POINTER_UP) => Some(Hover::Hovered),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::<Hover>::default();
        assert_eq!(fsm.current_state(), Hover::Idle);

        assert_eq!(fsm.send(POINTER_ENTER), Some(Hover::Hovered));
        assert_eq!(fsm.send(POINTER_DOWN), Some(Hover::Pressed));
        assert_eq!(fsm.send(POINTER_UP), Some(Hover::Hovered));
        assert_eq!(fsm.send(POINTER_LEAVE), Some(Hover::Idle));
        assert!(fsm.is_in(Hover::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(Hover::Idle);

        // POINTER_DOWN is not valid in Idle
        assert_eq!(fsm.send(POINTER_DOWN), None);
        assert_eq!(fsm.current_state(), Hover::Idle);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_can_send() {
        let fsm = StateMachine::new(Hover::Idle);
        assert!(fsm.can_send(POINTER_ENTER));
        assert!(!fsm.can_send(POINTER_UP));
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Hover::Idle);
        fsm.send(POINTER_ENTER);
        fsm.send(POINTER_DOWN);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Hover::Idle, POINTER_ENTER, Hover::Hovered));
        assert_eq!(history[1], (Hover::Hovered, POINTER_DOWN, Hover::Pressed));

        fsm.clear_history();
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Hover::Idle);
        for _ in 0..HISTORY_LIMIT {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }
        assert_eq!(fsm.history().len(), HISTORY_LIMIT);
        assert_eq!(
            fsm.history().last(),
            Some(&(Hover::Hovered, POINTER_LEAVE, Hover::Idle))
        );
    }
}
