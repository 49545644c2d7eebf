//! Glass Core
//!
//! Foundational primitives shared by glass widgets:
//!
//! - **Host capabilities**: viewport, size/mutation observers and a
//!   scheduler, injected so widget logic runs without a real UI runtime
//! - **State Machines**: flat interaction state machines
//! - **Events**: pointer, scroll and lifecycle event types
//!
//! Enable the `testing` feature for an in-process host.

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod host;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{GlassError, Result};
pub use events::{ElementId, Event, EventData, EventType, PointerId};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Axis, Point, Size};
pub use host::{
    CancelToken, MutationObserver, NotifyCallback, ObserverHandle, Scheduler, ScrollViewport,
    SizeObserver, Task,
};
