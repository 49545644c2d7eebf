//! Host capabilities
//!
//! A glass widget never talks to a concrete windowing or DOM layer. The host
//! hands it these capabilities instead:
//!
//! - **`ScrollViewport`**: the clipped content area (extents, scroll offset,
//!   pointer capture on the thumbs)
//! - **`SizeObserver`** / **`MutationObserver`**: change notifications for an
//!   element, observed independently
//! - **`Scheduler`**: one-shot timers and pre-repaint callbacks
//!
//! Callbacks are plain closures. Handles and tokens are issued by the host
//! and are the only way to release what was registered. Hosts must never
//! invoke a callback from inside `subscribe` or `schedule_*`; widgets may be
//! holding their own state lock while registering.

use std::sync::Arc;
use std::time::Duration;

use slotmap::new_key_type;

use crate::events::{ElementId, PointerId};
use crate::geometry::Axis;

new_key_type! {
    /// Subscription handle returned by an observer
    pub struct ObserverHandle;
    /// Token for a scheduled task
    pub struct CancelToken;
}

/// A deferred unit of work
pub type Task = Box<dyn FnOnce() + Send>;

/// Callback invoked on every observed change
pub type NotifyCallback = Arc<dyn Fn() + Send + Sync>;

/// Notifies when an element's box size changes
pub trait SizeObserver: Send + Sync {
    fn subscribe(&self, target: ElementId, callback: NotifyCallback) -> ObserverHandle;
    fn unsubscribe(&self, handle: ObserverHandle);
}

/// Notifies on structural or text mutations within an element's subtree
pub trait MutationObserver: Send + Sync {
    fn subscribe(&self, target: ElementId, callback: NotifyCallback) -> ObserverHandle;
    fn unsubscribe(&self, handle: ObserverHandle);
}

/// Cooperative scheduling on the UI thread
///
/// Implementations must never run a task synchronously from inside
/// `schedule_*`; callers may hold locks while scheduling.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`
    fn schedule_once(&self, delay: Duration, task: Task) -> CancelToken;

    /// Run `task` right before the next repaint
    fn schedule_before_next_frame(&self, task: Task) -> CancelToken;

    /// Cancel a pending task. Unknown or already-run tokens are ignored.
    fn cancel(&self, token: CancelToken);
}

/// The clipped content area hosted by a scroll container
///
/// Extents follow the usual host layout semantics: `content_extent` is the
/// full scrollable size, `visible_extent` the clipping box. The host owns
/// the scroll offset and clamps anything written through
/// `set_scroll_offset` to `[0, content - visible]`.
pub trait ScrollViewport: Send {
    /// Element observed for size and mutation changes
    fn element_id(&self) -> ElementId;

    fn content_extent(&self, axis: Axis) -> f32;

    fn visible_extent(&self, axis: Axis) -> f32;

    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Widgets call this without holding their own state lock, so an
    /// implementation may report the scroll back synchronously.
    fn set_scroll_offset(&mut self, axis: Axis, offset: f32);

    /// Laid-out length of the scrollbar track, `None` while it is not mounted
    fn track_extent(&self, axis: Axis) -> Option<f32>;

    /// Route all further events of `pointer` to the thumb on `axis`
    fn capture_pointer(&mut self, axis: Axis, pointer: PointerId);

    fn release_pointer(&mut self, axis: Axis, pointer: PointerId);
}
