//! In-process host for tests and demos
//!
//! Deterministic stand-ins for the host capabilities:
//!
//! - [`ManualScheduler`]: virtual clock; frames and timers only run when the
//!   test says so
//! - [`TestObserver`]: in-memory size or mutation notifier
//! - [`TestViewport`]: cloneable content area that clamps scroll offsets and
//!   records pointer capture like a real host

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::events::{ElementId, PointerId};
use crate::geometry::{Axis, Point, Size};
use crate::host::{
    CancelToken, MutationObserver, NotifyCallback, ObserverHandle, Scheduler, ScrollViewport,
    SizeObserver, Task,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Scheduler
// ============================================================================

enum Trigger {
    Frame,
    At(Duration),
}

struct PendingTask {
    trigger: Trigger,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    next_seq: u64,
    tasks: SlotMap<CancelToken, PendingTask>,
}

/// Scheduler driven by explicit `run_frame` / `advance` calls
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<SchedulerState>,
}

impl ManualScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    /// Number of pending pre-repaint callbacks
    pub fn pending_frames(&self) -> usize {
        lock(&self.state)
            .tasks
            .values()
            .filter(|t| matches!(t.trigger, Trigger::Frame))
            .count()
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        lock(&self.state)
            .tasks
            .values()
            .filter(|t| matches!(t.trigger, Trigger::At(_)))
            .count()
    }

    /// Run every callback queued for the next frame. Callbacks queued while
    /// running wait for the following frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = self.take(|trigger, _| matches!(trigger, Trigger::Frame));
        let count = due.len();
        for task in due {
            task();
        }
        count
    }

    /// Move the clock forward and run every timer that came due, in order
    pub fn advance(&self, by: Duration) -> usize {
        lock(&self.state).now += by;
        let due = self.take(|trigger, now| matches!(trigger, Trigger::At(at) if *at <= now));
        let count = due.len();
        for task in due {
            task();
        }
        count
    }

    fn take(&self, pick: impl Fn(&Trigger, Duration) -> bool) -> Vec<Task> {
        let mut state = lock(&self.state);
        let now = state.now;
        let mut keys: Vec<(Duration, u64, CancelToken)> = state
            .tasks
            .iter()
            .filter(|(_, t)| pick(&t.trigger, now))
            .map(|(key, t)| {
                let at = match t.trigger {
                    Trigger::At(at) => at,
                    Trigger::Frame => Duration::ZERO,
                };
                (at, t.seq, key)
            })
            .collect();
        keys.sort_by_key(|(at, seq, _)| (*at, *seq));

        keys.into_iter()
            .filter_map(|(_, _, key)| state.tasks.remove(key))
            .map(|pending| pending.task)
            .collect()
    }

    fn push(&self, trigger: Trigger, task: Task) -> CancelToken {
        let mut state = lock(&self.state);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.tasks.insert(PendingTask { trigger, seq, task })
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> CancelToken {
        let at = self.now() + delay;
        self.push(Trigger::At(at), task)
    }

    fn schedule_before_next_frame(&self, task: Task) -> CancelToken {
        self.push(Trigger::Frame, task)
    }

    fn cancel(&self, token: CancelToken) {
        lock(&self.state).tasks.remove(token);
    }
}

// ============================================================================
// Observers
// ============================================================================

/// In-memory notifier usable as either a size or a mutation observer
#[derive(Default)]
pub struct TestObserver {
    subscriptions: Mutex<SlotMap<ObserverHandle, (ElementId, NotifyCallback)>>,
}

impl TestObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Deliver a change notification for `target`. Returns how many
    /// subscribers were notified.
    pub fn notify(&self, target: ElementId) -> usize {
        // Clone out so callbacks may (un)subscribe without deadlocking
        let callbacks: Vec<NotifyCallback> = lock(&self.subscriptions)
            .values()
            .filter(|(element, _)| *element == target)
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        lock(&self.subscriptions).len()
    }

    fn add(&self, target: ElementId, callback: NotifyCallback) -> ObserverHandle {
        lock(&self.subscriptions).insert((target, callback))
    }

    fn remove(&self, handle: ObserverHandle) {
        lock(&self.subscriptions).remove(handle);
    }
}

impl SizeObserver for TestObserver {
    fn subscribe(&self, target: ElementId, callback: NotifyCallback) -> ObserverHandle {
        self.add(target, callback)
    }

    fn unsubscribe(&self, handle: ObserverHandle) {
        self.remove(handle);
    }
}

impl MutationObserver for TestObserver {
    fn subscribe(&self, target: ElementId, callback: NotifyCallback) -> ObserverHandle {
        self.add(target, callback)
    }

    fn unsubscribe(&self, handle: ObserverHandle) {
        self.remove(handle);
    }
}

// ============================================================================
// Viewport
// ============================================================================

struct ViewportState {
    element: ElementId,
    content: Size,
    visible: Size,
    offset: Point,
    tracks: [Option<f32>; 2],
    captured: FxHashSet<(Axis, PointerId)>,
    offset_writes: usize,
}

/// Cloneable in-memory content area
///
/// Clones share state, so a test keeps one handle while the widget owns
/// another.
#[derive(Clone)]
pub struct TestViewport {
    state: Arc<Mutex<ViewportState>>,
}

impl TestViewport {
    /// A viewport whose tracks span the full visible box
    pub fn new(element: ElementId, content: Size, visible: Size) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewportState {
                element,
                content,
                visible,
                offset: Point::ZERO,
                tracks: [Some(visible.width), Some(visible.height)],
                captured: FxHashSet::default(),
                offset_writes: 0,
            })),
        }
    }

    pub fn with_track(self, axis: Axis, extent: Option<f32>) -> Self {
        self.set_track(axis, extent);
        self
    }

    pub fn set_track(&self, axis: Axis, extent: Option<f32>) {
        lock(&self.state).tracks[axis.index()] = extent;
    }

    /// Resize the content; the offset is re-clamped like a host would
    pub fn set_content_size(&self, content: Size) {
        let mut state = lock(&self.state);
        state.content = content;
        for axis in Axis::ALL {
            let clamped = clamp_offset(&state, axis, state.offset.along(axis));
            state.offset.set_along(axis, clamped);
        }
    }

    pub fn set_visible_size(&self, visible: Size) {
        let mut state = lock(&self.state);
        state.visible = visible;
        for axis in Axis::ALL {
            let clamped = clamp_offset(&state, axis, state.offset.along(axis));
            state.offset.set_along(axis, clamped);
        }
    }

    pub fn offset(&self) -> Point {
        lock(&self.state).offset
    }

    /// Number of writes made through `ScrollViewport::set_scroll_offset`
    pub fn offset_writes(&self) -> usize {
        lock(&self.state).offset_writes
    }

    pub fn is_captured(&self, axis: Axis, pointer: PointerId) -> bool {
        lock(&self.state).captured.contains(&(axis, pointer))
    }

    pub fn captured_count(&self) -> usize {
        lock(&self.state).captured.len()
    }
}

fn clamp_offset(state: &ViewportState, axis: Axis, offset: f32) -> f32 {
    let max = (state.content.along(axis) - state.visible.along(axis)).max(0.0);
    offset.clamp(0.0, max)
}

impl ScrollViewport for TestViewport {
    fn element_id(&self) -> ElementId {
        lock(&self.state).element
    }

    fn content_extent(&self, axis: Axis) -> f32 {
        lock(&self.state).content.along(axis)
    }

    fn visible_extent(&self, axis: Axis) -> f32 {
        lock(&self.state).visible.along(axis)
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        lock(&self.state).offset.along(axis)
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32) {
        let mut state = lock(&self.state);
        let clamped = clamp_offset(&state, axis, offset);
        state.offset.set_along(axis, clamped);
        state.offset_writes += 1;
    }

    fn track_extent(&self, axis: Axis) -> Option<f32> {
        lock(&self.state).tracks[axis.index()]
    }

    fn capture_pointer(&mut self, axis: Axis, pointer: PointerId) {
        lock(&self.state).captured.insert((axis, pointer));
    }

    fn release_pointer(&mut self, axis: Axis, pointer: PointerId) {
        lock(&self.state).captured.remove(&(axis, pointer));
    }
}
