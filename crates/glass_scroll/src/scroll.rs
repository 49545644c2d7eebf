//! Glass scroll container
//!
//! Hosts a content area in a clipped viewport and drives a synthetic
//! scrollbar for each scrolling axis. The component owns no layout: it reads
//! extents from the host [`ScrollViewport`], reacts to host notifications and
//! pointer events, and exposes a [`ScrollRenderInfo`] snapshot for drawing.
//!
//! # Example
//!
//! ```rust,ignore
//! use glass_scroll::prelude::*;
//!
//! let scroll = GlassScroll::new(ScrollConfig::new().auto_scroll_to_end(true), host);
//! scroll.mount(Box::new(viewport));
//!
//! // Host plumbing
//! scroll.handle_event(ScrollPart::Thumb(Axis::Horizontal), &mut event);
//!
//! let info = scroll.render_info();
//! ```
//!
//! # Update flow
//!
//! - **Size change**: re-check overflow, re-measure thumbs
//! - **Content mutation**: as above, then pin to the trailing edge when
//!   auto-scroll is enabled and schedule one settle pass
//! - **Native scroll / drag**: coalesced onto a single pre-repaint measure
//!
//! State lives in a shared handle. Callbacks registered with the host hold a
//! weak reference only, so they do nothing once the component is dropped.
//! Scroll offsets are written to the viewport after the state lock is
//! released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use glass_core::events::event_types::*;
use glass_core::{
    Axis, CancelToken, Event, EventType, MutationObserver, NotifyCallback, Point, PointerId,
    Scheduler, ScrollViewport, SizeObserver, Task,
};
use smallvec::SmallVec;

use crate::config::ScrollConfig;
use crate::drag::{DragController, DragState};
use crate::fade::{self, FadeMask};
use crate::geometry::{thumb_geometry, DragMapping, ThumbGeometry, ViewportMetrics};
use crate::observer::ViewportObserver;
use crate::overflow::{OverflowChange, OverflowDetector};
use crate::render::{
    ContentRenderInfo, Cursor, OverflowStyle, ScrollRenderInfo, ScrollbarRenderInfo,
    ThumbRenderInfo, TrackInsets,
};

// ============================================================================
// Host
// ============================================================================

/// Host capabilities a scroll container depends on
#[derive(Clone)]
pub struct ScrollHost {
    pub size_observer: Arc<dyn SizeObserver>,
    pub mutation_observer: Arc<dyn MutationObserver>,
    pub scheduler: Arc<dyn Scheduler>,
}

impl ScrollHost {
    pub fn new(
        size_observer: Arc<dyn SizeObserver>,
        mutation_observer: Arc<dyn MutationObserver>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            size_observer,
            mutation_observer,
            scheduler,
        }
    }
}

/// Part of the container an event was delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPart {
    /// The outer container (hover tracking)
    Container,
    /// The clipped content area
    Content,
    Track(Axis),
    Thumb(Axis),
}

// ============================================================================
// Shared State
// ============================================================================

type SharedScrollState = Arc<Mutex<ScrollState>>;

/// The mounted content area, locked apart from the component state
type SharedViewport = Arc<Mutex<Box<dyn ScrollViewport>>>;

/// Scroll offsets waiting for the state lock to be released
type OffsetWrites = SmallVec<[(Axis, f32); 2]>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` against the state, then flush the offsets it queued
///
/// Offsets are written with only the viewport locked, so the viewport may
/// report the scroll back through [`GlassScroll::scrolled`] synchronously.
fn update<R>(shared: &Mutex<ScrollState>, f: impl FnOnce(&mut ScrollState) -> R) -> R {
    let (result, flush) = {
        let mut state = lock(shared);
        let result = f(&mut state);
        (result, state.take_writes())
    };

    if let Some(flush) = flush {
        {
            let mut viewport = lock(&*flush.viewport);
            for (axis, offset) in flush.writes {
                viewport.set_scroll_offset(axis, offset);
            }
        }
        if flush.remeasure {
            lock(shared).measure();
        }
    }
    result
}

struct OffsetFlush {
    viewport: SharedViewport,
    writes: OffsetWrites,
    remeasure: bool,
}

struct ScrollState {
    config: ScrollConfig,
    scheduler: Arc<dyn Scheduler>,
    observer: ViewportObserver,
    viewport: Option<SharedViewport>,
    overflow: [OverflowDetector; 2],
    thumbs: [Option<ThumbGeometry>; 2],
    drag: DragController,
    hovered: bool,
    /// Pending pre-repaint measure; at most one
    pending_frame: Option<CancelToken>,
    /// Pending auto-scroll settle pass; at most one
    settle_timer: Option<CancelToken>,
    pending_writes: OffsetWrites,
    /// Measure again once `pending_writes` landed
    remeasure_after_writes: bool,
    this: Weak<Mutex<ScrollState>>,
}

impl ScrollState {
    /// Host callback that forwards to `f` while the component is alive
    fn callback(&self, f: fn(&mut ScrollState)) -> NotifyCallback {
        let this = self.this.clone();
        Arc::new(move || {
            if let Some(state) = this.upgrade() {
                update(&state, f);
            }
        })
    }

    fn task(&self, f: fn(&mut ScrollState)) -> Task {
        let this = self.this.clone();
        Box::new(move || {
            if let Some(state) = this.upgrade() {
                update(&state, f);
            }
        })
    }

    fn viewport(&self) -> Option<MutexGuard<'_, Box<dyn ScrollViewport>>> {
        self.viewport.as_deref().map(lock)
    }

    fn metrics(&self, axis: Axis) -> Option<ViewportMetrics> {
        self.viewport()
            .map(|viewport| ViewportMetrics::read(&**viewport, axis))
    }

    fn is_overflowing(&self, axis: Axis) -> bool {
        self.overflow[axis.index()].is_overflowing()
    }

    fn scrollbar_visible(&self, axis: Axis) -> bool {
        self.is_overflowing(axis) && (self.hovered || self.drag.is_dragging(axis))
    }

    fn queue_offset(&mut self, axis: Axis, offset: f32) {
        match self.pending_writes.iter_mut().find(|(queued, _)| *queued == axis) {
            Some((_, queued)) => *queued = offset,
            None => self.pending_writes.push((axis, offset)),
        }
    }

    fn take_writes(&mut self) -> Option<OffsetFlush> {
        let remeasure = std::mem::take(&mut self.remeasure_after_writes);
        let writes = std::mem::take(&mut self.pending_writes);
        if writes.is_empty() {
            return None;
        }
        Some(OffsetFlush {
            viewport: self.viewport.clone()?,
            writes,
            remeasure,
        })
    }

    // ------------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------------

    fn check_overflow(&mut self) {
        for axis in self.config.axis_mode.axes() {
            let Some(metrics) = self.metrics(axis) else {
                return;
            };
            let change = self.overflow[axis.index()].update(
                metrics.content_extent,
                metrics.visible_extent,
                self.config.overflow_epsilon,
            );
            match change {
                OverflowChange::Rising => {
                    tracing::debug!(?axis, "content started overflowing");
                    // Anything measured before the first overflow is stale
                    self.request_frame();
                }
                OverflowChange::Falling => {
                    tracing::debug!(?axis, "content no longer overflows");
                    self.thumbs[axis.index()] = None;
                }
                OverflowChange::Unchanged => {}
            }
        }
    }

    fn measure(&mut self) {
        let Some(viewport) = self.viewport.as_deref().map(lock) else {
            return;
        };
        for axis in self.config.axis_mode.axes() {
            let index = axis.index();
            if !self.overflow[index].is_overflowing() {
                self.thumbs[index] = None;
                continue;
            }
            let Some(track) = viewport.track_extent(axis) else {
                continue;
            };
            let metrics = ViewportMetrics::read(&**viewport, axis);
            let thumb = thumb_geometry(metrics, track, self.config.min_thumb_length);
            tracing::trace!(?axis, length = thumb.length, offset = thumb.offset, "thumb measured");
            self.thumbs[index] = Some(thumb);
        }
    }

    fn refresh(&mut self) {
        self.check_overflow();
        self.measure();
    }

    /// Coalesce onto one pre-repaint measure; the latest request wins
    fn request_frame(&mut self) {
        if self.viewport.is_none() {
            return;
        }
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel(token);
        }
        let task = self.task(ScrollState::on_frame);
        self.pending_frame = Some(self.scheduler.schedule_before_next_frame(task));
    }

    fn on_frame(&mut self) {
        self.pending_frame = None;
        self.measure();
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    fn on_resize(&mut self) {
        self.refresh();
    }

    fn on_content_changed(&mut self) {
        self.refresh();
        if !self.config.auto_scroll_to_end || self.viewport.is_none() {
            return;
        }

        self.scroll_to_end();

        // Layout may settle after this notification; pin once more later
        if let Some(token) = self.settle_timer.take() {
            self.scheduler.cancel(token);
        }
        let task = self.task(ScrollState::on_settle);
        self.settle_timer = Some(self.scheduler.schedule_once(self.config.settle_delay(), task));
    }

    fn on_settle(&mut self) {
        self.settle_timer = None;
        self.refresh();
        self.scroll_to_end();
    }

    /// Queue the trailing edge for every auto-scrolling axis
    fn scroll_to_end(&mut self) {
        let mode = self.config.axis_mode;
        for axis in mode.axes() {
            if !mode.auto_scrolls(axis) {
                continue;
            }
            let Some(end) = self.metrics(axis).map(|metrics| metrics.max_scroll()) else {
                return;
            };
            tracing::debug!(?axis, offset = end, "auto-scrolling to end");
            self.queue_offset(axis, end);
            self.remeasure_after_writes = true;
        }
    }

    // ------------------------------------------------------------------------
    // Dragging
    // ------------------------------------------------------------------------

    fn begin_drag(&mut self, axis: Axis, pointer: PointerId, position: Point) -> bool {
        if !self.config.axis_mode.includes(axis) || !self.is_overflowing(axis) {
            return false;
        }
        let min_thumb_length = self.config.min_thumb_length;
        let Some(mut viewport) = self.viewport.as_deref().map(lock) else {
            return false;
        };
        let Some(track) = viewport.track_extent(axis) else {
            return false;
        };

        let metrics = ViewportMetrics::read(&**viewport, axis);
        let mapping = DragMapping::capture(metrics, track, min_thumb_length);
        let anchor_pointer = position.along(axis);
        if !self
            .drag
            .begin(axis, pointer, anchor_pointer, metrics.scroll_offset, mapping)
        {
            tracing::trace!(?axis, ?pointer, "drag already active, ignoring pointer down");
            return false;
        }

        viewport.capture_pointer(axis, pointer);
        tracing::debug!(
            ?axis,
            ?pointer,
            anchor_pointer,
            anchor_scroll = metrics.scroll_offset,
            "thumb drag started"
        );
        true
    }

    fn drag_move(&mut self, pointer: PointerId, position: Point) -> bool {
        if self.viewport.is_none() {
            return false;
        }
        let mut moved = false;
        for axis in Axis::ALL {
            if let Some(offset) = self.drag.drag_to(axis, pointer, position.along(axis)) {
                self.queue_offset(axis, offset);
                moved = true;
            }
        }
        if moved {
            self.request_frame();
        }
        moved
    }

    fn end_drag(&mut self, pointer: PointerId, axis: Option<Axis>, event: EventType) -> bool {
        let mut ended = self.drag.end_pointer(pointer, event);
        // A release on the thumb itself always ends that axis
        if let Some(session) = axis.and_then(|axis| self.drag.end(axis, event)) {
            ended.push(session);
        }
        for session in &ended {
            if let Some(mut viewport) = self.viewport() {
                viewport.release_pointer(session.axis, session.pointer);
            }
            tracing::debug!(
                axis = ?session.axis,
                pointer = ?session.pointer,
                event,
                "thumb drag ended"
            );
        }
        !ended.is_empty()
    }

    // ------------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------------

    fn teardown(&mut self) -> Option<Box<dyn ScrollViewport>> {
        self.observer.disconnect();
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = self.settle_timer.take() {
            self.scheduler.cancel(token);
        }
        self.pending_writes.clear();
        self.remeasure_after_writes = false;

        let viewport = self.viewport.take();
        let sessions = self.drag.end_all();
        if let Some(viewport) = viewport.as_deref() {
            let mut viewport = lock(viewport);
            for session in sessions {
                viewport.release_pointer(session.axis, session.pointer);
            }
            tracing::debug!(element = ?viewport.element_id(), "glass scroll unmounted");
        }

        for detector in &mut self.overflow {
            detector.reset();
        }
        self.thumbs = [None; 2];
        self.hovered = false;

        // Still shared only while an offset flush is writing to it
        Arc::try_unwrap(viewport?)
            .ok()
            .map(|viewport| viewport.into_inner().unwrap_or_else(PoisonError::into_inner))
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    fn fade_mask(&self, axis: Axis) -> Option<FadeMask> {
        if !self.config.axis_mode.includes(axis) || !self.is_overflowing(axis) {
            return None;
        }
        let metrics = self.metrics(axis)?;
        fade::fade_mask(
            axis,
            metrics,
            self.config.fade_width.along(axis),
            self.config.edge_tolerance,
        )
    }

    fn scrollbar_info(&self, axis: Axis) -> Option<ScrollbarRenderInfo> {
        let mode = self.config.axis_mode;
        if !mode.includes(axis) {
            return None;
        }
        let layout = self.config.track;
        let dragging = self.drag.is_dragging(axis);
        let visible = self.scrollbar_visible(axis);

        // Leave the corner free when the other rail is present too
        let cross = axis.cross();
        let trailing = if mode.includes(cross) && self.is_overflowing(cross) {
            layout.corner_inset
        } else {
            layout.end_inset
        };

        let thumb = self.thumbs[axis.index()].map(|thumb| ThumbRenderInfo {
            length: thumb.length,
            offset: thumb.offset,
            dragging,
            cursor: if dragging { Cursor::Grabbing } else { Cursor::Grab },
            animate_position: !dragging,
        });

        Some(ScrollbarRenderInfo {
            axis,
            visible,
            interactive: visible,
            insets: TrackInsets {
                leading: layout.end_inset,
                trailing,
                edge_gap: layout.edge_gap,
                thickness: layout.thickness,
            },
            thumb,
        })
    }

    fn render_info(&self) -> ScrollRenderInfo {
        let mode = self.config.axis_mode;
        let overflow_style = |axis| {
            if mode.includes(axis) {
                OverflowStyle::Auto
            } else {
                OverflowStyle::Hidden
            }
        };

        ScrollRenderInfo {
            content: ContentRenderInfo {
                overflow_x: overflow_style(Axis::Horizontal),
                overflow_y: overflow_style(Axis::Vertical),
                // A single mask image can't fade two directions at once
                mask: mode.single().and_then(|axis| self.fade_mask(axis)),
            },
            horizontal: self.scrollbar_info(Axis::Horizontal),
            vertical: self.scrollbar_info(Axis::Vertical),
        }
    }
}

// ============================================================================
// Glass Scroll
// ============================================================================

/// Scroll container with overflow-aware glass scrollbars and edge fades
///
/// Dropping the container releases every observer, timer, frame callback
/// and pointer capture it holds.
pub struct GlassScroll {
    state: SharedScrollState,
}

impl GlassScroll {
    /// Create an unmounted container. The config is normalized.
    pub fn new(config: ScrollConfig, host: ScrollHost) -> Self {
        let config = config.normalized();
        let state = Arc::new_cyclic(|this| {
            Mutex::new(ScrollState {
                config,
                scheduler: host.scheduler,
                observer: ViewportObserver::new(host.size_observer, host.mutation_observer),
                viewport: None,
                overflow: [OverflowDetector::new(); 2],
                thumbs: [None; 2],
                drag: DragController::new(),
                hovered: false,
                pending_frame: None,
                settle_timer: None,
                pending_writes: SmallVec::new(),
                remeasure_after_writes: false,
                this: this.clone(),
            })
        });
        Self { state }
    }

    fn state(&self) -> MutexGuard<'_, ScrollState> {
        lock(&*self.state)
    }

    /// Attach the content area and start observing it
    ///
    /// Replaces any previously mounted viewport. With auto-scroll enabled
    /// the initial content counts as a content change.
    pub fn mount(&self, viewport: Box<dyn ScrollViewport>) {
        update(&self.state, |state| {
            state.teardown();

            let target = viewport.element_id();
            state.viewport = Some(Arc::new(Mutex::new(viewport)));

            let on_resize = state.callback(ScrollState::on_resize);
            let on_mutation = state.callback(ScrollState::on_content_changed);
            state.observer.observe(target, on_resize, on_mutation);
            tracing::debug!(
                element = ?target,
                mode = ?state.config.axis_mode,
                "glass scroll mounted"
            );

            state.on_content_changed();
        });
    }

    /// Detach from the content area, returning it
    pub fn unmount(&self) -> Option<Box<dyn ScrollViewport>> {
        self.state().teardown()
    }

    pub fn is_mounted(&self) -> bool {
        self.state().viewport.is_some()
    }

    /// The content area changed size
    pub fn resized(&self) {
        update(&self.state, ScrollState::on_resize);
    }

    /// The content area's subtree mutated
    pub fn content_changed(&self) {
        update(&self.state, ScrollState::on_content_changed);
    }

    /// The content area scrolled, by any means
    ///
    /// Safe to call from inside [`ScrollViewport::set_scroll_offset`].
    pub fn scrolled(&self) {
        self.state().request_frame();
    }

    pub fn set_hovered(&self, hovered: bool) {
        self.state().hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.state().hovered
    }

    /// Pointer down on the thumb of `axis`. Returns true if a drag started.
    pub fn pointer_down(&self, axis: Axis, pointer: PointerId, position: Point) -> bool {
        self.state().begin_drag(axis, pointer, position)
    }

    /// Returns true if the move scrolled a dragged axis
    pub fn pointer_move(&self, pointer: PointerId, position: Point) -> bool {
        update(&self.state, |state| state.drag_move(pointer, position))
    }

    /// Returns true if any drag ended
    pub fn pointer_up(&self, pointer: PointerId) -> bool {
        self.state().end_drag(pointer, None, POINTER_UP)
    }

    /// Returns true if any drag ended
    pub fn pointer_cancel(&self, pointer: PointerId) -> bool {
        self.state().end_drag(pointer, None, POINTER_CANCEL)
    }

    /// Route a host event delivered to `part`
    ///
    /// Returns true when the event was consumed; consumed pointer events
    /// have their propagation stopped.
    pub fn handle_event(&self, part: ScrollPart, event: &mut Event) -> bool {
        let handled = match event.event_type {
            POINTER_ENTER if part == ScrollPart::Container => {
                self.set_hovered(true);
                true
            }
            POINTER_LEAVE if part == ScrollPart::Container => {
                self.set_hovered(false);
                true
            }
            POINTER_DOWN => match (part, event.pointer_position()) {
                (ScrollPart::Thumb(axis), Some((pointer, x, y))) => {
                    let mut state = self.state();
                    // Hidden scrollbars let clicks through
                    let position = Point::new(x, y);
                    state.scrollbar_visible(axis) && state.begin_drag(axis, pointer, position)
                }
                _ => false,
            },
            POINTER_MOVE => match event.pointer_position() {
                Some((pointer, x, y)) => self.pointer_move(pointer, Point::new(x, y)),
                None => false,
            },
            POINTER_UP | POINTER_CANCEL => match event.pointer_position() {
                Some((pointer, _, _)) => {
                    let thumb_axis = match part {
                        ScrollPart::Thumb(axis) => Some(axis),
                        _ => None,
                    };
                    self.state().end_drag(pointer, thumb_axis, event.event_type)
                }
                None => false,
            },
            SCROLL => {
                self.scrolled();
                false
            }
            RESIZE => {
                self.resized();
                false
            }
            MUTATION => {
                self.content_changed();
                false
            }
            UNMOUNT => {
                self.unmount();
                false
            }
            _ => false,
        };

        if handled && event.is_pointer() {
            event.stop_propagation();
        }
        handled
    }

    pub fn config(&self) -> ScrollConfig {
        self.state().config
    }

    pub fn is_overflowing(&self, axis: Axis) -> bool {
        self.state().is_overflowing(axis)
    }

    /// Last measured thumb, `None` while the axis doesn't overflow
    pub fn thumb(&self, axis: Axis) -> Option<ThumbGeometry> {
        self.state().thumbs[axis.index()]
    }

    /// Edge fade for `axis`, derived from the live scroll position
    pub fn fade_mask(&self, axis: Axis) -> Option<FadeMask> {
        self.state().fade_mask(axis)
    }

    pub fn drag_state(&self, axis: Axis) -> DragState {
        self.state().drag.state(axis)
    }

    pub fn is_dragging(&self, axis: Axis) -> bool {
        self.state().drag.is_dragging(axis)
    }

    /// Snapshot of everything needed to draw the container
    pub fn render_info(&self) -> ScrollRenderInfo {
        self.state().render_info()
    }
}

impl Drop for GlassScroll {
    fn drop(&mut self) {
        lock(&*self.state).teardown();
    }
}

impl std::fmt::Debug for GlassScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("GlassScroll")
            .field("config", &state.config)
            .field("mounted", &state.viewport.is_some())
            .field("thumbs", &state.thumbs)
            .field("drag", &state.drag)
            .finish_non_exhaustive()
    }
}
