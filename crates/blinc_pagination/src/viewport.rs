//! Host viewport contract and offset-change notifications
//!
//! A paginated host implements [`Viewport`]: it reports its current geometry
//! on demand and publishes an [`OffsetChange`] every time its content offset
//! is assigned. [`OffsetNotifier`] is the publish/subscribe primitive hosts
//! can build that on, and [`ScrollView`] is a complete in-memory host.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blinc_pagination::prelude::*;
//!
//! let view = Arc::new(ScrollView::new(Size::new(320.0, 480.0), Size::new(320.0, 960.0)));
//! let controller = PaginationController::new();
//! controller.attach(&view);
//!
//! view.set_content_offset(Point::new(0.0, 200.0));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::geometry::{Point, Size};

/// A content offset assignment, with the values before and after.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetChange {
    pub old: Point,
    pub new: Point,
}

impl OffsetChange {
    pub fn new(old: Point, new: Point) -> Self {
        Self { old, new }
    }
}

/// Callback invoked for every offset change
pub type OffsetListener = Arc<dyn Fn(OffsetChange) + Send + Sync>;

/// A scrollable host that pagination can attach to.
pub trait Viewport: Send + Sync {
    /// Size of the visible area.
    fn bounds(&self) -> Size;

    /// Total size of the scrollable content.
    fn content_size(&self) -> Size;

    /// Current content offset.
    fn content_offset(&self) -> Point;

    /// Whether the viewport is currently on screen.
    fn is_visible(&self) -> bool;

    /// Whether the viewport renders right-to-left.
    fn is_rtl(&self) -> bool {
        false
    }

    /// Whether the layout mirrors itself in right-to-left mode.
    fn flips_in_rtl(&self) -> bool {
        false
    }

    /// Register `listener` for offset changes until the returned
    /// subscription is dropped.
    fn observe_offset(&self, listener: OffsetListener) -> Subscription;
}

// ============================================================================
// Subscription
// ============================================================================

/// Keeps an offset listener registered. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` when dropped.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to unregister.
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Unregister the listener now.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// OffsetNotifier
// ============================================================================

#[derive(Default)]
struct NotifierInner {
    next_id: u64,
    listeners: Vec<(u64, OffsetListener)>,
}

/// Fan-out of offset changes to registered listeners.
///
/// Listeners are invoked outside the registry lock, so a listener may
/// subscribe, unsubscribe or emit again without deadlocking.
#[derive(Clone, Default)]
pub struct OffsetNotifier {
    inner: Arc<Mutex<NotifierInner>>,
}

impl OffsetNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: OffsetListener) -> Subscription {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };

        let registry: Weak<Mutex<NotifierInner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().listeners.retain(|(other, _)| *other != id);
            }
        })
    }

    /// Deliver `change` to every listener registered at the time of the call.
    pub fn emit(&self, change: OffsetChange) {
        let listeners: Vec<OffsetListener> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(change);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl std::fmt::Debug for OffsetNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffsetNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// ============================================================================
// ScrollView
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct ScrollViewState {
    bounds: Size,
    content_size: Size,
    offset: Point,
    visible: bool,
    rtl: bool,
    flips_in_rtl: bool,
}

/// In-memory scrollable host.
///
/// Every call to [`set_content_offset`](Self::set_content_offset) publishes
/// an [`OffsetChange`], including assignments that leave the offset
/// unchanged. Geometry setters do not notify.
pub struct ScrollView {
    state: Mutex<ScrollViewState>,
    notifier: OffsetNotifier,
}

impl ScrollView {
    /// Create a visible, left-to-right view at offset zero.
    pub fn new(bounds: Size, content_size: Size) -> Self {
        Self {
            state: Mutex::new(ScrollViewState {
                bounds,
                content_size,
                offset: Point::ZERO,
                visible: true,
                rtl: false,
                flips_in_rtl: false,
            }),
            notifier: OffsetNotifier::new(),
        }
    }

    /// Assign the content offset and notify observers.
    pub fn set_content_offset(&self, offset: Point) {
        let old = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.offset, offset)
        };
        self.notifier.emit(OffsetChange::new(old, offset));
    }

    /// Move the content offset by a delta and notify observers.
    pub fn scroll_by(&self, dx: f32, dy: f32) {
        let target = self.state.lock().offset.offset_by(dx, dy);
        self.set_content_offset(target);
    }

    pub fn set_bounds(&self, bounds: Size) {
        self.state.lock().bounds = bounds;
    }

    pub fn set_content_size(&self, content_size: Size) {
        self.state.lock().content_size = content_size;
    }

    pub fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    pub fn set_rtl(&self, rtl: bool) {
        self.state.lock().rtl = rtl;
    }

    pub fn set_flips_in_rtl(&self, flips: bool) {
        self.state.lock().flips_in_rtl = flips;
    }

    /// Number of attached offset observers.
    pub fn observer_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

impl Viewport for ScrollView {
    fn bounds(&self) -> Size {
        self.state.lock().bounds
    }

    fn content_size(&self) -> Size {
        self.state.lock().content_size
    }

    fn content_offset(&self) -> Point {
        self.state.lock().offset
    }

    fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    fn is_rtl(&self) -> bool {
        self.state.lock().rtl
    }

    fn flips_in_rtl(&self) -> bool {
        self.state.lock().flips_in_rtl
    }

    fn observe_offset(&self, listener: OffsetListener) -> Subscription {
        self.notifier.subscribe(listener)
    }
}

impl std::fmt::Debug for ScrollView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("state", &*self.state.lock())
            .field("observers", &self.observer_count())
            .finish()
    }
}
