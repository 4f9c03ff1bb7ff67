//! Pagination controller
//!
//! [`PaginationController`] watches a [`Viewport`] and asks its delegate to
//! load the next page when the user nears the end of the content.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blinc_pagination::prelude::*;
//!
//! let view = Arc::new(ScrollView::new(Size::new(320.0, 480.0), Size::new(320.0, 960.0)));
//! let controller = PaginationController::with_config(PaginationConfig::vertical(1.5));
//!
//! controller.on_prefetch(|context| {
//!     context.start();
//!     let context = context.clone();
//!     std::thread::spawn(move || {
//!         let loaded = fetch_next_page();
//!         context.finish(loaded.is_ok());
//!     });
//! });
//! controller.attach(&view);
//! ```
//!
//! The delegate owns the fetch lifecycle: it must call
//! [`PaginationContext::start`] when it begins loading and later
//! [`finish`](PaginationContext::finish) or
//! [`cancel`](PaginationContext::cancel). While the context is fetching no
//! further request is made; a delegate that never calls `start()` is asked
//! again on the next qualifying offset change.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::PaginationConfig;
use crate::context::PaginationContext;
use crate::decision;
use crate::direction::Direction;
use crate::metrics::ScrollMetrics;
use crate::viewport::{OffsetChange, OffsetListener, Subscription, Viewport};

/// Receives next-page requests from a [`PaginationController`].
///
/// The controller is passed into every call, so a delegate does not need to
/// keep a reference to it.
pub trait PaginationDelegate: Send + Sync {
    /// Last chance to refuse a request the trigger rules accepted, e.g. when
    /// the final page has already been loaded.
    fn should_prefetch(
        &self,
        _controller: &PaginationController,
        _context: &PaginationContext,
    ) -> bool {
        true
    }

    /// Begin loading the next page.
    fn prefetch_next_page(&self, controller: &PaginationController, context: &PaginationContext);
}

/// Callback type for closure delegates
pub type PrefetchCallback = Arc<dyn Fn(&PaginationContext) + Send + Sync>;

struct CallbackDelegate {
    callback: PrefetchCallback,
}

impl PaginationDelegate for CallbackDelegate {
    fn prefetch_next_page(&self, _controller: &PaginationController, context: &PaginationContext) {
        (self.callback)(context);
    }
}

/// Live link to an observed viewport. Dropping it stops observation.
struct Attachment {
    viewport: Weak<dyn Viewport>,
    _subscription: Subscription,
}

struct ControllerInner {
    config: Mutex<PaginationConfig>,
    context: PaginationContext,
    delegate: Mutex<Option<Arc<dyn PaginationDelegate>>>,
    attachment: Mutex<Option<Attachment>>,
}

/// Drives pagination for one scrollable viewport.
///
/// Clones share the same configuration, context, delegate and attachment.
#[derive(Clone)]
pub struct PaginationController {
    inner: Arc<ControllerInner>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationController {
    /// Vertical pagination, two screens ahead.
    pub fn new() -> Self {
        Self::with_config(PaginationConfig::standard())
    }

    pub fn with_config(config: PaginationConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                config: Mutex::new(config),
                context: PaginationContext::new(),
                delegate: Mutex::new(None),
                attachment: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Snapshot of the current configuration.
    pub fn config(&self) -> PaginationConfig {
        *self.inner.config.lock()
    }

    pub fn set_config(&self, config: PaginationConfig) {
        *self.inner.config.lock() = config;
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.config.lock().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.config.lock().enabled = enabled;
    }

    pub fn scrollable_directions(&self) -> Direction {
        self.inner.config.lock().scrollable_directions
    }

    pub fn set_scrollable_directions(&self, directions: Direction) {
        self.inner.config.lock().scrollable_directions = directions;
    }

    pub fn leading_screens(&self) -> f32 {
        self.inner.config.lock().leading_screens
    }

    /// Values of zero or below disable triggering.
    pub fn set_leading_screens(&self, leading_screens: f32) {
        self.inner.config.lock().leading_screens = leading_screens;
    }

    /// Handle to the fetch state shared with the delegate.
    pub fn context(&self) -> PaginationContext {
        self.inner.context.clone()
    }

    // ========================================================================
    // Delegate
    // ========================================================================

    /// Replace the delegate.
    pub fn set_delegate(&self, delegate: Arc<dyn PaginationDelegate>) {
        let previous = self.inner.delegate.lock().replace(delegate);
        if previous.is_some() {
            tracing::debug!("PaginationController: replaced delegate");
        }
    }

    /// Use a closure as the delegate.
    pub fn on_prefetch<F>(&self, callback: F)
    where
        F: Fn(&PaginationContext) + Send + Sync + 'static,
    {
        self.set_delegate(Arc::new(CallbackDelegate {
            callback: Arc::new(callback),
        }));
    }

    pub fn clear_delegate(&self) {
        self.inner.delegate.lock().take();
    }

    pub fn has_delegate(&self) -> bool {
        self.inner.delegate.lock().is_some()
    }

    fn delegate(&self) -> Option<Arc<dyn PaginationDelegate>> {
        self.inner.delegate.lock().clone()
    }

    // ========================================================================
    // Viewport attachment
    // ========================================================================

    /// Start observing `viewport`, replacing any previous attachment.
    ///
    /// Only weak references are kept: the viewport and the controller may be
    /// dropped in any order.
    pub fn attach<V: Viewport + 'static>(&self, viewport: &Arc<V>) {
        let viewport: Arc<dyn Viewport> = Arc::clone(viewport) as Arc<dyn Viewport>;
        self.attach_shared(viewport);
    }

    /// [`attach`](Self::attach) for an already type-erased viewport.
    pub fn attach_shared(&self, viewport: Arc<dyn Viewport>) {
        let weak_viewport = Arc::downgrade(&viewport);
        let listener: OffsetListener = {
            let controller = Arc::downgrade(&self.inner);
            let viewport = weak_viewport.clone();
            Arc::new(move |change| {
                let (Some(inner), Some(viewport)) = (controller.upgrade(), viewport.upgrade())
                else {
                    return;
                };
                PaginationController { inner }.handle_offset_change(viewport.as_ref(), change);
            })
        };

        let attachment = Attachment {
            viewport: weak_viewport,
            _subscription: viewport.observe_offset(listener),
        };
        let previous = self.inner.attachment.lock().replace(attachment);
        if previous.is_some() {
            tracing::debug!("PaginationController: re-attached, dropping previous subscription");
        } else {
            tracing::debug!("PaginationController: attached");
        }
        // Unsubscribes outside the attachment lock.
        drop(previous);
    }

    /// Stop observing the viewport and release the delegate.
    pub fn detach(&self) {
        let attachment = self.inner.attachment.lock().take();
        let delegate = self.inner.delegate.lock().take();
        if attachment.is_some() || delegate.is_some() {
            tracing::debug!("PaginationController: detached");
        }
        drop(attachment);
        drop(delegate);
    }

    /// True while attached to a viewport that is still alive.
    pub fn is_attached(&self) -> bool {
        self.inner
            .attachment
            .lock()
            .as_ref()
            .is_some_and(|attachment| attachment.viewport.strong_count() > 0)
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    fn handle_offset_change(&self, viewport: &dyn Viewport, change: OffsetChange) {
        let metrics = ScrollMetrics {
            viewport: viewport.bounds(),
            content_size: viewport.content_size(),
            old_offset: change.old,
            new_offset: change.new,
            visible: viewport.is_visible(),
            rtl: viewport.is_rtl(),
            flips_in_rtl: viewport.flips_in_rtl(),
        };
        self.process(&metrics);
    }

    /// Evaluate one offset change and notify the delegate if the next page
    /// should be requested. Returns whether the delegate was notified.
    ///
    /// Attached viewports are routed through here; hosts that compute their
    /// own metrics can call it directly.
    pub fn process(&self, metrics: &ScrollMetrics) -> bool {
        let Some(delegate) = self.delegate() else {
            return false;
        };

        let config = self.config();
        let direction = metrics.direction();
        let decision = decision::evaluate(&self.inner.context, direction, &config, metrics);
        tracing::trace!("PaginationController: direction={direction} -> {decision:?}");

        if !decision.should_prefetch() {
            return false;
        }

        if !delegate.should_prefetch(self, &self.inner.context) {
            tracing::debug!("PaginationController: delegate declined next page");
            return false;
        }

        tracing::debug!("PaginationController: requesting next page ({decision:?})");
        delegate.prefetch_next_page(self, &self.inner.context);
        true
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("config", &self.config())
            .field("context", &self.inner.context)
            .field("has_delegate", &self.has_delegate())
            .field("attached", &self.is_attached())
            .finish()
    }
}
