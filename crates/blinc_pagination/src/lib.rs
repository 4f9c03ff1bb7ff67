//! blinc_pagination - Scroll-driven prefetch triggering for paginated content.
//!
//! This crate provides:
//! - Scroll direction detection from successive content offsets
//! - A shared, thread-safe fetch context (idle, fetching, cancelled, completed, failed)
//! - The trigger rules deciding when the next page should be requested
//! - A controller that observes a viewport and notifies a delegate
//!
//! # Quick Start
//!
//! ```ignore
//! use blinc_pagination::prelude::*;
//! use std::sync::Arc;
//!
//! let view = Arc::new(ScrollView::new(Size::new(320.0, 480.0), Size::new(320.0, 2000.0)));
//!
//! let controller = PaginationController::new();
//! controller.on_prefetch(|context| {
//!     context.start();
//!     // ... load the next page, then:
//!     context.finish(true);
//! });
//! controller.attach(&view);
//!
//! // Scrolling within two screens of the end requests the next page.
//! view.set_content_offset(Point::new(0.0, 700.0));
//! ```
//!
//! Hosts without an observable viewport can evaluate the rules directly:
//!
//! ```ignore
//! use blinc_pagination::{
//!     should_prefetch, Direction, PaginationConfig, PaginationContext, ScrollMetrics,
//! };
//!
//! let metrics = ScrollMetrics::new(viewport, content, old_offset, new_offset);
//! if should_prefetch(&context, metrics.direction(), &PaginationConfig::standard(), &metrics) {
//!     // fetch
//! }
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod decision;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod viewport;

pub use config::{PaginationConfig, DEFAULT_LEADING_SCREENS};
pub use context::{PaginationContext, PaginationState};
pub use controller::{PaginationController, PaginationDelegate, PrefetchCallback};
pub use decision::{evaluate, should_prefetch, PrefetchDecision};
pub use direction::{Direction, DirectionDetector, ScrollAxis};
pub use error::{PaginationError, Result};
pub use geometry::{Point, Size};
pub use metrics::ScrollMetrics;
pub use viewport::{
    OffsetChange, OffsetListener, OffsetNotifier, ScrollView, Subscription, Viewport,
};

/// Commonly used types
pub mod prelude {
    pub use crate::config::PaginationConfig;
    pub use crate::context::{PaginationContext, PaginationState};
    pub use crate::controller::{PaginationController, PaginationDelegate};
    pub use crate::direction::{Direction, ScrollAxis};
    pub use crate::geometry::{Point, Size};
    pub use crate::metrics::ScrollMetrics;
    pub use crate::viewport::{ScrollView, Viewport};
}
