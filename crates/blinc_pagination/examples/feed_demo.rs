//! Infinite Feed Demo
//!
//! Simulates a vertically scrolling feed that loads pages on a worker thread:
//! - Loading pagination settings from TOML
//! - Attaching a controller to a scroll view
//! - Growing the content when each page arrives
//! - Declining further requests once the last page is requested
//!
//! Run with: RUST_LOG=blinc_pagination=debug cargo run -p blinc_pagination --example feed_demo

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use blinc_pagination::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ROW_HEIGHT: f32 = 48.0;
const ROWS_PER_PAGE: usize = 20;
const MAX_PAGES: usize = 5;

const SETTINGS: &str = r#"
enabled = true
scrollable_directions = "vertical"
leading_screens = 1.5
"#;

/// Loads pages on worker threads until the feed is exhausted.
struct FeedLoader {
    pages_tx: Mutex<mpsc::Sender<usize>>,
    requested: AtomicUsize,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl PaginationDelegate for FeedLoader {
    fn should_prefetch(&self, _: &PaginationController, _: &PaginationContext) -> bool {
        self.requested.load(Ordering::SeqCst) < MAX_PAGES
    }

    fn prefetch_next_page(&self, _: &PaginationController, context: &PaginationContext) {
        context.start();
        let page = self.requested.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("requesting page {page}");

        let context = context.clone();
        let pages_tx = self.pages_tx.lock().clone();
        self.workers.lock().push(thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            let ok = pages_tx.send(ROWS_PER_PAGE).is_ok();
            context.finish(ok);
        }));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PaginationConfig::from_toml_str(SETTINGS)?;
    let page_height = ROW_HEIGHT * ROWS_PER_PAGE as f32;
    let view = Arc::new(ScrollView::new(
        Size::new(375.0, 667.0),
        Size::new(375.0, page_height),
    ));

    let (pages_tx, pages_rx) = mpsc::channel::<usize>();
    let loader = Arc::new(FeedLoader {
        pages_tx: Mutex::new(pages_tx),
        requested: AtomicUsize::new(1),
        workers: Mutex::new(Vec::new()),
    });
    let mut loaded = 1;

    let controller = PaginationController::with_config(config);
    controller.set_delegate(Arc::clone(&loader) as Arc<dyn PaginationDelegate>);
    controller.attach(&view);

    // Fling downward in small steps, applying pages as they land.
    while loaded < MAX_PAGES {
        view.scroll_by(0.0, ROW_HEIGHT);

        while let Ok(rows) = pages_rx.try_recv() {
            loaded += 1;
            let content = view.content_size();
            view.set_content_size(Size::new(
                content.width,
                content.height + ROW_HEIGHT * rows as f32,
            ));
            tracing::info!(
                "page {loaded} loaded, content height {}",
                view.content_size().height
            );
        }

        // Stay inside the content.
        let content = view.content_size();
        let max_offset = (content.height - view.bounds().height).max(0.0);
        if view.content_offset().y >= max_offset {
            view.set_content_offset(Point::new(0.0, max_offset));
            thread::sleep(Duration::from_millis(10));
        }
    }

    controller.detach();
    for worker in loader.workers.lock().drain(..) {
        if worker.join().is_err() {
            tracing::warn!("page loader panicked");
        }
    }
    tracing::info!(
        "done: {loaded} pages, last fetch {:?}",
        controller.context().state()
    );
    Ok(())
}
