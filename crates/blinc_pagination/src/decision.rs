//! Prefetch trigger decision
//!
//! Decides, for one offset change, whether the host should start loading the
//! next page. The rules run in a fixed order and the first one that applies
//! decides:
//!
//! 1. pagination disabled
//! 2. viewport not visible
//! 3. a fetch is already in flight
//! 4. no leading screens, or an empty viewport
//! 5. content shorter than the viewport (always trigger)
//! 6. motion outside the scrollable directions
//! 7. motion back toward the head of the content
//! 8. remaining distance against `viewport length * leading screens`
//!
//! In a right-to-left horizontal layout that does not mirror itself, the
//! content origin sits at the far end, so the raw offset already is the
//! distance left to scroll.

use crate::config::PaginationConfig;
use crate::context::PaginationContext;
use crate::direction::{Direction, ScrollAxis};
use crate::metrics::ScrollMetrics;

/// Outcome of a prefetch evaluation, naming the rule that decided it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrefetchDecision {
    /// Pagination is switched off.
    Disabled,
    /// The viewport is not on screen.
    Hidden,
    /// A fetch is already in flight.
    AlreadyFetching,
    /// Leading screens is zero, negative or NaN.
    NoLeadingScreens,
    /// The viewport has no area.
    EmptyViewport,
    /// Content is shorter than the viewport; keep loading to fill it.
    ContentFitsViewport,
    /// The motion does not touch any scrollable direction.
    DirectionNotScrollable,
    /// The motion heads back toward already loaded content.
    TowardHead,
    /// Far enough from the end that no fetch is needed yet.
    BeyondLeadingScreens { remaining: f32, trigger: f32 },
    /// Within the leading distance of the end of content.
    WithinLeadingScreens { remaining: f32, trigger: f32 },
}

impl PrefetchDecision {
    /// True when the host should start fetching the next page.
    pub fn should_prefetch(&self) -> bool {
        matches!(
            self,
            PrefetchDecision::ContentFitsViewport | PrefetchDecision::WithinLeadingScreens { .. }
        )
    }
}

/// Evaluate the trigger rules for one offset change.
///
/// `direction` is the observed motion (see [`Direction::between`]); the axis
/// comes from `config.scrollable_directions`, not from the motion.
pub fn evaluate(
    context: &PaginationContext,
    direction: Direction,
    config: &PaginationConfig,
    metrics: &ScrollMetrics,
) -> PrefetchDecision {
    if !config.enabled {
        return PrefetchDecision::Disabled;
    }

    if !metrics.visible {
        return PrefetchDecision::Hidden;
    }

    if context.is_fetching() {
        return PrefetchDecision::AlreadyFetching;
    }

    // NaN fails the comparison and is treated like zero.
    if !(config.leading_screens > 0.0) {
        return PrefetchDecision::NoLeadingScreens;
    }

    if metrics.viewport.is_empty() {
        return PrefetchDecision::EmptyViewport;
    }

    let axis = config.axis();
    let view_length = axis.length(metrics.viewport);
    let content_length = axis.length(metrics.content_size);
    let offset = axis.offset(metrics.new_offset);

    // Applies regardless of the observed direction.
    if content_length < view_length {
        return PrefetchDecision::ContentFitsViewport;
    }

    if !direction.intersects(config.scrollable_directions) {
        return PrefetchDecision::DirectionNotScrollable;
    }

    if is_toward_head(direction, metrics.rtl) {
        return PrefetchDecision::TowardHead;
    }

    let trigger = view_length * config.leading_screens;
    let remaining = if !metrics.flips_in_rtl && metrics.rtl && axis == ScrollAxis::Horizontal {
        offset
    } else {
        content_length - view_length - offset
    };

    if remaining <= trigger {
        PrefetchDecision::WithinLeadingScreens { remaining, trigger }
    } else {
        PrefetchDecision::BeyondLeadingScreens { remaining, trigger }
    }
}

/// Whether the host should start fetching the next page.
pub fn should_prefetch(
    context: &PaginationContext,
    direction: Direction,
    config: &PaginationConfig,
    metrics: &ScrollMetrics,
) -> bool {
    evaluate(context, direction, config, metrics).should_prefetch()
}

/// Up is always toward the head; left in LTR, right in RTL.
fn is_toward_head(direction: Direction, rtl: bool) -> bool {
    if direction.contains(Direction::UP) {
        return true;
    }
    if rtl {
        direction.contains(Direction::RIGHT)
    } else {
        direction.contains(Direction::LEFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    const SCREEN: f32 = 1.0;

    fn vertical_metrics(view: f32, content: f32, offset: f32) -> ScrollMetrics {
        ScrollMetrics::at_rest(
            Size::new(SCREEN, view),
            Size::new(SCREEN, content),
            Point::new(0.0, offset),
        )
    }

    fn horizontal_metrics(view: f32, content: f32, offset: f32) -> ScrollMetrics {
        ScrollMetrics::at_rest(
            Size::new(view, SCREEN),
            Size::new(content, SCREEN),
            Point::new(offset, 0.0),
        )
    }

    /// Metrics that trigger for every forward motion on either axis.
    fn passing_metrics() -> ScrollMetrics {
        ScrollMetrics::at_rest(
            Size::new(SCREEN, SCREEN),
            Size::new(SCREEN * 3.0, SCREEN * 3.0),
            Point::new(SCREEN, SCREEN),
        )
    }

    fn vertical(leading: f32) -> PaginationConfig {
        PaginationConfig::vertical(leading)
    }

    fn horizontal(leading: f32) -> PaginationConfig {
        PaginationConfig::horizontal(leading)
    }

    #[test]
    fn test_null_state_never_fetches() {
        let context = PaginationContext::new();
        let zero = ScrollMetrics::default();
        for (rtl, flips) in [(false, false), (true, false), (true, true)] {
            let metrics = zero.with_rtl(rtl).with_flips_in_rtl(flips);
            assert!(!should_prefetch(
                &context,
                Direction::DOWN,
                &vertical(0.0),
                &metrics
            ));
        }
    }

    #[test]
    fn test_disabled_never_fetches() {
        let context = PaginationContext::new();
        let config = vertical(1.0).with_enabled(false);
        assert_eq!(
            evaluate(&context, Direction::DOWN, &config, &passing_metrics()),
            PrefetchDecision::Disabled
        );
        // Even small content is gated.
        let metrics = vertical_metrics(2.0, 1.0, 0.0);
        assert!(!should_prefetch(&context, Direction::DOWN, &config, &metrics));
    }

    #[test]
    fn test_hidden_never_fetches() {
        let context = PaginationContext::new();
        let metrics = vertical_metrics(2.0, 1.0, 0.0).with_visible(false);
        assert_eq!(
            evaluate(&context, Direction::DOWN, &vertical(1.0), &metrics),
            PrefetchDecision::Hidden
        );
    }

    #[test]
    fn test_already_fetching() {
        let context = PaginationContext::new();
        context.start();
        for (rtl, flips) in [(false, false), (true, false), (true, true)] {
            let metrics = passing_metrics().with_rtl(rtl).with_flips_in_rtl(flips);
            assert_eq!(
                evaluate(&context, Direction::DOWN, &vertical(1.0), &metrics),
                PrefetchDecision::AlreadyFetching
            );
        }

        context.finish(true);
        assert!(should_prefetch(
            &context,
            Direction::DOWN,
            &vertical(1.0),
            &passing_metrics()
        ));
    }

    #[test]
    fn test_non_positive_leading_screens() {
        let context = PaginationContext::new();
        for leading in [0.0, -1.0, f32::NAN] {
            assert_eq!(
                evaluate(&context, Direction::DOWN, &vertical(leading), &passing_metrics()),
                PrefetchDecision::NoLeadingScreens
            );
            // Small content does not bypass it.
            let metrics = vertical_metrics(2.0, 1.0, 0.0);
            assert!(!should_prefetch(
                &context,
                Direction::DOWN,
                &vertical(leading),
                &metrics
            ));
        }
    }

    #[test]
    fn test_empty_viewport() {
        let context = PaginationContext::new();
        let metrics =
            ScrollMetrics::at_rest(Size::new(0.0, 10.0), Size::new(0.0, 100.0), Point::ZERO);
        assert_eq!(
            evaluate(&context, Direction::DOWN, &vertical(1.0), &metrics),
            PrefetchDecision::EmptyViewport
        );
    }

    #[test]
    fn test_empty_viewport_beats_small_content() {
        let context = PaginationContext::new();
        let metrics =
            ScrollMetrics::at_rest(Size::new(0.0, 100.0), Size::new(0.0, 40.0), Point::ZERO);
        assert_eq!(
            evaluate(&context, Direction::empty(), &vertical(1.0), &metrics),
            PrefetchDecision::EmptyViewport
        );
        assert!(!should_prefetch(&context, Direction::DOWN, &vertical(1.0), &metrics));
    }

    #[test]
    fn test_scroll_directions() {
        let context = PaginationContext::new();
        let metrics = passing_metrics();
        let cases = [
            // (direction, config, rtl, flips, expected)
            (Direction::RIGHT, horizontal(1.0), false, false, true),
            (Direction::DOWN, vertical(1.0), false, false, true),
            (Direction::UP, vertical(1.0), false, false, false),
            (Direction::LEFT, horizontal(1.0), false, false, false),
            (Direction::RIGHT, horizontal(1.0), true, false, false),
            (Direction::DOWN, vertical(1.0), true, false, true),
            (Direction::UP, vertical(1.0), true, false, false),
            (Direction::LEFT, horizontal(1.0), true, false, true),
            (Direction::RIGHT, horizontal(1.0), true, true, false),
            (Direction::DOWN, vertical(1.0), true, true, true),
            (Direction::UP, vertical(1.0), true, true, false),
            (Direction::LEFT, horizontal(1.0), true, true, true),
        ];
        for (direction, config, rtl, flips, expected) in cases {
            let metrics = metrics.with_rtl(rtl).with_flips_in_rtl(flips);
            assert_eq!(
                should_prefetch(&context, direction, &config, &metrics),
                expected,
                "direction={direction} rtl={rtl} flips={flips}"
            );
        }
    }

    #[test]
    fn test_toward_head() {
        let context = PaginationContext::new();
        assert_eq!(
            evaluate(&context, Direction::UP, &vertical(1.0), &passing_metrics()),
            PrefetchDecision::TowardHead
        );
        // Diagonal motion with a head-ward component is suppressed too.
        assert_eq!(
            evaluate(
                &context,
                Direction::DOWN | Direction::LEFT,
                &vertical(1.0),
                &passing_metrics()
            ),
            PrefetchDecision::TowardHead
        );
    }

    #[test]
    fn test_direction_outside_scrollable_directions() {
        let context = PaginationContext::new();
        assert_eq!(
            evaluate(&context, Direction::RIGHT, &vertical(1.0), &passing_metrics()),
            PrefetchDecision::DirectionNotScrollable
        );
        assert_eq!(
            evaluate(&context, Direction::empty(), &vertical(1.0), &passing_metrics()),
            PrefetchDecision::DirectionNotScrollable
        );
        // Diagonal motion counts as long as one component is scrollable.
        assert!(should_prefetch(
            &context,
            Direction::DOWN | Direction::RIGHT,
            &vertical(1.0),
            &passing_metrics()
        ));
    }

    #[test]
    fn test_vertical_scroll_to_exact_leading() {
        let context = PaginationContext::new();
        // 1-screen viewport scrolled 1 screen into 3 screens of content:
        // the bottom edge sits exactly 1 screen from the end.
        let metrics = vertical_metrics(SCREEN, SCREEN * 3.0, SCREEN);
        for (rtl, flips) in [(false, false), (true, false), (true, true)] {
            let metrics = metrics.with_rtl(rtl).with_flips_in_rtl(flips);
            assert_eq!(
                evaluate(&context, Direction::DOWN, &vertical(1.0), &metrics),
                PrefetchDecision::WithinLeadingScreens {
                    remaining: 1.0,
                    trigger: 1.0
                }
            );
        }
    }

    #[test]
    fn test_vertical_scroll_below_leading() {
        let context = PaginationContext::new();
        let metrics = vertical_metrics(SCREEN, SCREEN * 3.0, SCREEN * 0.5);
        assert_eq!(
            evaluate(&context, Direction::DOWN, &vertical(1.0), &metrics),
            PrefetchDecision::BeyondLeadingScreens {
                remaining: 1.5,
                trigger: 1.0
            }
        );
    }

    #[test]
    fn test_horizontal_scroll_to_exact_leading() {
        let context = PaginationContext::new();
        let metrics = horizontal_metrics(SCREEN, SCREEN * 3.0, SCREEN);
        assert!(should_prefetch(
            &context,
            Direction::RIGHT,
            &horizontal(1.0),
            &metrics
        ));
        // Mirrored layouts compute from the content end like LTR.
        let flipped = metrics.with_rtl(true).with_flips_in_rtl(true);
        assert!(should_prefetch(
            &context,
            Direction::LEFT,
            &horizontal(1.0),
            &flipped
        ));
    }

    #[test]
    fn test_horizontal_rtl_uses_raw_offset() {
        let context = PaginationContext::new();
        let metrics = horizontal_metrics(SCREEN, SCREEN * 3.0, SCREEN * 0.5).with_rtl(true);
        assert_eq!(
            evaluate(&context, Direction::LEFT, &horizontal(1.0), &metrics),
            PrefetchDecision::WithinLeadingScreens {
                remaining: 0.5,
                trigger: 1.0
            }
        );
    }

    #[test]
    fn test_horizontal_rtl_flip_cancels_inversion() {
        let context = PaginationContext::new();
        let metrics = horizontal_metrics(SCREEN, SCREEN * 3.0, SCREEN * 0.5)
            .with_rtl(true)
            .with_flips_in_rtl(true);
        assert_eq!(
            evaluate(&context, Direction::LEFT, &horizontal(1.0), &metrics),
            PrefetchDecision::BeyondLeadingScreens {
                remaining: 1.5,
                trigger: 1.0
            }
        );
    }

    #[test]
    fn test_rtl_inversion_ignored_on_vertical_axis() {
        let context = PaginationContext::new();
        let metrics = vertical_metrics(SCREEN, SCREEN * 3.0, SCREEN * 0.5).with_rtl(true);
        assert!(!should_prefetch(
            &context,
            Direction::DOWN,
            &vertical(1.0),
            &metrics
        ));
    }

    #[test]
    fn test_small_content_always_fetches() {
        let context = PaginationContext::new();
        // Content half the viewport height.
        let metrics = vertical_metrics(SCREEN, SCREEN * 0.5, 0.0);
        let directions = [
            Direction::empty(),
            Direction::UP,
            Direction::DOWN,
            Direction::LEFT,
            Direction::RIGHT,
            Direction::UP | Direction::LEFT,
        ];
        for direction in directions {
            for (rtl, flips) in [(false, false), (true, false), (true, true)] {
                let metrics = metrics.with_rtl(rtl).with_flips_in_rtl(flips);
                assert_eq!(
                    evaluate(&context, direction, &vertical(1.0), &metrics),
                    PrefetchDecision::ContentFitsViewport,
                    "direction={direction} rtl={rtl} flips={flips}"
                );
            }
        }
    }

    #[test]
    fn test_small_content_horizontal() {
        let context = PaginationContext::new();
        let metrics = horizontal_metrics(SCREEN * 2.0, SCREEN, 0.0).with_rtl(true);
        assert!(should_prefetch(
            &context,
            Direction::RIGHT,
            &horizontal(1.0),
            &metrics
        ));
    }

    #[test]
    fn test_larger_leading_screens_fetch_earlier() {
        let context = PaginationContext::new();
        // 10 screens of content, scrolled to the top.
        let metrics = vertical_metrics(SCREEN, SCREEN * 10.0, 0.0);
        assert!(!should_prefetch(
            &context,
            Direction::DOWN,
            &vertical(2.0),
            &metrics
        ));
        assert!(should_prefetch(
            &context,
            Direction::DOWN,
            &vertical(9.0),
            &metrics
        ));
    }
}
