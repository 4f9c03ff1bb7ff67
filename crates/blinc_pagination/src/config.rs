//! Pagination configuration presets.

use serde::{Deserialize, Serialize};

use crate::direction::{Direction, ScrollAxis};
use crate::error::{PaginationError, Result};

/// Default distance from the end of content, in viewport lengths, at which
/// the next page is requested.
pub const DEFAULT_LEADING_SCREENS: f32 = 2.0;

/// Configuration for a paginated viewport.
///
/// Loaded from TOML as:
///
/// ```toml
/// enabled = true
/// scrollable_directions = "vertical"   # or ["left", "right"]
/// leading_screens = 2.0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Whether offset changes may trigger a prefetch at all.
    pub enabled: bool,
    /// Directions pagination is evaluated for; also selects the axis.
    pub scrollable_directions: Direction,
    /// Trigger distance from the end of content, in viewport lengths.
    pub leading_screens: f32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl PaginationConfig {
    /// Vertical pagination, two screens ahead.
    pub fn standard() -> Self {
        Self {
            enabled: true,
            scrollable_directions: Direction::VERTICAL,
            leading_screens: DEFAULT_LEADING_SCREENS,
        }
    }

    /// Vertical pagination with a custom lead.
    pub fn vertical(leading_screens: f32) -> Self {
        Self {
            leading_screens,
            ..Self::standard()
        }
    }

    /// Horizontal pagination with a custom lead.
    pub fn horizontal(leading_screens: f32) -> Self {
        Self {
            scrollable_directions: Direction::HORIZONTAL,
            leading_screens,
            ..Self::standard()
        }
    }

    /// Pagination switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::standard()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_scrollable_directions(mut self, directions: Direction) -> Self {
        self.scrollable_directions = directions;
        self
    }

    pub fn with_leading_screens(mut self, leading_screens: f32) -> Self {
        self.leading_screens = leading_screens;
        self
    }

    /// The axis pagination is evaluated on.
    pub fn axis(&self) -> ScrollAxis {
        ScrollAxis::from_directions(self.scrollable_directions)
    }

    /// Reject leading screens that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.leading_screens.is_finite() || self.leading_screens < 0.0 {
            return Err(PaginationError::InvalidLeadingScreens(self.leading_screens));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::parse_toml(source).map_err(|err| {
            tracing::warn!("Rejected pagination config: {err}");
            err
        })
    }

    fn parse_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
