//! Scroll directions and axis selection
//!
//! [`Direction`] is a flag set over the four scroll directions. The same
//! type describes both the motion observed between two offsets (which may
//! be diagonal, or empty when nothing moved) and the set of directions a
//! host enabled for pagination.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PaginationError;
use crate::geometry::{Point, Size};

bitflags! {
    /// A set of scroll directions
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Direction: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;

        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::empty()
    }
}

impl Direction {
    /// Directions of motion from `old` to `new`, evaluated per axis.
    pub fn between(old: Point, new: Point) -> Self {
        DirectionDetector::detect(old, new)
    }

    /// Parse a single direction name (`"up"`, `"vertical"`, `"all"`, ...).
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Self::UP),
            "down" => Some(Self::DOWN),
            "left" => Some(Self::LEFT),
            "right" => Some(Self::RIGHT),
            "vertical" => Some(Self::VERTICAL),
            "horizontal" => Some(Self::HORIZONTAL),
            "all" => Some(Self::all()),
            "none" => Some(Self::empty()),
            _ => None,
        }
    }

    /// Names of the individual directions in this set, in flag order.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (Self::LEFT, "left"),
            (Self::RIGHT, "right"),
            (Self::UP, "up"),
            (Self::DOWN, "down"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl FromStr for Direction {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| PaginationError::UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join("|"))
    }
}

// Serialized as a preset name where one fits, otherwise as a list of names.
impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let preset = match *self {
            d if d == Self::all() => Some("all"),
            d if d == Self::VERTICAL => Some("vertical"),
            d if d == Self::HORIZONTAL => Some("horizontal"),
            d if d == Self::UP => Some("up"),
            d if d == Self::DOWN => Some("down"),
            d if d == Self::LEFT => Some("left"),
            d if d == Self::RIGHT => Some("right"),
            _ => None,
        };
        if let Some(name) = preset {
            return serializer.serialize_str(name);
        }
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectionVisitor;

        impl<'de> Visitor<'de> for DirectionVisitor {
            type Value = Direction;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a direction name or a list of direction names")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Direction, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Direction, A::Error> {
                let mut directions = Direction::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    directions |= name.parse::<Direction>().map_err(de::Error::custom)?;
                }
                Ok(directions)
            }
        }

        deserializer.deserialize_any(DirectionVisitor)
    }
}

/// Derives scroll directions from a pair of content offsets.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionDetector;

impl DirectionDetector {
    /// Compare `old` and `new` independently per axis.
    ///
    /// An axis whose value did not change contributes nothing, so the
    /// result is empty when the offset did not move and holds one flag per
    /// axis on diagonal motion.
    pub fn detect(old: Point, new: Point) -> Direction {
        let mut direction = Direction::empty();
        if old.x != new.x {
            if old.x < new.x {
                direction.insert(Direction::RIGHT);
            } else {
                direction.insert(Direction::LEFT);
            }
        }
        if old.y != new.y {
            if old.y < new.y {
                direction.insert(Direction::DOWN);
            } else {
                direction.insert(Direction::UP);
            }
        }
        direction
    }
}

/// The single axis pagination is evaluated on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    /// Select the axis for a set of scrollable directions.
    ///
    /// Vertical when the set holds both `UP` and `DOWN`, horizontal otherwise.
    pub fn from_directions(directions: Direction) -> Self {
        if directions.contains(Direction::VERTICAL) {
            ScrollAxis::Vertical
        } else {
            ScrollAxis::Horizontal
        }
    }

    /// Both directions along this axis.
    pub fn directions(&self) -> Direction {
        match self {
            ScrollAxis::Vertical => Direction::VERTICAL,
            ScrollAxis::Horizontal => Direction::HORIZONTAL,
        }
    }

    /// True for a non-empty motion that stays on this axis.
    pub fn contains(&self, direction: Direction) -> bool {
        !direction.is_empty() && self.directions().contains(direction)
    }

    /// Length of `size` along this axis.
    #[inline]
    pub fn length(&self, size: Size) -> f32 {
        match self {
            ScrollAxis::Vertical => size.height,
            ScrollAxis::Horizontal => size.width,
        }
    }

    /// Component of `point` along this axis.
    #[inline]
    pub fn offset(&self, point: Point) -> f32 {
        match self {
            ScrollAxis::Vertical => point.y,
            ScrollAxis::Horizontal => point.x,
        }
    }
}

impl fmt::Display for ScrollAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollAxis::Vertical => f.write_str("vertical"),
            ScrollAxis::Horizontal => f.write_str("horizontal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_movement_is_empty() {
        for (x, y) in [(0.0, 0.0), (12.5, -3.0), (1000.0, 1000.0)] {
            let p = Point::new(x, y);
            assert!(DirectionDetector::detect(p, p).is_empty());
        }
    }

    #[test]
    fn test_single_axis_motion() {
        let origin = Point::new(10.0, 10.0);
        assert_eq!(
            DirectionDetector::detect(origin, Point::new(10.0, 20.0)),
            Direction::DOWN
        );
        assert_eq!(
            DirectionDetector::detect(origin, Point::new(10.0, 0.0)),
            Direction::UP
        );
        assert_eq!(
            DirectionDetector::detect(origin, Point::new(20.0, 10.0)),
            Direction::RIGHT
        );
        assert_eq!(
            DirectionDetector::detect(origin, Point::new(0.0, 10.0)),
            Direction::LEFT
        );
    }

    #[test]
    fn test_diagonal_motion_sets_both_axes() {
        let d = Direction::between(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        assert_eq!(d, Direction::RIGHT | Direction::DOWN);

        let d = Direction::between(Point::new(5.0, 5.0), Point::new(0.0, 0.0));
        assert_eq!(d, Direction::LEFT | Direction::UP);
        assert!(d.intersects(Direction::VERTICAL));
        assert!(d.intersects(Direction::HORIZONTAL));
    }

    #[test]
    fn test_aggregates() {
        assert!(Direction::VERTICAL.contains(Direction::UP));
        assert!(Direction::VERTICAL.contains(Direction::DOWN));
        assert!(!Direction::VERTICAL.intersects(Direction::HORIZONTAL));
        assert_eq!(Direction::VERTICAL | Direction::HORIZONTAL, Direction::all());
    }

    #[test]
    fn test_axis_selection() {
        assert_eq!(
            ScrollAxis::from_directions(Direction::VERTICAL),
            ScrollAxis::Vertical
        );
        assert_eq!(ScrollAxis::from_directions(Direction::all()), ScrollAxis::Vertical);
        assert_eq!(
            ScrollAxis::from_directions(Direction::HORIZONTAL),
            ScrollAxis::Horizontal
        );
        assert_eq!(ScrollAxis::Vertical.to_string(), "vertical");
        assert_eq!(ScrollAxis::Horizontal.to_string(), "horizontal");
    }

    #[test]
    fn test_axis_contains() {
        assert!(ScrollAxis::Vertical.contains(Direction::UP));
        assert!(ScrollAxis::Vertical.contains(Direction::VERTICAL));
        assert!(!ScrollAxis::Vertical.contains(Direction::LEFT));
        assert!(!ScrollAxis::Vertical.contains(Direction::empty()));
        assert!(!ScrollAxis::Horizontal.contains(Direction::RIGHT | Direction::DOWN));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("vertical".parse::<Direction>().ok(), Some(Direction::VERTICAL));
        assert_eq!(" Left ".parse::<Direction>().ok(), Some(Direction::LEFT));
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(PaginationError::UnknownDirection(name)) if name == "sideways"
        ));
        assert_eq!((Direction::DOWN | Direction::RIGHT).to_string(), "right|down");
        assert_eq!(Direction::empty().to_string(), "none");
    }

    #[test]
    fn test_parse_name_is_case_insensitive() {
        assert_eq!(Direction::parse_name("down"), Some(Direction::DOWN));
        assert_eq!(Direction::parse_name("HORIZONTAL"), Some(Direction::HORIZONTAL));
        assert_eq!(Direction::parse_name("all"), Some(Direction::all()));
        assert_eq!(Direction::parse_name("none"), Some(Direction::empty()));
        assert_eq!(Direction::parse_name("diagonal"), None);

        // The generated flag lookup only knows the exact constant names.
        assert_eq!(Direction::from_name("DOWN"), Some(Direction::DOWN));
        assert_eq!(Direction::from_name("down"), None);
    }
}
