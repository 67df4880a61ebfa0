//! 2D motion components.
//!
//! [`Position`] and [`Velocity`] are the two components the movement update
//! operates on: every tick, an entity holding both is advanced by
//! `velocity * dt` on each axis.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentData, ComponentKind, KindMismatch};

/// A 2D position in world units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub coords: DVec2,
}

impl Position {
    /// The world origin.
    pub const ORIGIN: Self = Self { coords: DVec2::ZERO };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            coords: DVec2::new(x, y),
        }
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.coords.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.coords.y
    }

    /// Move by `velocity * dt`, each axis independently.
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.coords += velocity.linear * dt;
    }
}

/// Formats as `(x, y)` rounded to one decimal place.
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.coords.x, self.coords.y)
    }
}

/// A 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub linear: DVec2,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self {
        linear: DVec2::ZERO,
    };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            linear: DVec2::new(dx, dy),
        }
    }
}

impl From<Position> for Component {
    fn from(value: Position) -> Self {
        Self::Position(value)
    }
}

impl From<Velocity> for Component {
    fn from(value: Velocity) -> Self {
        Self::Velocity(value)
    }
}

impl TryFrom<Component> for Position {
    type Error = KindMismatch;

    fn try_from(component: Component) -> Result<Self, Self::Error> {
        match component {
            Component::Position(p) => Ok(p),
            other => Err(KindMismatch {
                expected: ComponentKind::Position,
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Component> for Velocity {
    type Error = KindMismatch;

    fn try_from(component: Component) -> Result<Self, Self::Error> {
        match component {
            Component::Velocity(v) => Ok(v),
            other => Err(KindMismatch {
                expected: ComponentKind::Velocity,
                found: other.kind(),
            }),
        }
    }
}

impl ComponentData for Position {
    const KIND: ComponentKind = ComponentKind::Position;
    const NAME: &'static str = "position";

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::Position(p) => Some(p),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::Position(p) => Some(p),
            _ => None,
        }
    }
}

impl ComponentData for Velocity {
    const KIND: ComponentKind = ComponentKind::Velocity;
    const NAME: &'static str = "velocity";

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::Velocity(v) => Some(v),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::Velocity(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_by_dt() {
        let mut p = Position::new(1.0, 1.0);
        p.advance(&Velocity::new(2.0, -4.0), 0.5);
        assert_eq!(p, Position::new(2.0, -1.0));
    }

    #[test]
    fn test_advance_with_zero_velocity() {
        let mut p = Position::new(3.0, 7.0);
        p.advance(&Velocity::ZERO, 10.0);
        assert_eq!(p, Position::new(3.0, 7.0));
    }

    #[test]
    fn test_display_rounds_to_one_decimal() {
        assert_eq!(Position::new(5.0, 2.5).to_string(), "(5.0, 2.5)");
        assert_eq!(Position::new(7.46, -0.04).to_string(), "(7.5, -0.0)");
        assert_eq!(Position::ORIGIN.to_string(), "(0.0, 0.0)");
    }

    #[test]
    fn test_kind_constants() {
        assert_eq!(Position::KIND, ComponentKind::Position);
        assert_eq!(Velocity::KIND, ComponentKind::Velocity);
        assert_ne!(Position::NAME, Velocity::NAME);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let v = Velocity::new(-0.5, 0.0);
        let bytes = rmp_serde::to_vec(&v).unwrap();
        let restored: Velocity = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(v, restored);
    }
}
