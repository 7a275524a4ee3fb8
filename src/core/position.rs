//! 3D positions in the workcell coordinate frame.
//!
//! Positions are immutable values in millimeters. The only computation
//! they support is straight-line distance, which the arm uses to derive
//! simulated travel durations.

use serde::{Deserialize, Serialize};

/// Immutable 3D point in workcell coordinates (millimeters).
///
/// A position is created once per device or robot location and is
/// read-only thereafter; there are no mutators.
///
/// # Example
///
/// ```rust
/// use workcell::core::Position;
///
/// let storage = Position::new(100.0, 200.0, 50.0);
/// let handler = Position::new(400.0, 200.0, 100.0);
///
/// let d = storage.distance_to(&handler);
/// assert!((d - 304.138).abs() < 0.001);
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// The workcell origin, used as the robot's home position.
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a position from coordinates in millimeters.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// X coordinate in millimeters.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate in millimeters.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z coordinate in millimeters.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean distance to another position, in millimeters.
    ///
    /// Pure: no side effects, never fails. Symmetric, and zero exactly
    /// when the two positions are equal.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_follows_pythagoras() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn distance_uses_all_three_axes() {
        let a = Position::new(1.0, 2.0, 3.0);
        let b = Position::new(3.0, 4.0, 5.0);
        let expected = (12.0f64).sqrt();
        assert!((a.distance_to(&b) - expected).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(100.0, 200.0, 50.0);
        let b = Position::new(550.0, 400.0, 75.0);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Position::new(700.0, 200.0, 80.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn origin_is_all_zero() {
        assert_eq!(Position::ORIGIN, Position::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn position_serializes_correctly() {
        let p = Position::new(1000.0, 200.0, 90.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn display_shows_coordinates() {
        let p = Position::new(1.0, 2.5, 3.0);
        assert_eq!(format!("{}", p), "(1, 2.5, 3)");
    }
}
