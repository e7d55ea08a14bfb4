//! Math utilities and types
//!
//! Scene components are 2D; positions and scales use `nalgebra` vectors and
//! rotations are plain angles in radians.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Tau constant (2 * PI)
    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Convert an angle in radians to degrees
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Convert an angle in degrees to radians
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(radians_to_degrees(constants::PI), 180.0, epsilon = 1e-4);
        assert_relative_eq!(degrees_to_radians(90.0), constants::PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(radians_to_degrees(degrees_to_radians(33.0)), 33.0, epsilon = 1e-4);
    }
}
